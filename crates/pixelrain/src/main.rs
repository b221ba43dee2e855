use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pixelrain_core::RainConfig;
use pixelrain_engine::{AnimationLoop, CellCanvas, FrameState};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::DefaultTerminal;

/// How long to wait for input between ticks, roughly one 60 Hz refresh.
const REFRESH_INTERVAL: Duration = Duration::from_millis(16);

/// Falling characters with a glowing text overlay, in your terminal.
#[derive(Debug, Default, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to use instead of the one in the platform config directory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Overlay text.
    #[arg(long)]
    text: Option<String>,
    /// Target frame rate.
    #[arg(long)]
    fps: Option<f32>,
    /// Seed for a repeatable rain pattern.
    #[arg(long)]
    seed: Option<u64>,
    /// Rain only, no text overlay.
    #[arg(long)]
    no_overlay: bool,
    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Write a config file with every default setting and exit.
    #[arg(long)]
    write_default_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut RainConfig) {
        if let Some(text) = &self.text {
            config.overlay_text = text.clone();
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if self.no_overlay {
            config.overlay_enabled = false;
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    if cli.write_default_config {
        let path = cli
            .config
            .clone()
            .or_else(pixelrain_config::config_path)
            .ok_or_else(|| eyre!("no config directory on this platform, pass --config"))?;
        pixelrain_config::save(&path, &RainConfig::default())?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => pixelrain_config::load(path)?,
        None => pixelrain_config::load_default()?,
    };
    cli.apply(&mut config);
    config.validate().wrap_err("invalid command-line settings")?;

    let terminal = ratatui::init();
    let result = terminal
        .size()
        .wrap_err("failed to read terminal size")
        .and_then(|size| App::new(config, cli.rng(), size.width, size.height))
        .and_then(|app| app.run(terminal));
    ratatui::restore();
    result
}

/// Send `log` output to a file; stderr belongs to the terminal UI.
fn init_logging(path: &Path) -> color_eyre::Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Terminal cell surface the rain is painted on.
    canvas: CellCanvas,
    /// Symbol grid, illumination tracker and overlay.
    animation: AnimationLoop<StdRng>,
    /// Origin of tick timestamps.
    started: Instant,
    /// Whether the canvas changed since it was last drawn.
    dirty: bool,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `cols` × `rows`.
    pub fn new(config: RainConfig, rng: StdRng, cols: u16, rows: u16) -> color_eyre::Result<Self> {
        let mut canvas = CellCanvas::new(cols, rows, config.unit_size);
        log::info!(
            "starting {}x{} at {} fps, overlay {:?}",
            cols,
            rows,
            config.target_fps,
            config.overlay_enabled.then_some(config.overlay_text.as_str())
        );
        let animation = AnimationLoop::new(config, &mut canvas, rng)?;
        Ok(Self {
            running: false,
            canvas,
            animation,
            started: Instant::now(),
            dirty: true,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            if self.dirty {
                terminal.draw(|frame| self.canvas.render(frame))?;
                self.dirty = false;
            }
            self.handle_crossterm_events()?;
            self.tick()?;
        }
        Ok(())
    }

    /// One display refresh: advance the animation to the current time.
    fn tick(&mut self) -> color_eyre::Result<()> {
        let now_ms = self.started.elapsed().as_millis() as u64;
        let state = self
            .animation
            .tick(&mut self.canvas, now_ms)
            .wrap_err("failed to render frame")?;
        if state == FrameState::Rendering {
            self.dirty = true;
        }
        Ok(())
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polling doubles as the refresh interval between ticks.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(REFRESH_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Rebuild the canvas, grid and overlay layout before the next tick.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.canvas.resize(cols, rows);
        self.animation.resize(&mut self.canvas);
        self.dirty = true;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
