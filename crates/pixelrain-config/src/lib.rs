//! Configuration file handling for pixelrain.
//!
//! Settings live in `config.toml` inside the platform config directory
//! (for example `~/.config/pixelrain/config.toml` on Linux). Every field is
//! optional; anything left out takes its default from [`RainConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use directories::ProjectDirs;
use pixelrain_core::RainConfig;

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default location of the configuration file, if the platform has a config
/// directory.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pixelrain").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Parse and validate configuration from TOML text.
pub fn parse(text: &str) -> color_eyre::Result<RainConfig> {
    let config: RainConfig = toml::from_str(text).wrap_err("invalid configuration TOML")?;
    config.validate().wrap_err("invalid configuration value")?;
    Ok(config)
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
pub fn load(path: &Path) -> color_eyre::Result<RainConfig> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(RainConfig::default());
    }

    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let config = parse(&text).wrap_err_with(|| format!("in {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load from the default location, or defaults when there is none.
pub fn load_default() -> color_eyre::Result<RainConfig> {
    match config_path() {
        Some(path) => load(&path),
        None => Ok(RainConfig::default()),
    }
}

/// Write `config` to `path` as TOML, creating parent directories.
pub fn save(path: &Path, config: &RainConfig) -> color_eyre::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(config).wrap_err("failed to serialize configuration")?;
    fs::write(path, text).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote config to {}", path.display());
    Ok(())
}
