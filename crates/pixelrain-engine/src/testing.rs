//! Recording surface used by the engine tests.

use pixelrain_core::{FillStyle, Font, Rect, Rgba, Shadow, Surface, SurfaceError, TextAlign};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
        style: FillStyle,
        font: Font,
        align: TextAlign,
        shadow: Option<Shadow>,
        clip: Option<Rect>,
    },
    Save,
    Restore,
}

#[derive(Debug, Clone, Default)]
struct State {
    fill: FillStyle,
    font: Font,
    align: TextAlign,
    shadow: Option<Shadow>,
    clip: Option<Rect>,
}

/// Logs every paint call and can be told to fail text containing a string.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<Op>,
    pub fail_text: Option<String>,
    state: State,
    stack: Vec<State>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn texts(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::FillText { .. }))
            .collect()
    }

    pub fn texts_matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a Op> + 'a {
        self.ops
            .iter()
            .filter(move |op| matches!(op, Op::FillText { text, .. } if text == needle))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.state.fill = style;
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.state.shadow = shadow;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), SurfaceError> {
        self.ops.push(Op::FillRect { rect, color });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), SurfaceError> {
        self.ops.push(Op::FillText {
            text: text.to_string(),
            x,
            y,
            style: self.state.fill,
            font: self.state.font,
            align: self.state.align,
            shadow: self.state.shadow,
            clip: self.state.clip,
        });
        match &self.fail_text {
            Some(needle) if text.contains(needle.as_str()) => {
                Err(SurfaceError::Backend(format!("refused {text:?}")))
            }
            _ => Ok(()),
        }
    }

    fn measure_text(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.state.font.size * 0.6
    }

    fn save(&mut self) {
        self.ops.push(Op::Save);
        self.stack.push(self.state.clone());
    }

    fn clip(&mut self, rect: Rect) {
        self.state.clip = Some(match self.state.clip {
            Some(current) => current.intersect(&rect),
            None => rect,
        });
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }
}
