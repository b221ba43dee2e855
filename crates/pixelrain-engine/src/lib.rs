//! Animation engine for the pixelrain effect.
//!
//! A grid of [`Symbol`]s falls down a [`Surface`](pixelrain_core::Surface);
//! symbols passing behind the overlay text register events in an
//! [`IlluminationTracker`], and the [`TextOverlay`] lights each column of the
//! text in proportion to that recent activity. [`AnimationLoop`] drives it
//! all from display refresh ticks, and [`CellCanvas`] provides a terminal
//! backed surface.

mod animation;
mod canvas;
mod clock;
mod color;
mod effect;
mod overlay;
mod symbol;
mod tracker;

#[cfg(test)]
mod testing;

pub use animation::AnimationLoop;
pub use canvas::{Cell, CellCanvas};
pub use clock::{FrameClock, FrameState};
pub use color::{is_visible, rgb_to_color};
pub use effect::{Effect, column_count};
pub use overlay::{ColumnGlow, OverlayStyle, TextOverlay};
pub use symbol::{StepContext, Symbol};
pub use tracker::IlluminationTracker;
