//! `penwriter-layout` turns text into a stream of pen-plotter motion.
//!
//! Words are wrapped to a maximum line width, line breaks move down by the
//! lowest point drawn on the previous line plus a fixed gap, and a run that
//! would leave the drawable area stops with
//! [LayoutError::VerticalLimitExceeded].
//!
//! Any [GlyphSource] can supply the geometry, usually a
//! `penwriter_font::ScaledFont` built for the same height as the
//! [LayoutParams].

mod engine;
mod params;
mod words;

pub use engine::{Layout, LayoutError, render};
pub use params::LayoutParams;
pub use penwriter_core::{GlyphSource, MotionInstruction};
pub use words::{Token, Words};
