//! `penwriter-font` loads single-stroke plotter fonts and scales them to a
//! requested character height.
//!
//! Font resources are plain text. Each character starts with a header line
//! `999 <code> <stroke count>`, followed by one `<x> <y> <pen>` line per
//! stroke, where `pen` is `1` for a pen-down move:
//!
//! ```text
//! 999 65 3
//! 0 0 0
//! 6 18 1
//! 12 0 1
//! ```
//!
//! A font bundled with this crate covers printable ASCII and is available
//! through [FontTable::builtin].

mod scale;
mod store;

pub use penwriter_core::{Glyph, GlyphSource, NOMINAL_DESIGN_HEIGHT, Stroke};
pub use scale::{ScaleError, ScaleFactor, ScaledFont, scale};
pub use store::{FontError, FontTable, MalformedReason, NUM_GLYPHS};
