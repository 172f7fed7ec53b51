#![no_std]

//! `penwriter-core` provides core primitives for the `penwriter` crates.

use alloc::vec::Vec;
use core::fmt;

extern crate alloc;

/// Height, in raw font units, at which stroke font coordinates are defined.
pub const NOMINAL_DESIGN_HEIGHT: f64 = 18.0;

/// First and last character codes that carry printable geometry.
pub const PRINTABLE: core::ops::RangeInclusive<u8> = 32..=126;

/// A single pen movement within a glyph, relative to the character origin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Stroke {
    /// X offset from the character origin
    pub x: i32,
    /// Y offset from the character origin
    pub y: i32,
    /// Should a line be drawn (i.e., "pen down") when moving to this point?
    pub pen: bool,
}

/// A single glyph (character) contained within a font.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glyph {
    /// Series of strokes which make up this glyph, in drawing order
    pub strokes: Vec<Stroke>,
}

impl Glyph {
    /// Create a glyph from strokes in drawing order.
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }
}

/// Lookup of glyphs by character code.
///
/// Implementors return `None` for codes they hold no geometry for; callers
/// treat that as a zero-stroke glyph rather than an error.
pub trait GlyphSource {
    /// The glyph for `code`, if this source defines one.
    fn glyph(&self, code: u8) -> Option<&Glyph>;
}

/// One step of plotter motion, in absolute machine units.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MotionInstruction {
    /// Travel to a point with the pen raised
    MoveTo { x: i32, y: i32 },
    /// Draw a line to a point with the pen lowered
    DrawTo { x: i32, y: i32 },
    /// Raise or lower the pen
    SetPen { down: bool },
}

/// Spindle value which lowers the pen.
pub const PEN_DOWN_POWER: u32 = 1000;

impl fmt::Display for MotionInstruction {
    /// Formats the instruction as a single command line, without the
    /// trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MoveTo { x, y } => write!(f, "G0 X{x} Y{y}"),
            Self::DrawTo { x, y } => write!(f, "G1 X{x} Y{y}"),
            Self::SetPen { down: true } => write!(f, "S{PEN_DOWN_POWER}"),
            Self::SetPen { down: false } => f.write_str("S0"),
        }
    }
}
