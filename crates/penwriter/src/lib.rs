//! `penwriter` turns plain text into G-code for a pen-plotter writing robot,
//! drawing each character with a single-stroke vector font.
//!
//! The pipeline is font loading ([FontTable]), scaling to a character height
//! ([scale]), word-wrapped layout ([render]), and delivery of the resulting
//! commands ([Session]):
//!
//! ```
//! use penwriter::{FontTable, Session, WriterSink, render_text, scale};
//!
//! let font = scale(&FontTable::builtin()?, 6.0)?;
//! let mut session = Session::new(WriterSink::new(Vec::new()));
//! session.draw(render_text("Hello World!", &font))?;
//!
//! let gcode = String::from_utf8(session.into_sink().into_inner())?;
//! assert!(gcode.starts_with("G1 X0 Y0 F1000\nM3\nS0\n"));
//! assert!(gcode.ends_with("G0 X0 Y0\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod input;
mod session;

pub use input::read_bounded;
pub use penwriter_core::{Glyph, GlyphSource, MotionInstruction, NOMINAL_DESIGN_HEIGHT, Stroke};
pub use penwriter_font::{FontError, FontTable, MalformedReason, ScaleError, ScaledFont, scale};
pub use penwriter_layout::{Layout, LayoutError, LayoutParams, render};
pub use session::{BOOTSTRAP_COMMANDS, CommandSink, Session, SessionError, WriterSink};

/// Lay out text on the default page at the font's own height.
pub fn render_text<'a, T>(text: &'a T, font: &'a ScaledFont) -> Layout<'a, ScaledFont>
where
    T: AsRef<[u8]> + ?Sized,
{
    render(text, font, LayoutParams::new(font.height()))
}
