use log::debug;
use penwriter_core::{Glyph, GlyphSource, NOMINAL_DESIGN_HEIGHT, Stroke};
use thiserror::Error;

use crate::store::{FontTable, NUM_GLYPHS};

/// Failure to derive a [ScaledFont].
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ScaleError {
    /// The height was zero, negative, or not finite.
    #[error("character height must be a positive number, got {0}")]
    InvalidHeight(f64),
}

/// Ratio between a requested character height and the font's design height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    height: f64,
}

impl ScaleFactor {
    /// Factor for `height`, which must be finite and positive.
    pub fn new(height: f64) -> Result<Self, ScaleError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(ScaleError::InvalidHeight(height));
        }
        Ok(Self { height })
    }

    /// The character height this factor scales to.
    pub fn height(self) -> f64 {
        self.height
    }

    /// Multiplier applied to raw font coordinates.
    pub fn ratio(self) -> f64 {
        self.height / NOMINAL_DESIGN_HEIGHT
    }

    /// Scale a raw font coordinate, truncating toward zero.
    ///
    /// The product is taken before dividing so whole multiples of the design
    /// height come out exact.
    pub fn apply(self, raw: i32) -> i32 {
        (f64::from(raw) * self.height / NOMINAL_DESIGN_HEIGHT).trunc() as i32
    }
}

/// A working copy of a [FontTable] resized to one character height.
///
/// A `ScaledFont` cannot be rescaled; every height is derived from the
/// unscaled table.
#[derive(Debug, Clone)]
pub struct ScaledFont {
    factor: ScaleFactor,
    glyphs: [Option<Glyph>; NUM_GLYPHS],
}

/// Derive the geometry for `height` from an unscaled font table.
pub fn scale(table: &FontTable, height: f64) -> Result<ScaledFont, ScaleError> {
    let factor = ScaleFactor::new(height)?;
    let mut glyphs: [Option<Glyph>; NUM_GLYPHS] = std::array::from_fn(|_| None);

    for (code, glyph) in table.iter() {
        glyphs[code as usize] = Some(Glyph::new(
            glyph
                .strokes
                .iter()
                .map(|stroke| Stroke {
                    x: factor.apply(stroke.x),
                    y: factor.apply(stroke.y),
                    pen: stroke.pen,
                })
                .collect(),
        ));
    }

    debug!("Scaled font to height {height} (factor {:.4})", factor.ratio());
    Ok(ScaledFont { factor, glyphs })
}

impl ScaledFont {
    /// The character height this font was scaled to.
    pub fn height(&self) -> f64 {
        self.factor.height()
    }

    /// The factor applied to every stroke.
    pub fn factor(&self) -> ScaleFactor {
        self.factor
    }
}

impl GlyphSource for ScaledFont {
    fn glyph(&self, code: u8) -> Option<&Glyph> {
        self.glyphs[code as usize].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FontTable {
        FontTable::parse("999 65 4\n0 0 0\n6 18 1\n12 0 1\n-7 -5 0\n999 7 1\n9 9 1\n")
            .expect("valid font")
    }

    fn coords(font: &ScaledFont, code: u8) -> Vec<(i32, i32, bool)> {
        font.glyph(code)
            .expect("glyph defined")
            .strokes
            .iter()
            .map(|s| (s.x, s.y, s.pen))
            .collect()
    }

    #[test]
    fn truncates_toward_zero() {
        let font = scale(&sample(), 10.0).expect("positive height");
        assert_eq!(
            coords(&font, b'A'),
            vec![(0, 0, false), (3, 10, true), (6, 0, true), (-3, -2, false)]
        );
    }

    #[test]
    fn nominal_height_is_identity() {
        let table = sample();
        let font = scale(&table, NOMINAL_DESIGN_HEIGHT).expect("positive height");
        assert_eq!(font.glyph(b'A'), table.glyph(b'A'));
    }

    #[test]
    fn scaling_never_compounds() {
        let table = sample();
        let first = scale(&table, 6.0).expect("positive height");
        let _other = scale(&table, 4.0).expect("positive height");
        let again = scale(&table, 6.0).expect("positive height");
        assert_eq!(coords(&first, b'A'), coords(&again, b'A'));
        assert_eq!(table.glyph(b'A').map(|g| g.strokes[1].y), Some(18));
    }

    #[test]
    fn keeps_non_printable_records() {
        let font = scale(&sample(), 9.0).expect("positive height");
        assert_eq!(coords(&font, 7), vec![(4, 4, true)]);
        assert!(font.glyph(b'B').is_none());
    }

    #[test]
    fn accepts_heights_outside_cli_range() {
        let font = scale(&sample(), 36.0).expect("positive height");
        assert_eq!(coords(&font, b'A')[1], (12, 36, true));
        assert!(scale(&sample(), 0.5).is_ok());
    }

    #[test]
    fn rejects_non_positive_height() {
        assert_eq!(
            scale(&sample(), 0.0).unwrap_err(),
            ScaleError::InvalidHeight(0.0)
        );
        assert!(scale(&sample(), -4.0).is_err());
        assert!(scale(&sample(), f64::NAN).is_err());
    }
}
