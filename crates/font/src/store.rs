use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use penwriter_core::{Glyph, GlyphSource, Stroke};
use thiserror::Error;

/// Number of character codes addressable by a [FontTable].
pub const NUM_GLYPHS: usize = 256;

/// Marker value that opens a character record.
const RECORD_MARKER: i32 = 999;

static BUILTIN_FONT: &str = include_str!("../data/SingleStrokeFont.txt");

/// Failure to produce a [FontTable].
#[derive(Error, Debug)]
pub enum FontError {
    /// The font file could not be opened.
    #[error("cannot open font {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading the font resource failed part way through.
    #[error("cannot read font data: {0}")]
    Read(#[from] io::Error),
    /// A record in the font resource is structurally invalid.
    #[error("malformed font data at line {line}: {reason}")]
    Malformed { line: usize, reason: MalformedReason },
}

impl FontError {
    /// True when the resource itself could not be opened or read.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Read(_))
    }
}

/// Why a line of font data was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("stroke line appears before any character header")]
    StrokeBeforeHeader,
    #[error("expected 3 integer fields, found {0}")]
    FieldCount(usize),
    #[error("`{0}` is not an integer")]
    NotAnInteger(String),
    #[error("character code {0} is outside 0-255")]
    CodeOutOfRange(i32),
    #[error("stroke count {0} is negative")]
    NegativeCount(i32),
    #[error("pen state {0} is not 0 or 1")]
    PenState(i32),
    #[error("character {code} declares {expected} strokes but has {found}")]
    StrokeCountMismatch {
        code: u8,
        expected: usize,
        found: usize,
    },
}

/// Stroke data for every character of a font, keyed by character code.
///
/// Immutable once loaded. Codes outside the printable range are kept if the
/// resource defines them.
#[derive(Debug, Clone)]
pub struct FontTable {
    glyphs: [Option<Glyph>; NUM_GLYPHS],
}

/// A character record whose strokes are still being read.
struct OpenRecord {
    code: u8,
    expected: usize,
    header_line: usize,
    strokes: Vec<Stroke>,
}

impl OpenRecord {
    fn close(self) -> Result<(u8, Glyph), FontError> {
        if self.strokes.len() != self.expected {
            return Err(FontError::Malformed {
                line: self.header_line,
                reason: MalformedReason::StrokeCountMismatch {
                    code: self.code,
                    expected: self.expected,
                    found: self.strokes.len(),
                },
            });
        }
        Ok((self.code, Glyph::new(self.strokes)))
    }
}

fn parse_fields(line: &str, line_no: usize) -> Result<[i32; 3], FontError> {
    let malformed = |reason| FontError::Malformed {
        line: line_no,
        reason,
    };

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(malformed(MalformedReason::FieldCount(parts.len())));
    }

    let mut fields = [0; 3];
    for (field, part) in fields.iter_mut().zip(&parts) {
        *field = part
            .parse()
            .map_err(|_| malformed(MalformedReason::NotAnInteger(part.to_string())))?;
    }
    Ok(fields)
}

impl FontTable {
    /// A table with no glyphs at all.
    pub fn empty() -> Self {
        Self {
            glyphs: std::array::from_fn(|_| None),
        }
    }

    /// Load a font file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FontError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} glyphs from {}",
            table.glyph_count(),
            path.display()
        );
        Ok(table)
    }

    /// The font bundled with this crate, drawn on an 18 unit em.
    pub fn builtin() -> Result<Self, FontError> {
        Self::parse(BUILTIN_FONT)
    }

    /// Parse font data held in memory.
    pub fn parse(data: &str) -> Result<Self, FontError> {
        Self::from_reader(data.as_bytes())
    }

    /// Parse font data from any buffered reader.
    ///
    /// Each record is committed only once the following header (or the end of
    /// the stream) closes it, so its stroke count is checked at that point.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, FontError> {
        let mut table = Self::empty();
        let mut open: Option<OpenRecord> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            if line.trim().is_empty() {
                continue;
            }

            let [a, b, c] = parse_fields(&line, line_no)?;
            let malformed = |reason| FontError::Malformed {
                line: line_no,
                reason,
            };

            if a == RECORD_MARKER {
                if let Some(record) = open.take() {
                    table.commit(record.close()?);
                }

                let code =
                    u8::try_from(b).map_err(|_| malformed(MalformedReason::CodeOutOfRange(b)))?;
                let expected =
                    usize::try_from(c).map_err(|_| malformed(MalformedReason::NegativeCount(c)))?;

                open = Some(OpenRecord {
                    code,
                    expected,
                    header_line: line_no,
                    strokes: Vec::with_capacity(expected),
                });
            } else {
                let record = open
                    .as_mut()
                    .ok_or_else(|| malformed(MalformedReason::StrokeBeforeHeader))?;

                let pen = match c {
                    0 => false,
                    1 => true,
                    other => return Err(malformed(MalformedReason::PenState(other))),
                };

                record.strokes.push(Stroke { x: a, y: b, pen });
            }
        }

        if let Some(record) = open.take() {
            table.commit(record.close()?);
        }

        debug!("Parsed font with {} glyphs", table.glyph_count());
        Ok(table)
    }

    fn commit(&mut self, (code, glyph): (u8, Glyph)) {
        let slot = &mut self.glyphs[code as usize];
        if slot.is_some() {
            warn!("Font defines character {code} more than once; keeping the last record");
        }
        *slot = Some(glyph);
    }

    /// Number of character codes with a record in this table.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.iter().filter(|g| g.is_some()).count()
    }

    /// Iterate over every defined glyph with its character code.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Glyph)> + '_ {
        self.glyphs
            .iter()
            .enumerate()
            .filter_map(|(code, glyph)| glyph.as_ref().map(|g| (code as u8, g)))
    }
}

impl Default for FontTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl GlyphSource for FontTable {
    fn glyph(&self, code: u8) -> Option<&Glyph> {
        self.glyphs[code as usize].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: FontError) -> (usize, MalformedReason) {
        match err {
            FontError::Malformed { line, reason } => (line, reason),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn parses_records_in_order() {
        let table = FontTable::parse("999 65 3\n0 0 0\n6 18 1\n12 0 1\n999 66 1\n18 0 0\n")
            .expect("valid font");

        assert_eq!(table.glyph_count(), 2);
        let a = table.glyph(b'A').expect("A defined");
        assert_eq!(
            a.strokes,
            vec![
                Stroke { x: 0, y: 0, pen: false },
                Stroke { x: 6, y: 18, pen: true },
                Stroke { x: 12, y: 0, pen: true },
            ]
        );
        assert_eq!(table.glyph(b'B').map(|g| g.strokes.len()), Some(1));
        assert!(table.glyph(b'C').is_none());
    }

    #[test]
    fn last_record_is_closed_at_end_of_stream() {
        let err = FontTable::parse("999 65 1\n0 0 0\n999 66 2\n1 1 1\n").unwrap_err();
        assert_eq!(
            reason(err),
            (
                3,
                MalformedReason::StrokeCountMismatch {
                    code: 66,
                    expected: 2,
                    found: 1
                }
            )
        );
    }

    #[test]
    fn count_checked_when_next_header_arrives() {
        let err = FontTable::parse("999 65 2\n0 0 0\n999 66 0\n").unwrap_err();
        assert!(matches!(
            reason(err),
            (1, MalformedReason::StrokeCountMismatch { code: 65, .. })
        ));
    }

    #[test]
    fn stroke_before_header() {
        let err = FontTable::parse("\n0 0 1\n").unwrap_err();
        assert_eq!(reason(err), (2, MalformedReason::StrokeBeforeHeader));
    }

    #[test]
    fn rejects_bad_fields() {
        let err = FontTable::parse("999 300 0\n").unwrap_err();
        assert_eq!(reason(err).1, MalformedReason::CodeOutOfRange(300));

        let err = FontTable::parse("999 65 -1\n").unwrap_err();
        assert_eq!(reason(err).1, MalformedReason::NegativeCount(-1));

        let err = FontTable::parse("999 65 1\n0 0 2\n").unwrap_err();
        assert_eq!(reason(err), (2, MalformedReason::PenState(2)));

        let err = FontTable::parse("999 65 1\n0 0\n").unwrap_err();
        assert_eq!(reason(err).1, MalformedReason::FieldCount(2));

        let err = FontTable::parse("999 six 1\n").unwrap_err();
        assert_eq!(reason(err).1, MalformedReason::NotAnInteger("six".into()));
    }

    #[test]
    fn non_printable_codes_are_stored() {
        let table = FontTable::parse("999 7 1\n1 1 1\n999 200 0\n").expect("valid font");
        assert!(table.glyph(7).is_some());
        assert_eq!(table.glyph(200).map(|g| g.strokes.len()), Some(0));
    }

    #[test]
    fn duplicate_record_replaces_earlier_one() {
        let table = FontTable::parse("999 65 1\n0 0 0\n999 65 1\n5 5 1\n").expect("valid font");
        assert_eq!(
            table.glyph(b'A').map(|g| g.strokes[0]),
            Some(Stroke { x: 5, y: 5, pen: true })
        );
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = FontTable::load("/definitely/not/a/font.txt").unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn builtin_covers_printable_ascii() {
        let table = FontTable::builtin().expect("bundled font parses");
        for code in penwriter_core::PRINTABLE {
            assert!(table.glyph(code).is_some(), "missing glyph {code}");
        }
    }
}
