use std::collections::VecDeque;

use log::{debug, warn};
use penwriter_core::{GlyphSource, MotionInstruction, PRINTABLE};
use thiserror::Error;

use crate::params::LayoutParams;
use crate::words::{Token, Words};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The height was zero, negative, or not finite.
    #[error("character height must be a positive number, got {0}")]
    InvalidHeight(f64),
    #[error("line break to baseline {baseline} would pass the lowest allowed baseline {limit}")]
    /// A line break would leave the drawable area.
    VerticalLimitExceeded { baseline: i32, limit: i32 },
}

/// Mutable position of the pen during one render.
#[derive(Debug, Clone, Copy)]
struct LayoutState {
    pen_x: i32,
    baseline_y: i32,
    lowest_y: i32,
    pen_down: bool,
}

#[derive(Debug)]
enum Phase {
    Running,
    Failed(LayoutError),
    Done,
}

/// Lazily lays out text into motion instructions.
///
/// Work happens one word at a time as the iterator is advanced. A
/// [LayoutError] is yielded once, after every instruction produced before it,
/// and ends the sequence without the return-to-origin moves.
pub struct Layout<'a, G: ?Sized> {
    font: &'a G,
    params: LayoutParams,
    words: Words<'a>,
    state: LayoutState,
    pending: VecDeque<MotionInstruction>,
    phase: Phase,
}

/// Lay out `text` with `font`, streaming the resulting motion.
pub fn render<'a, T, G>(text: &'a T, font: &'a G, params: LayoutParams) -> Layout<'a, G>
where
    T: AsRef<[u8]> + ?Sized,
    G: GlyphSource + ?Sized,
{
    let phase = if params.height.is_finite() && params.height > 0.0 {
        Phase::Running
    } else {
        Phase::Failed(LayoutError::InvalidHeight(params.height))
    };

    Layout {
        font,
        params,
        words: Words::new(text.as_ref()),
        state: LayoutState {
            pen_x: 0,
            baseline_y: params.top_margin_y,
            lowest_y: params.top_margin_y,
            pen_down: false,
        },
        pending: VecDeque::new(),
        phase,
    }
}

impl<G: GlyphSource + ?Sized> Layout<'_, G> {
    fn set_pen(&mut self, down: bool) {
        if self.state.pen_down != down {
            self.pending.push_back(MotionInstruction::SetPen { down });
            self.state.pen_down = down;
        }
    }

    fn line_break(&mut self) -> Result<(), LayoutError> {
        let baseline = self.state.lowest_y.saturating_sub(self.params.line_gap());
        if baseline < self.params.min_allowed_y {
            warn!(
                "Text does not fit: next baseline {baseline} is below {}",
                self.params.min_allowed_y
            );
            return Err(LayoutError::VerticalLimitExceeded {
                baseline,
                limit: self.params.min_allowed_y,
            });
        }

        debug!("Line break to baseline {baseline}");
        self.state.pen_x = 0;
        self.state.baseline_y = baseline;
        self.state.lowest_y = baseline;
        self.pending
            .push_back(MotionInstruction::MoveTo { x: 0, y: baseline });
        Ok(())
    }

    fn emit_char(&mut self, code: u8) {
        if !PRINTABLE.contains(&code) {
            return;
        }

        let font = self.font;
        if let Some(glyph) = font.glyph(code) {
            for stroke in &glyph.strokes {
                let x = stroke.x.saturating_add(self.state.pen_x);
                let y = stroke.y.saturating_add(self.state.baseline_y);
                self.state.lowest_y = self.state.lowest_y.min(y);
                self.set_pen(stroke.pen);
                self.pending.push_back(if stroke.pen {
                    MotionInstruction::DrawTo { x, y }
                } else {
                    MotionInstruction::MoveTo { x, y }
                });
            }
        }

        self.state.pen_x = self.state.pen_x.saturating_add(self.params.char_width());
    }

    fn emit_word(&mut self, word: &[u8]) -> Result<(), LayoutError> {
        if !word.is_empty() {
            let width = i32::try_from(word.len())
                .unwrap_or(i32::MAX)
                .saturating_mul(self.params.char_width());
            if self.state.pen_x.saturating_add(width) > self.params.max_line_width {
                self.line_break()?;
            }
            for &code in word {
                self.emit_char(code);
            }
        }

        self.state.pen_x = self.state.pen_x.saturating_add(self.params.word_gap());
        Ok(())
    }

    fn finish(&mut self) {
        self.set_pen(false);
        self.pending
            .push_back(MotionInstruction::MoveTo { x: 0, y: 0 });
    }

    fn advance(&mut self) -> Result<(), LayoutError> {
        match self.words.next() {
            Some(Token::Word(word)) => self.emit_word(word),
            Some(Token::Newline) => self.line_break(),
            None => {
                self.finish();
                self.phase = Phase::Done;
                Ok(())
            }
        }
    }
}

impl<G: GlyphSource + ?Sized> Iterator for Layout<'_, G> {
    type Item = Result<MotionInstruction, LayoutError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(instruction) = self.pending.pop_front() {
                return Some(Ok(instruction));
            }

            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Done => return None,
                Phase::Failed(err) => return Some(Err(err)),
                Phase::Running => {
                    self.phase = Phase::Running;
                    if let Err(err) = self.advance() {
                        self.phase = Phase::Failed(err);
                    }
                }
            }
        }
    }
}

impl<G: GlyphSource + ?Sized> std::iter::FusedIterator for Layout<'_, G> {}
