/// A unit of input text as seen by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Bytes between two delimiters. Empty when delimiters are adjacent.
    Word(&'a [u8]),
    /// An explicit line break in the input
    Newline,
}

/// Splits text into words on spaces and newlines.
///
/// The bytes after the last delimiter form a final word; a delimiter at the
/// very end of the input does not produce an empty one.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a [u8],
    newline_pending: bool,
}

impl<'a> Words<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Self {
            rest: text,
            newline_pending: false,
        }
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.newline_pending {
            self.newline_pending = false;
            return Some(Token::Newline);
        }

        if self.rest.is_empty() {
            return None;
        }

        match self.rest.iter().position(|&b| b == b' ' || b == b'\n') {
            Some(idx) => {
                let word = &self.rest[..idx];
                self.newline_pending = self.rest[idx] == b'\n';
                self.rest = &self.rest[idx + 1..];
                Some(Token::Word(word))
            }
            None => {
                let word = self.rest;
                self.rest = &[];
                Some(Token::Word(word))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token<'_>> {
        Words::new(text.as_bytes()).collect()
    }

    #[test]
    fn trailing_word_without_delimiter() {
        assert_eq!(
            tokens("hello big\nworld"),
            vec![
                Token::Word(b"hello"),
                Token::Word(b"big"),
                Token::Newline,
                Token::Word(b"world"),
            ]
        );
    }

    #[test]
    fn adjacent_delimiters() {
        assert_eq!(
            tokens(" a  b\n\n"),
            vec![
                Token::Word(b""),
                Token::Word(b"a"),
                Token::Word(b""),
                Token::Word(b"b"),
                Token::Newline,
                Token::Word(b""),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn trailing_space_adds_nothing() {
        assert_eq!(tokens("a "), vec![Token::Word(b"a")]);
        assert!(tokens("").is_empty());
    }
}
