//! Token cursor over line-oriented text input.
//!
//! # Responsibility
//! - Read single-character discriminants, whitespace tokens, integers and
//!   delimiter-terminated text fields.
//! - Let callers discard the remainder of a malformed line.
//!
//! # Invariants
//! - Only `read_char` and `seek_unit` cross line breaks; every operand read
//!   stays on the current line.
//! - A failed read never consumes a line terminator, so `skip_line` after an
//!   error always discards exactly the offending line.
//! - Line numbers are 1-based and count consumed `\n` characters.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CursorResult<T> = Result<T, CursorError>;

/// Malformed or truncated input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Input ended while `expected` was still required.
    UnexpectedEnd { line: usize, expected: &'static str },
    /// A numeric field did not contain an integer.
    InvalidNumber { line: usize, found: String },
    /// A text field ran to the end of its line without its terminator.
    MissingDelimiter { line: usize, delimiter: char },
}

impl Display for CursorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEnd { line, expected } => {
                write!(f, "line {line}: input ended, expected {expected}")
            }
            Self::InvalidNumber { line, found } => {
                write!(f, "line {line}: expected an integer, found `{found}`")
            }
            Self::MissingDelimiter { line, delimiter } => {
                write!(f, "line {line}: text field is missing terminator `{delimiter}`")
            }
        }
    }
}

impl Error for CursorError {}

/// Forward-only reader over borrowed input text.
#[derive(Debug, Clone)]
pub struct InputCursor<'a> {
    source: &'a str,
    position: usize,
    line: usize,
}

impl<'a> InputCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
        }
    }

    /// Current 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns whether only whitespace remains.
    pub fn is_at_end(&self) -> bool {
        self.remaining().trim_start().is_empty()
    }

    /// Skips whitespace, line breaks included, up to the start of the next
    /// unit; returns whether one remains.
    pub fn seek_unit(&mut self) -> bool {
        self.skip_whitespace();
        !self.is_at_end()
    }

    /// Reads the first character of the next unit, crossing line breaks.
    pub fn read_char(&mut self) -> Option<char> {
        self.skip_whitespace();
        let value = self.remaining().chars().next()?;
        self.advance(value.len_utf8());
        Some(value)
    }

    /// Reads one non-blank character on the current line.
    pub fn expect_char(&mut self, expected: &'static str) -> CursorResult<char> {
        self.skip_blanks();
        if self.at_line_end() {
            return Err(self.unexpected_end(expected));
        }
        let value = self
            .remaining()
            .chars()
            .next()
            .ok_or(self.unexpected_end(expected))?;
        self.advance(value.len_utf8());
        Ok(value)
    }

    /// Reads one whitespace-delimited token on the current line, naming
    /// `expected` when the line has none left.
    pub fn expect_token(&mut self, expected: &'static str) -> CursorResult<&'a str> {
        self.read_token().ok_or(self.unexpected_end(expected))
    }

    /// Reads one whitespace-delimited token on the current line.
    pub fn read_token(&mut self) -> Option<&'a str> {
        self.skip_blanks();
        let rest = self.remaining();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        self.advance(end);
        Some(&rest[..end])
    }

    /// Reads a signed integer on the current line, stopping at the first
    /// non-digit.
    pub fn read_i32(&mut self) -> CursorResult<i32> {
        self.skip_blanks();
        if self.at_line_end() {
            return Err(self.unexpected_end("integer"));
        }

        let rest = self.remaining();
        let end = rest
            .char_indices()
            .find(|(index, value)| {
                !(value.is_ascii_digit() || (*index == 0 && (*value == '-' || *value == '+')))
            })
            .map(|(index, _)| index)
            .unwrap_or(rest.len());
        let digits = &rest[..end];
        let parsed = digits.parse::<i32>().map_err(|_| CursorError::InvalidNumber {
            line: self.line,
            found: offending_token(rest).to_string(),
        })?;

        self.advance(end);
        Ok(parsed)
    }

    /// Reads a text field terminated by `delimiter` on the current line.
    ///
    /// Leading blanks are skipped and the value is trimmed; the delimiter is
    /// consumed.
    pub fn read_field(&mut self, delimiter: char) -> CursorResult<String> {
        self.skip_blanks();
        let rest = self.remaining();
        if rest.is_empty() {
            return Err(CursorError::UnexpectedEnd {
                line: self.line,
                expected: "text field",
            });
        }

        let line_end = rest.find('\n').unwrap_or(rest.len());
        let Some(end) = rest[..line_end].find(delimiter) else {
            return Err(CursorError::MissingDelimiter {
                line: self.line,
                delimiter,
            });
        };

        let value = rest[..end].trim().to_string();
        self.advance(end + delimiter.len_utf8());
        Ok(value)
    }

    /// Consumes and returns the rest of the current line, terminator excluded.
    pub fn read_line(&mut self) -> &'a str {
        let rest = self.remaining();
        let (line, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.advance(consumed);
        line.trim_end_matches('\r')
    }

    /// Discards the rest of the current line.
    pub fn skip_line(&mut self) {
        let _ = self.read_line();
    }

    fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        let skipped = rest.len() - rest.trim_start().len();
        self.advance(skipped);
    }

    fn skip_blanks(&mut self) {
        let rest = self.remaining();
        let skipped = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        self.advance(skipped);
    }

    fn at_line_end(&self) -> bool {
        let rest = self.remaining();
        rest.is_empty() || rest.starts_with(['\n', '\r'])
    }

    fn unexpected_end(&self, expected: &'static str) -> CursorError {
        CursorError::UnexpectedEnd {
            line: self.line,
            expected,
        }
    }

    fn advance(&mut self, bytes: usize) {
        let consumed = &self.source[self.position..self.position + bytes];
        self.line += consumed.matches('\n').count();
        self.position += bytes;
    }
}

fn offending_token(rest: &str) -> &str {
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::{CursorError, InputCursor};

    #[test]
    fn reads_discriminant_number_and_fields() {
        let mut cursor = InputCursor::new("F Pratchett, Guards! Guards!, 1989\n");
        assert_eq!(cursor.read_char(), Some('F'));
        assert_eq!(cursor.read_field(',').expect("author"), "Pratchett");
        assert_eq!(cursor.read_field(',').expect("title"), "Guards! Guards!");
        assert_eq!(cursor.read_i32().expect("year"), 1989);
        assert!(!cursor.seek_unit());
        assert_eq!(cursor.read_char(), None);
    }

    #[test]
    fn read_field_does_not_cross_line_boundary() {
        let mut cursor = InputCursor::new("no terminator here\nnext, line");
        let err = cursor.read_field(',').expect_err("field must end on its line");
        assert_eq!(
            err,
            CursorError::MissingDelimiter {
                line: 1,
                delimiter: ','
            }
        );

        cursor.skip_line();
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.read_field(',').expect("next field"), "next");
    }

    #[test]
    fn read_i32_rejects_words_and_reports_line() {
        let mut cursor = InputCursor::new("\n\n  abc 12");
        assert!(cursor.seek_unit());
        let err = cursor.read_i32().expect_err("word is not a number");
        assert_eq!(
            err,
            CursorError::InvalidNumber {
                line: 3,
                found: "abc".to_string()
            }
        );
    }

    #[test]
    fn read_i32_stops_at_non_digit() {
        let mut cursor = InputCursor::new("-42,rest");
        assert_eq!(cursor.read_i32().expect("negative number"), -42);
        assert_eq!(cursor.read_line(), ",rest");
    }

    #[test]
    fn read_line_strips_carriage_return() {
        let mut cursor = InputCursor::new("H 1000\r\nD\r\n");
        assert_eq!(cursor.read_char(), Some('H'));
        assert_eq!(cursor.read_line(), " 1000");
        assert_eq!(cursor.read_char(), Some('D'));
        cursor.skip_line();
        assert!(!cursor.seek_unit());
    }

    #[test]
    fn tokens_are_whitespace_delimited() {
        let mut cursor = InputCursor::new("1000 Mouse Mickey\n");
        assert_eq!(cursor.read_i32().expect("key"), 1000);
        assert_eq!(cursor.read_token(), Some("Mouse"));
        assert_eq!(cursor.read_token(), Some("Mickey"));
        assert_eq!(cursor.read_token(), None);
    }

    #[test]
    fn operand_reads_stop_at_line_end() {
        let mut cursor = InputCursor::new("H\nC 1000 F H\n");
        assert_eq!(cursor.read_char(), Some('H'));
        assert_eq!(
            cursor.read_i32(),
            Err(CursorError::UnexpectedEnd {
                line: 1,
                expected: "integer"
            })
        );
        assert_eq!(cursor.read_token(), None);
        assert!(cursor.expect_char("item type").is_err());

        cursor.skip_line();
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.read_char(), Some('C'));
        assert_eq!(cursor.read_i32(), Ok(1000));
        assert_eq!(cursor.expect_char("item type"), Ok('F'));
        assert_eq!(cursor.expect_char("item format"), Ok('H'));
        assert!(cursor.expect_char("more").is_err());
    }

    #[test]
    fn crlf_line_end_counts_as_end_of_operands() {
        let mut cursor = InputCursor::new("1000 Mouse\r\n1001 Duck Donald\r\n");
        assert_eq!(cursor.read_i32(), Ok(1000));
        assert_eq!(cursor.expect_token("first name"), Ok("Mouse"));
        assert!(cursor.expect_token("last name").is_err());
        cursor.skip_line();
        assert!(cursor.seek_unit());
        assert_eq!(cursor.read_i32(), Ok(1001));
    }
}
