//! Byte cursor shared by the scanners.

use crate::error::ParseError;

pub(crate) struct Cursor<'s> {
    pub source: &'s str,
    bytes: &'s [u8],
    pub pos: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source, bytes: source.as_bytes(), pos: 0 }
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    pub fn starts_with(&self, needle: &str) -> bool {
        self.bytes.get(self.pos..).is_some_and(|rest| rest.starts_with(needle.as_bytes()))
    }

    pub fn starts_with_ignore_case(&self, needle: &str) -> bool {
        self.bytes
            .get(self.pos..self.pos + needle.len())
            .is_some_and(|rest| rest.eq_ignore_ascii_case(needle.as_bytes()))
    }

    /// Consume `needle` if it is next.
    pub fn eat(&mut self, needle: &str) -> bool {
        if self.starts_with(needle) {
            self.pos += needle.len();
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Advance until `needle` has been consumed. Returns `false` at end of input.
    pub fn skip_past(&mut self, needle: &str) -> bool {
        match self.source.get(self.pos..).and_then(|rest| rest.find(needle)) {
            Some(found) => {
                self.pos += found + needle.len();
                true
            }
            None => {
                self.pos = self.bytes.len();
                false
            }
        }
    }

    /// Consume bytes while `pred` holds and return the consumed text.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'s str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.source.get(start..self.pos).unwrap_or_default()
    }

    pub fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError::at(self.source, offset, message)
    }
}

/// First byte of a JS identifier or a multi-byte character.
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

pub(crate) fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}
