//! Rune-at-a-time reading over any [`std::io::Read`].
//!
//! [`RuneReader`] decodes UTF-8 from a buffered byte source, offers one rune
//! of lookahead and tracks the absolute [`Pos`] of the last rune read. It
//! only reports failures; publishing them as tokens is left to the
//! [`Lexer`](crate::Lexer).

use std::io::{self, BufReader, Read};

use crate::error::LexError;
use crate::span::Pos;

/// Longest UTF-8 encoding of a single `char`.
const MAX_RUNE_LEN: usize = 4;

/// Expected encoded length for a lead byte, `None` if the byte can never
/// start a sequence (continuation bytes, overlong leads, leads past U+10FFFF).
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

pub(crate) struct RuneReader<R: Read> {
    reader: BufReader<R>,
    /// Bytes pulled from `reader` but not consumed yet.
    buf: [u8; MAX_RUNE_LEN],
    /// How many valid bytes are in `buf` starting from index 0.
    filled: usize,
    /// Whether the underlying reader has returned 0 (EOF).
    reader_eof: bool,
    pos: Pos,
}

impl<R: Read> RuneReader<R> {
    pub(crate) fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            buf: [0u8; MAX_RUNE_LEN],
            filled: 0,
            reader_eof: false,
            pos: Pos::origin(),
        }
    }

    /// Position of the rune most recently read.
    pub(crate) fn pos(&self) -> Pos {
        self.pos
    }

    /// Top up `buf` until it holds `want` bytes or the reader is exhausted.
    fn fill(&mut self, want: usize) -> io::Result<()> {
        while !self.reader_eof && self.filled < want {
            let mut one = [0u8; 1];
            match self.reader.read(&mut one) {
                Ok(0) => self.reader_eof = true,
                Ok(_) => {
                    self.buf[self.filled] = one[0];
                    self.filled += 1;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Decode the leading rune without consuming it.
    ///
    /// Returns the rune and its encoded length.
    fn decode(&mut self) -> Result<(char, usize), LexError> {
        self.fill(1)?;
        if self.filled == 0 {
            return Err(LexError::Eof);
        }
        let len = sequence_len(self.buf[0]).ok_or(LexError::InvalidUtf8)?;
        self.fill(len)?;
        if self.filled < len {
            // Truncated by the end of the stream.
            return Err(LexError::InvalidUtf8);
        }
        let ch = std::str::from_utf8(&self.buf[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or(LexError::InvalidUtf8)?;
        Ok((ch, len))
    }

    fn consume(&mut self, n: usize) {
        self.buf.copy_within(n..self.filled, 0);
        self.filled -= n;
    }

    /// Consume and return the next rune, advancing the position.
    ///
    /// A malformed sequence consumes a single byte so the following read
    /// starts over at the next byte. End of stream and I/O errors consume
    /// nothing.
    pub(crate) fn read(&mut self) -> Result<char, LexError> {
        match self.decode() {
            Ok((ch, len)) => {
                self.consume(len);
                self.pos.advance(ch);
                Ok(ch)
            }
            Err(LexError::InvalidUtf8) => {
                self.consume(1);
                Err(LexError::InvalidUtf8)
            }
            Err(err) => Err(err),
        }
    }

    /// Return the next rune without consuming it.
    pub(crate) fn peek(&mut self) -> Result<char, LexError> {
        self.decode().map(|(ch, _)| ch)
    }
}
