//! State-function driven lexer engine.
//!
//! A grammar is a set of *state functions*. Each one gets the [`Lexer`],
//! reads or peeks a rune or two, optionally buffers them and emits a token,
//! and returns the state to run next. Returning `None` halts the lexer for
//! good.
//!
//! [`Lexer::next_token`] is a trampoline: it keeps calling the current
//! state until a token has been published, so state functions never call
//! each other and long stretches of input that emit nothing (comments,
//! whitespace) use no stack.
//!
//! ```rust
//! use std::io::Read;
//! use statelex::{Lexer, StateFn, TokenType};
//!
//! const WORD: TokenType = TokenType::user(0);
//!
//! fn space<R: Read>(l: &mut Lexer<R>) -> Option<StateFn<R>> {
//!     let r = l.read_rune().ok()?;
//!     if r.is_whitespace() {
//!         return Some(StateFn::new(space));
//!     }
//!     l.buffer_rune(r);
//!     Some(StateFn::new(word))
//! }
//!
//! fn word<R: Read>(l: &mut Lexer<R>) -> Option<StateFn<R>> {
//!     // On failure the error token is already published.
//!     let r = l.peek_rune().ok()?;
//!     if r.is_whitespace() {
//!         l.emit(WORD);
//!         return Some(StateFn::new(space));
//!     }
//!     let _ = l.read_rune();
//!     l.buffer_rune(r);
//!     Some(StateFn::new(word))
//! }
//!
//! let mut lexer = Lexer::from_str("hello  world\n", StateFn::new(space));
//! assert_eq!(lexer.next_token().as_str(), "hello");
//! assert_eq!(lexer.next_token().as_str(), "world");
//! assert!(lexer.next_token().is_eof());
//! ```
//!
//! # Errors
//!
//! Failures never escape as `Err` or panics. [`Lexer::read_rune`] and
//! [`Lexer::peek_rune`] publish any failure as an error token themselves
//! before returning it, so a state function only has to decide what to do
//! next (usually: return `None`). Once halted, every call to
//! [`Lexer::next_token`] returns an end-of-stream token.

use std::io::Read;

use log::{debug, trace};

use crate::buffer::TokenBuffer;
use crate::channel::Channel;
use crate::config::LexerConfig;
use crate::error::LexError;
use crate::reader::RuneReader;
use crate::span::Pos;
use crate::token::{Token, TokenType};

/// One step of a grammar.
///
/// Wraps a plain function pointer so states can name each other in their
/// return types.
pub struct StateFn<R: Read>(pub fn(&mut Lexer<R>) -> Option<StateFn<R>>);

impl<R: Read> StateFn<R> {
    pub fn new(f: fn(&mut Lexer<R>) -> Option<StateFn<R>>) -> Self {
        Self(f)
    }

    fn call(self, lexer: &mut Lexer<R>) -> Option<StateFn<R>> {
        (self.0)(lexer)
    }
}

impl<R: Read> Clone for StateFn<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Read> Copy for StateFn<R> {}

impl<R: Read> std::fmt::Debug for StateFn<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StateFn({:p})", self.0 as *const ())
    }
}

/// A lexer over any [`Read`] source.
pub struct Lexer<R: Read> {
    reader: RuneReader<R>,
    buffer: TokenBuffer,
    channel: Channel<Token>,
    /// `None` once a state function has halted.
    state: Option<StateFn<R>>,
    /// Set when the iterator has yielded the end-of-stream token.
    emitted_eof: bool,
}

impl<R: Read> Lexer<R> {
    /// Create a lexer that runs `start` on the first call to
    /// [`Lexer::next_token`].
    pub fn new(reader: R, start: StateFn<R>) -> Self {
        Self::with_config(reader, start, LexerConfig::default())
    }

    pub fn with_config(reader: R, start: StateFn<R>, config: LexerConfig) -> Self {
        Self {
            reader: RuneReader::with_capacity(config.read_buffer_size, reader),
            buffer: TokenBuffer::with_capacity(config.token_capacity),
            channel: Channel::new(),
            state: Some(start),
            emitted_eof: false,
        }
    }

    /// Return the next token.
    ///
    /// Runs state functions until one of them publishes something. After
    /// the lexer halts this returns an end-of-stream token forever.
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.channel.try_take() {
                return token;
            }
            match self.state {
                Some(state) => {
                    trace!("step {:?} at {}", state, self.reader.pos());
                    self.state = state.call(self);
                    if self.state.is_none() {
                        trace!("halted at {}", self.reader.pos());
                    }
                }
                None => self.channel.publish(Token::error(LexError::Eof)),
            }
        }
    }

    /// Whether a state function has returned `None`.
    pub fn is_halted(&self) -> bool {
        self.state.is_none()
    }

    /// Position of the rune most recently read.
    pub fn pos(&self) -> Pos {
        self.reader.pos()
    }

    // ───────────────────────────────────────────────────────────
    //  For use inside state functions
    // ───────────────────────────────────────────────────────────

    /// Consume the next rune.
    ///
    /// An error has already been published as a token when this returns
    /// `Err`; the caller only needs to pick its next state.
    pub fn read_rune(&mut self) -> Result<char, LexError> {
        match self.reader.read() {
            Ok(r) => Ok(r),
            Err(err) => {
                self.publish_read_failure(&err);
                Err(err)
            }
        }
    }

    /// Return the next rune without consuming it.
    ///
    /// Calling this repeatedly returns the same rune. Errors behave as in
    /// [`Lexer::read_rune`].
    pub fn peek_rune(&mut self) -> Result<char, LexError> {
        match self.reader.peek() {
            Ok(r) => Ok(r),
            Err(err) => {
                self.publish_read_failure(&err);
                Err(err)
            }
        }
    }

    /// Append `r` to the token being built.
    ///
    /// The first rune buffered after an emit fixes the token's position, so
    /// buffer a rune right after reading it.
    pub fn buffer_rune(&mut self, r: char) {
        self.buffer.push(r, self.reader.pos());
    }

    /// Text buffered since the last emit.
    pub fn buffered(&self) -> &str {
        self.buffer.as_str()
    }

    /// Publish the buffered text as a token of type `kind` and reset the
    /// buffer.
    ///
    /// Emitting [`TokenType::ERR`] publishes an error token whose
    /// [`LexError::Custom`] message is the buffered text.
    pub fn emit(&mut self, kind: TokenType) {
        let (text, pos) = self.buffer.take();
        if kind == TokenType::ERR {
            debug!("emit of reserved error type at {:?}, sending as error", pos);
            self.channel.publish(Token::error(LexError::Custom(text)));
            return;
        }
        self.channel.publish(Token::text(kind, text, pos));
    }

    /// Publish an error token. The buffer is left alone.
    ///
    /// Not needed for errors returned by [`Lexer::read_rune`] or
    /// [`Lexer::peek_rune`].
    pub fn emit_error(&mut self, err: impl Into<LexError>) {
        self.channel.publish(Token::error(err.into()));
    }

    fn publish_read_failure(&mut self, err: &LexError) {
        if !err.is_eof() {
            debug!("read failed after {}: {}", self.reader.pos(), err);
        }
        self.channel.publish(Token::error(err.clone()));
    }
}

/// Convenience: create a lexer directly from a `&str`.
impl<'a> Lexer<&'a [u8]> {
    pub fn from_str(source: &'a str, start: StateFn<&'a [u8]>) -> Self {
        Self::new(source.as_bytes(), start)
    }
}

/// Yields every token up to and including the first end-of-stream token.
///
/// A state function that emits after a read has already failed with
/// [`LexError::Eof`] queues its token behind the end-of-stream token, so
/// iteration never sees it. Call [`Lexer::next_token`] after the iterator
/// ends to drain such tokens.
impl<R: Read> Iterator for Lexer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.emitted_eof = true;
        }
        Some(token)
    }
}
