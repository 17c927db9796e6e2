//! # statelex
//!
//! A small lexer engine driven by state functions.
//!
//! The engine knows nothing about any grammar. A grammar supplies a start
//! [`StateFn`] and its own [`TokenType`] tags; the engine supplies rune
//! reading with one rune of lookahead, row/column tracking, token buffering
//! and delivery.
//!
//! ## Architecture
//!
//! ```text
//!  impl Read (file, socket, &[u8], …)
//!      │
//!      ▼
//!  ┌─────────────┐  read/peek   ┌────────────────┐  buffer   ┌─────────────┐
//!  │ RuneReader  │ ───────────▶ │ state function │ ────────▶ │ TokenBuffer │
//!  └─────────────┘              └────────────────┘           └─────────────┘
//!                                  │         ▲                      │ emit
//!                      next state  ▼         │                      ▼
//!                               ┌────────────────┐  try_take  ┌─────────┐
//!                  next_token ◀─│     Lexer      │ ◀───────── │ Channel │
//!                               └────────────────┘            └─────────┘
//! ```
//!
//! Read failures, the end of the stream and malformed UTF-8 are not
//! raised. They arrive as ordinary tokens of type [`TokenType::ERR`]
//! carrying a [`LexError`].
//!
//! ```rust
//! use statelex::lisp::LispLexer;
//!
//! for token in LispLexer::new("(a b)\n".as_bytes()) {
//!     match token.err() {
//!         Some(err) if err.is_eof() => break,
//!         Some(err) => panic!("lex error: {}", err),
//!         None => println!("{}", token),
//!     }
//! }
//! ```
//!
//! ## Lexing on another thread
//!
//! ```rust, ignore
//! use std::fs::File;
//! use statelex::lisp::LispLexer;
//!
//! let file = File::open("program.lisp")?;
//! let tokens = LispLexer::new(file).into_inner().spawn();
//!
//! for token in tokens {
//!     // Tokens arrive while the file is still being read…
//! }
//! ```

mod buffer;
mod channel;
pub mod config;
pub mod error;
pub mod lexer;
pub mod lisp;
mod reader;
pub mod span;
pub mod threaded;
pub mod token;

pub use config::LexerConfig;
pub use error::LexError;
pub use lexer::{Lexer, StateFn};
pub use span::Pos;
pub use threaded::TokenReceiver;
pub use token::{Token, TokenType};
