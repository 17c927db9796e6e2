//! A tiny parenthesis grammar built on the engine.
//!
//! Produces `(`, `)` and runs of letters/digits. Whitespace is skipped and
//! `#` starts a comment that runs to the end of the line.
//!
//! "Letters/digits" means [`char::is_alphanumeric`], the Unicode
//! `Alphabetic` and `Numeric` properties. `Alphabetic` includes
//! `Other_Alphabetic` combining marks such as the vowel sign in `का`
//! (U+093E), so a word keeps its combining vowel signs instead of splitting
//! at them as a letter-category check would.
//!
//! ```rust
//! use statelex::lisp::{self, LispLexer};
//!
//! let kinds: Vec<_> = LispLexer::new("(a b)\n".as_bytes())
//!     .map(|t| t.kind())
//!     .collect();
//! assert_eq!(kinds[0], lisp::OPEN_PAREN);
//! assert_eq!(kinds[3], lisp::CLOSE_PAREN);
//! ```

use std::io::Read;

use crate::{Lexer, LexerConfig, StateFn, Token, TokenType};

pub const OPEN_PAREN: TokenType = TokenType::user(0);
pub const CLOSE_PAREN: TokenType = TokenType::user(1);
pub const ALPHA_NUM: TokenType = TokenType::user(2);

/// Human-readable name of a token type produced by this grammar.
pub fn type_name(kind: TokenType) -> &'static str {
    match kind {
        TokenType::ERR => "error",
        OPEN_PAREN => "open-paren",
        CLOSE_PAREN => "close-paren",
        ALPHA_NUM => "alpha-num",
        _ => "unknown",
    }
}

/// Wraps the engine so callers only see token retrieval.
pub struct LispLexer<R: Read> {
    lexer: Lexer<R>,
}

impl<R: Read> LispLexer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, LexerConfig::default())
    }

    pub fn with_config(reader: R, config: LexerConfig) -> Self {
        Self {
            lexer: Lexer::with_config(reader, StateFn::new(whitespace), config),
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.lexer.next_token()
    }

    /// Give up the wrapper, e.g. to [`Lexer::spawn`] it.
    pub fn into_inner(self) -> Lexer<R> {
        self.lexer
    }
}

impl<R: Read> Iterator for LispLexer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.lexer.next()
    }
}

/// Skips whitespace and decides what the next rune starts.
fn whitespace<R: Read>(l: &mut Lexer<R>) -> Option<StateFn<R>> {
    let r = l.read_rune().ok()?;

    if r.is_whitespace() {
        return Some(StateFn::new(whitespace));
    } else if r == '#' {
        return Some(StateFn::new(comment));
    }

    l.buffer_rune(r);
    match r {
        '(' => {
            l.emit(OPEN_PAREN);
            Some(StateFn::new(whitespace))
        }
        ')' => {
            l.emit(CLOSE_PAREN);
            Some(StateFn::new(whitespace))
        }
        _ => Some(StateFn::new(alpha_num)),
    }
}

/// Throws runes away up to and including the newline.
fn comment<R: Read>(l: &mut Lexer<R>) -> Option<StateFn<R>> {
    let r = l.read_rune().ok()?;
    if r == '\n' {
        return Some(StateFn::new(whitespace));
    }
    Some(StateFn::new(comment))
}

/// Buffers letters and digits, emits on the first rune that is neither.
fn alpha_num<R: Read>(l: &mut Lexer<R>) -> Option<StateFn<R>> {
    let r = l.peek_rune().ok()?;

    if !r.is_alphanumeric() {
        l.emit(ALPHA_NUM);
        return Some(StateFn::new(whitespace));
    }

    // Just peeked, cannot fail.
    let _ = l.read_rune();
    l.buffer_rune(r);
    Some(StateFn::new(alpha_num))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LexError, Pos};

    fn tokens(src: &str) -> Vec<Token> {
        LispLexer::new(src.as_bytes()).collect()
    }

    /// (type, text) pairs, with error tokens rendered as their message.
    fn summary(src: &str) -> Vec<(TokenType, String)> {
        tokens(src)
            .into_iter()
            .map(|t| match t.err() {
                Some(err) => (t.kind(), err.to_string()),
                None => (t.kind(), t.into_text()),
            })
            .collect()
    }

    fn pair(kind: TokenType, text: &str) -> (TokenType, String) {
        (kind, text.to_string())
    }

    fn eof() -> (TokenType, String) {
        (TokenType::ERR, LexError::Eof.to_string())
    }

    #[test]
    fn parens_and_words() {
        assert_eq!(
            summary("(a b)"),
            vec![
                pair(OPEN_PAREN, "("),
                pair(ALPHA_NUM, "a"),
                pair(ALPHA_NUM, "b"),
                pair(CLOSE_PAREN, ")"),
                eof(),
            ]
        );
    }

    #[test]
    fn comment_produces_nothing() {
        assert_eq!(
            summary("# comment\n(x)"),
            vec![
                pair(OPEN_PAREN, "("),
                pair(ALPHA_NUM, "x"),
                pair(CLOSE_PAREN, ")"),
                eof(),
            ]
        );
    }

    #[test]
    fn comment_to_end_of_input() {
        assert_eq!(summary("(# trailing"), vec![pair(OPEN_PAREN, "("), eof()]);
    }

    #[test]
    fn nested_lists() {
        let kinds: Vec<_> = tokens("(def (f x1) (add x1 42))\n")
            .iter()
            .map(Token::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                OPEN_PAREN,
                ALPHA_NUM,
                OPEN_PAREN,
                ALPHA_NUM,
                ALPHA_NUM,
                CLOSE_PAREN,
                OPEN_PAREN,
                ALPHA_NUM,
                ALPHA_NUM,
                ALPHA_NUM,
                CLOSE_PAREN,
                CLOSE_PAREN,
                TokenType::ERR,
            ]
        );
    }

    #[test]
    fn unicode_words() {
        assert_eq!(
            summary("(größe 42)"),
            vec![
                pair(OPEN_PAREN, "("),
                pair(ALPHA_NUM, "größe"),
                pair(ALPHA_NUM, "42"),
                pair(CLOSE_PAREN, ")"),
                eof(),
            ]
        );
    }

    #[test]
    fn combining_vowel_sign_stays_in_word() {
        assert_eq!(
            summary("(का)"),
            vec![
                pair(OPEN_PAREN, "("),
                pair(ALPHA_NUM, "का"),
                pair(CLOSE_PAREN, ")"),
                eof(),
            ]
        );
    }

    #[test]
    fn trailing_word_is_not_emitted() {
        // The peek past `b` hits the end first and the state halts.
        assert_eq!(summary("a b"), vec![pair(ALPHA_NUM, "a"), eof()]);
    }

    #[test]
    fn positions() {
        let toks = tokens("(foo\n  bar)");
        let positions: Vec<_> = toks.iter().map(Token::pos).collect();
        assert_eq!(
            positions,
            vec![
                Some(Pos::new(1, 1)),
                Some(Pos::new(1, 2)),
                Some(Pos::new(2, 3)),
                Some(Pos::new(2, 6)),
                None,
            ]
        );
    }

    #[test]
    fn invalid_utf8_halts() {
        let toks: Vec<Token> = LispLexer::new(&[b'(', 0xC3, b'(', b')'][..]).collect();
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0].kind(), OPEN_PAREN);
        assert_eq!(toks[1].err(), Some(&LexError::InvalidUtf8));
        assert!(toks[2].is_eof());
    }

    #[test]
    fn invalid_utf8_inside_word() {
        let mut lexer = LispLexer::new(&[b'a', b'b', 0xFF, b' '][..]);
        assert_eq!(lexer.next_token().err(), Some(&LexError::InvalidUtf8));
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
    }

    #[test]
    fn display_matches_print_format() {
        let lines: Vec<String> = tokens("(ab)").iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                r#"{1:1,1,"("}"#,
                r#"{1:2,3,"ab"}"#,
                r#"{1:4,2,")"}"#,
                r#"{-1:-1,0,"end of input"}"#,
            ]
        );
    }

    #[test]
    fn type_names() {
        assert_eq!(type_name(OPEN_PAREN), "open-paren");
        assert_eq!(type_name(TokenType::ERR), "error");
        assert_eq!(type_name(TokenType::user(40)), "unknown");
    }
}
