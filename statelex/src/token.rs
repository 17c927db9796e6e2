/// Tokens produced by the engine.
use crate::error::LexError;
use crate::span::Pos;

/// The type tag of a token.
///
/// The engine reserves every value below [`TokenType::USER_DEFINED`]; only
/// [`TokenType::ERR`] is currently in use. Grammars define their own tags
/// with [`TokenType::user`]:
///
/// ```rust
/// use statelex::TokenType;
///
/// const OPEN: TokenType = TokenType::user(0);
/// const CLOSE: TokenType = TokenType::user(1);
/// assert!(OPEN.is_user_defined() && OPEN != CLOSE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenType(pub u32);

impl TokenType {
    /// An error reading the stream or raised by a state function, including
    /// the end of the stream.
    pub const ERR: TokenType = TokenType(0);

    /// First tag available to grammars. Never produced by the engine itself.
    pub const USER_DEFINED: TokenType = TokenType(1);

    /// The `n`th grammar-defined tag.
    pub const fn user(n: u32) -> TokenType {
        TokenType(Self::USER_DEFINED.0 + n)
    }

    pub fn is_user_defined(self) -> bool {
        self >= Self::USER_DEFINED
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed unit of output.
///
/// Either a text token (any grammar tag, carrying the buffered text and the
/// position of its first rune) or an error token ([`TokenType::ERR`],
/// carrying a [`LexError`] and no position). The constructors keep the two
/// shapes apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenType,
    text: String,
    pos: Option<Pos>,
    error: Option<LexError>,
}

impl Token {
    pub(crate) fn text(kind: TokenType, text: String, pos: Option<Pos>) -> Self {
        debug_assert_ne!(kind, TokenType::ERR, "text tokens need a grammar tag");
        Self {
            kind,
            text,
            pos,
            error: None,
        }
    }

    pub(crate) fn error(error: LexError) -> Self {
        Self {
            kind: TokenType::ERR,
            text: String::new(),
            pos: None,
            error: Some(error),
        }
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    /// The buffered text. Empty for error tokens.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Position of the first rune of the token.
    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    pub fn err(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn is_err(&self) -> bool {
        self.kind == TokenType::ERR
    }

    /// True for the end-of-stream token.
    pub fn is_eof(&self) -> bool {
        self.error.as_ref().is_some_and(LexError::is_eof)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (row, col) = match self.pos {
            Some(pos) => (pos.row as i64, pos.col as i64),
            None => (-1, -1),
        };
        match &self.error {
            Some(err) => {
                write!(f, "{{{}:{},{},{:?}}}", row, col, self.kind, err.to_string())
            }
            None => write!(f, "{{{}:{},{},{:?}}}", row, col, self.kind, self.text),
        }
    }
}
