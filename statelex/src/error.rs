use std::{io, sync::Arc};

/// Payload of an error token.
///
/// Lexing failures are never raised; they travel through the token stream
/// inside a [`Token`](crate::Token) of type [`TokenType::ERR`](crate::TokenType::ERR).
#[derive(Debug, Clone)]
pub enum LexError {
    /// The source has no more input. Every stream ends with this.
    Eof,
    /// The source failed while being read.
    Io(Arc<io::Error>),
    /// The next bytes of the source are not a valid UTF-8 sequence.
    InvalidUtf8,
    /// An error raised by a state function.
    Custom(String),
}

impl LexError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

// io::Error has no PartialEq, compare by kind.
impl PartialEq for LexError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Eof, Self::Eof) => true,
            (Self::InvalidUtf8, Self::InvalidUtf8) => true,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Custom(a), Self::Custom(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eof => write!(f, "end of input"),
            Self::Io(err) => write!(f, "read failed: {}", err),
            Self::InvalidUtf8 => write!(f, "invalid utf8 character"),
            Self::Custom(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for LexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for LexError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<String> for LexError {
    fn from(message: String) -> Self {
        Self::Custom(message)
    }
}

impl From<&str> for LexError {
    fn from(message: &str) -> Self {
        Self::Custom(message.to_owned())
    }
}
