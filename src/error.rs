use std::fmt;

use thiserror::Error;

use crate::lexer::{Position, TokenKind};

/// What the parser was looking for when it hit a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific token kind.
    Token(TokenKind),
    /// A key identifier inside the variable block.
    Key,
    /// A variable value: a TEMPLATE or a NUM_VALUE.
    Value,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(kind) => write!(f, "{}", kind),
            Self::Key => write!(f, "key {}", TokenKind::Ident),
            Self::Value => write!(f, "LIT_VALUE"),
        }
    }
}

/// The only grammar error: the token at `pos` was not what the grammar
/// expected there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("found {found:?}, expected {expected} at {pos}")]
    Mismatch {
        found: String,
        expected: Expected,
        pos: Position,
    },
}

impl ParseError {
    pub fn expected(&self) -> Expected {
        match self {
            Self::Mismatch { expected, .. } => *expected,
        }
    }

    pub fn found(&self) -> &str {
        match self {
            Self::Mismatch { found, .. } => found,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::Mismatch { pos, .. } => *pos,
        }
    }
}

#[derive(Debug, Error)]
pub enum FcallError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Unknown variable: '{0}'")]
    UnknownVariable(String),
    #[error("Unknown renderer: '{0}'")]
    UnknownRenderer(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FcallError>;
