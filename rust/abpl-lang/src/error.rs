//! Error types for the interpreter pipeline.
//!
//! Every stage has its own error type, and [`Rejection`] is the union a caller
//! sees when a sentence is not accepted. Each variant carries the offending
//! text and its byte position in the input.

use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use thiserror::Error;

use crate::shape::ShapeId;
use crate::token::TokenKind;

/// A character no token category could classify.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("unrecognized character '{character}' at {position}")]
pub struct LexicalError {
    pub character: char,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum SyntaxError {
    #[error("unexpected {kind} '{text}' at {position}")]
    UnexpectedToken {
        kind: TokenKind,
        text: String,
        position: usize,
    },

    #[error("unexpected end of input at {position}")]
    UnexpectedEnd { position: usize },
}

impl SyntaxError {
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::UnexpectedToken { position, .. } => *position,
            SyntaxError::UnexpectedEnd { position } => *position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum SemanticError {
    #[error("invalid time '{value}' for {field} at {position}")]
    InvalidTime {
        field: &'static str,
        value: String,
        position: usize,
    },

    #[error("invalid date '{value}' for {field} at {position}")]
    InvalidDate {
        field: &'static str,
        value: String,
        position: usize,
    },

    #[error("end date precedes start date: '{end}' is not after '{start}'")]
    DateOrder {
        start: String,
        end: String,
        position: usize,
    },
}

impl SemanticError {
    pub fn position(&self) -> usize {
        match self {
            SemanticError::InvalidTime { position, .. }
            | SemanticError::InvalidDate { position, .. }
            | SemanticError::DateOrder { position, .. } => *position,
        }
    }
}

/// Which stage turned a sentence down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    Lexical,
    Syntactic,
    Semantic,
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionKind::Lexical => write!(f, "lexical"),
            RejectionKind::Syntactic => write!(f, "syntactic"),
            RejectionKind::Semantic => write!(f, "semantic"),
        }
    }
}

/// Why a sentence was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Every unrecognized character in the sentence, in input order.
    #[error("{}", join_lexical(.0))]
    Lexical(Vec<LexicalError>),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

fn join_lexical(errors: &[LexicalError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::Lexical(_) => RejectionKind::Lexical,
            Rejection::Syntax(_) => RejectionKind::Syntactic,
            Rejection::Semantic(_) => RejectionKind::Semantic,
        }
    }

    /// Position of the first offending character or token.
    pub fn position(&self) -> usize {
        match self {
            Rejection::Lexical(errors) => errors.first().map_or(0, |error| error.position),
            Rejection::Syntax(error) => error.position(),
            Rejection::Semantic(error) => error.position(),
        }
    }
}

impl Serialize for Rejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Rejection", 3)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.serialize_field("position", &self.position())?;
        state.end()
    }
}

/// A shape table that cannot be used to build a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("shapes {first} and {second} declare the same token sequence")]
    AmbiguousShape { first: ShapeId, second: ShapeId },

    #[error("grammar has no shapes")]
    Empty,
}

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("{kind} is not a keyword category")]
    NotAKeyword { kind: TokenKind },

    #[error("empty word in {kind} word list")]
    EmptyWord { kind: TokenKind },

    #[error("failed to compile pattern for {kind}: {source}")]
    Pattern {
        kind: TokenKind,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while assembling an [`crate::interpreter::Interpreter`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}
