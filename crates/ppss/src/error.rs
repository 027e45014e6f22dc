//! Error types for protein definition parsing.

use thiserror::Error;

/// Errors that can occur while lexing or parsing a protein definition.
///
/// Every variant that points into the input carries the byte offset of the
/// offending character or token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The definition is empty or contains only whitespace.
    #[error("empty protein definition")]
    EmptyDefinition,

    /// A character that cannot start any token.
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// Byte offset of the character.
        position: usize,
        /// The offending character.
        character: char,
    },

    /// A well-formed token in a place the grammar does not allow it.
    #[error("parse error at position {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// Byte offset of the token.
        position: usize,
        /// What the parser was looking for.
        expected: &'static str,
        /// Description of the token actually found.
        found: String,
    },

    /// A multiplicity count that does not fit the count type.
    #[error("invalid multiplicity count '{digits}' at position {position}")]
    InvalidCount {
        /// Byte offset of the count.
        position: usize,
        /// The digits as written.
        digits: String,
    },

    /// Groups or optionals nested deeper than the parser accepts.
    #[error("nesting deeper than {limit} levels at position {position}")]
    NestingTooDeep {
        /// Byte offset of the opening delimiter that crossed the limit.
        position: usize,
        /// The maximum nesting depth.
        limit: usize,
    },
}

impl GrammarError {
    /// Returns the byte offset the error points at, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            GrammarError::EmptyDefinition => None,
            GrammarError::UnexpectedCharacter { position, .. }
            | GrammarError::UnexpectedToken { position, .. }
            | GrammarError::InvalidCount { position, .. }
            | GrammarError::NestingTooDeep { position, .. } => Some(*position),
        }
    }
}

/// Result type for grammar operations.
pub type GrammarResult<T> = std::result::Result<T, GrammarError>;
