//! Error types for protein expansion.

use ppss::GrammarError;
use thiserror::Error;

/// A syntactically valid tree that cannot be expanded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    /// The whole protein is a single optional component.
    #[error("a protein must contain at least one required component, found a bare optional")]
    BareOptional,

    /// An alternation with fewer than two options.
    #[error("alternation must have at least two options, found {options}")]
    DegenerateAlternation {
        /// Number of options present.
        options: usize,
    },

    /// A hand-built tree nested deeper than the expander accepts.
    #[error("component nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep {
        /// Nesting depth of the tree, as measured by [`ppss::Component::nesting_depth`].
        depth: usize,
        /// The maximum accepted depth.
        limit: usize,
    },
}

/// Errors returned by the public entry points.
///
/// Separates malformed text ([`ProteinError::Grammar`]) from well-formed
/// but meaningless trees ([`ProteinError::Expansion`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProteinError {
    /// Lexing or parsing failed.
    #[error("failed to parse protein definition: {0}")]
    Grammar(#[from] GrammarError),

    /// The parsed tree violates an expansion rule.
    #[error("error during expansion: {0}")]
    Expansion(#[from] ExpansionError),
}

/// Result type for protein operations.
pub type ProteinResult<T> = std::result::Result<T, ProteinError>;
