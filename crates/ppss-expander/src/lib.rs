//! # ppss-expander
//!
//! Exhaustive expansion of protein structure composition definitions.
//!
//! This crate bridges the [`ppss`] parser and a combinatorial expander: a
//! definition such as `B1 + [B2] + B3` becomes the explicit list of every
//! concrete assembly it denotes, each rendered as subunit identifiers joined
//! with `" + "`.
//!
//! ## Quick Start
//!
//! ```rust
//! use ppss_expander::parse_protein;
//!
//! let structures = parse_protein("B1 + [B2] + B3").unwrap();
//! assert_eq!(structures, vec!["B1 + B2 + B3", "B1 + B3"]);
//!
//! // A lone optional is not a protein
//! assert!(parse_protein("[B3]").is_err());
//! ```
//!
//! ## With Configuration
//!
//! ```rust
//! use ppss_expander::{ExpanderConfig, ProteinExpander};
//!
//! let config = ExpanderConfig::builder().with_separator("-").build();
//! let expander = ProteinExpander::with_config(config);
//!
//! let result = expander.expand_str("(B1 | B2){2}").unwrap();
//! assert_eq!(result.count(), 4);
//! assert_eq!(result.render("-"), vec!["B1-B1", "B1-B2", "B2-B1", "B2-B2"]);
//! ```
//!
//! ## Result Size
//!
//! The number of structures grows combinatorially and is not capped. Use
//! [`Component::structure_count`] to check the size before expanding:
//!
//! ```rust
//! let component = ppss::parse("(B1 | B2 | B3){20}").unwrap();
//! assert_eq!(component.structure_count(), 3u128.pow(20));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod error;
mod expander;
mod result;

// Public re-exports
pub use config::{ExpanderConfig, ExpanderConfigBuilder, DEFAULT_SEPARATOR};
pub use error::{ExpansionError, ProteinError, ProteinResult};
pub use expander::{ProteinExpander, MAX_EXPANSION_DEPTH};
pub use result::{render_structure, ExpansionResult, ExpansionStats, Structure};

// Re-export commonly used types from the parser for convenience
pub use ppss::{Component, GrammarError};

/// Parses a protein definition and returns every structure it denotes.
///
/// Uses a default [`ProteinExpander`]; structures are joined with `" + "`.
///
/// # Errors
///
/// * [`ProteinError::Grammar`] - the text is not a valid definition
/// * [`ProteinError::Expansion`] - the tree cannot be expanded
///
/// # Examples
///
/// ```
/// use ppss_expander::parse_protein;
///
/// assert_eq!(
///     parse_protein("(B1 + B2) | (B3 + B4)").unwrap(),
///     vec!["B1 + B2", "B3 + B4"]
/// );
/// ```
pub fn parse_protein(definition: &str) -> ProteinResult<Vec<String>> {
    ProteinExpander::new().parse_protein(definition)
}
