//! # ppss
//!
//! A Rust library for parsing protein structure composition definitions.
//!
//! A definition describes a multi-subunit assembly: subunits joined by
//! concatenation, grouped alternatives, bounded repetition and optional
//! inclusion. This crate turns the text into a [`Component`] tree; the
//! `ppss-expander` crate enumerates the concrete assemblies it denotes.
//!
//! ## Usage
//!
//! ```rust
//! use ppss::{parse, Component};
//!
//! let component = parse("B1 + [B2] + B3").unwrap();
//! assert_eq!(component.subunit_ids(), vec!["B1", "B2", "B3"]);
//!
//! let grouped = parse("(B1 | B2){2}").unwrap();
//! assert!(matches!(grouped, Component::Multiplicity { count: 2, .. }));
//! ```
//!
//! ## Syntax Quick Reference
//!
//! | Construct | Meaning | Example |
//! |-----------|---------|---------|
//! | subunit | One named unit | `B1` |
//! | `+` | Concatenation | `B1 + B2` |
//! | `\|` | Alternation | `B1 \| B2` |
//! | `{n}` | Multiplicity | `B2{3}`, `(B1 \| B2){2}` |
//! | `[ ]` | Optional | `B1 + [B2]` |
//! | `( )` | Grouping | `B1 + (B2 \| B3)` |
//!
//! Subunit identifiers are any run of ASCII letters and digits. Whitespace
//! between tokens is ignored. A definition must start every concatenation
//! with a required term, so `[B3]` on its own is rejected. Groups and
//! optionals may nest at most [`MAX_NESTING_DEPTH`] levels deep.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::Component;
pub use error::{GrammarError, GrammarResult};
pub use lexer::{tokenize, SpannedToken, Token};
pub use parser::{parse, MAX_NESTING_DEPTH};
