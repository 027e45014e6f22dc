//! Tokenizer for protein definitions.
//!
//! Whitespace between tokens is skipped and never part of a token. A word is
//! a maximal run of ASCII letters and digits; words made only of digits are
//! [`Token::Digits`], everything else is a [`Token::Identifier`].

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{map, value},
    IResult,
};

use crate::error::{GrammarError, GrammarResult};

/// A lexical token of the protein grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// A subunit name such as `B1` or `Alpha`.
    Identifier(String),
    /// `+`
    Plus,
    /// `|`
    Pipe,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// A run of decimal digits.
    Digits(String),
    /// End of the definition.
    EndOfInput,
}

impl Token {
    fn word(text: &str) -> Self {
        if text.bytes().all(|b| b.is_ascii_digit()) {
            Token::Digits(text.to_string())
        } else {
            Token::Identifier(text.to_string())
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(text) => write!(f, "identifier '{}'", text),
            Token::Digits(text) => write!(f, "digits '{}'", text),
            Token::Plus => write!(f, "'+'"),
            Token::Pipe => write!(f, "'|'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A token together with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    /// The token.
    pub token: Token,
    /// Byte offset of the token's first character.
    pub position: usize,
}

/// Splits a protein definition into tokens.
///
/// The returned stream always ends with [`Token::EndOfInput`].
///
/// # Examples
///
/// ```rust
/// use ppss::{tokenize, Token};
///
/// let tokens = tokenize("B1 + B2").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|t| t.token).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         Token::Identifier("B1".to_string()),
///         Token::Plus,
///         Token::Identifier("B2".to_string()),
///         Token::EndOfInput,
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> GrammarResult<Vec<SpannedToken>> {
    let mut tokens = Vec::new();
    let mut remaining = input.trim_start();

    while !remaining.is_empty() {
        let position = input.len() - remaining.len();
        match token(remaining) {
            Ok((rest, token)) => {
                tokens.push(SpannedToken { token, position });
                remaining = rest.trim_start();
            }
            Err(_) => {
                // Only reachable for a non-empty remainder.
                let character = remaining.chars().next().unwrap_or_default();
                return Err(GrammarError::UnexpectedCharacter {
                    position,
                    character,
                });
            }
        }
    }

    tokens.push(SpannedToken {
        token: Token::EndOfInput,
        position: input.len(),
    });
    Ok(tokens)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Plus, char('+')),
        value(Token::Pipe, char('|')),
        value(Token::LBrace, char('{')),
        value(Token::RBrace, char('}')),
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        value(Token::LBracket, char('[')),
        value(Token::RBracket, char(']')),
        word,
    ))(input)
}

fn word(input: &str) -> IResult<&str, Token> {
    map(take_while1(|c: char| c.is_ascii_alphanumeric()), Token::word)(input)
}
