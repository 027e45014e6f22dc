//! Protein definition parser.
//!
//! nom combinators over the token stream produced by [`crate::tokenize`].
//! Operator precedence, lowest to highest: alternation `|`, concatenation
//! `+`, postfix multiplicity `{n}`, grouping `( )`.
//!
//! ```text
//! protein        := alternation
//! alternation    := concatenation ("|" concatenation)*
//! concatenation  := required_term ("+" term)*
//! term           := required_term | optional_term
//! required_term  := multiplicity | subunit | "(" alternation ")"
//! multiplicity   := (subunit | "(" alternation ")") "{" digits "}"
//! optional_term  := "[" alternation "]"
//! ```

use nom::{
    branch::alt,
    combinator::{cut, map, opt},
    error::{ErrorKind, ParseError},
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};

use crate::ast::Component;
use crate::error::{GrammarError, GrammarResult};
use crate::lexer::{tokenize, SpannedToken, Token};

/// Deepest allowed nesting of `(` and `[` groups.
pub const MAX_NESTING_DEPTH: usize = 128;

type Tokens<'t> = &'t [SpannedToken];

type PResult<'t, O> = IResult<Tokens<'t>, O, SyntaxError<'t>>;

/// Parse a protein definition string.
///
/// Subunit identifiers are any run of ASCII letters and digits (`B1`,
/// `Alpha2`, `12`); they are kept exactly as written. Groups may nest at
/// most [`MAX_NESTING_DEPTH`] levels deep.
///
/// # Arguments
/// * `definition` - The protein definition to parse
///
/// # Returns
/// The root [`Component`] or the first grammar error encountered
///
/// # Examples
///
/// ```rust
/// use ppss::{parse, Component};
///
/// // Concatenation folds to the left
/// let component = parse("B1 + B2 + B3").unwrap();
/// assert_eq!(component.to_string(), "B1 + B2 + B3");
///
/// // A protein cannot consist of an optional term alone
/// assert!(parse("[B3]").is_err());
/// ```
pub fn parse(definition: &str) -> GrammarResult<Component> {
    if definition.trim().is_empty() {
        return Err(GrammarError::EmptyDefinition);
    }

    let tokens = tokenize(definition)?;
    tracing::debug!(
        length = definition.len(),
        tokens = tokens.len(),
        "tokenized protein definition"
    );
    check_nesting(&tokens)?;

    match protein(&tokens) {
        Ok((_, component)) => Ok(component),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(e.into_grammar_error(definition.len()))
        }
        Err(nom::Err::Incomplete(_)) => Err(GrammarError::UnexpectedToken {
            position: definition.len(),
            expected: "more input",
            found: Token::EndOfInput.to_string(),
        }),
    }
}

/// Rejects groups nested deeper than [`MAX_NESTING_DEPTH`] before any
/// recursive rule runs.
fn check_nesting(tokens: &[SpannedToken]) -> GrammarResult<()> {
    let mut depth = 0usize;
    for spanned in tokens {
        match spanned.token {
            Token::LParen | Token::LBracket => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(GrammarError::NestingTooDeep {
                        position: spanned.position,
                        limit: MAX_NESTING_DEPTH,
                    });
                }
            }
            Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

// ============================================================================
// Syntax errors
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Reason {
    Expected(&'static str),
    CountOutOfRange,
}

#[derive(Debug)]
struct SyntaxError<'t> {
    input: Tokens<'t>,
    reason: Reason,
}

impl<'t> SyntaxError<'t> {
    fn expected(input: Tokens<'t>, expected: &'static str) -> Self {
        Self {
            input,
            reason: Reason::Expected(expected),
        }
    }

    fn into_grammar_error(self, end: usize) -> GrammarError {
        let position = self.input.first().map_or(end, |t| t.position);
        match (self.reason, self.input.first()) {
            (
                Reason::CountOutOfRange,
                Some(SpannedToken {
                    token: Token::Digits(digits),
                    ..
                }),
            ) => GrammarError::InvalidCount {
                position,
                digits: digits.clone(),
            },
            (reason, first) => GrammarError::UnexpectedToken {
                position,
                expected: match reason {
                    Reason::Expected(expected) => expected,
                    Reason::CountOutOfRange => "multiplicity count",
                },
                found: first
                    .map_or(Token::EndOfInput, |t| t.token.clone())
                    .to_string(),
            },
        }
    }
}

impl<'t> ParseError<Tokens<'t>> for SyntaxError<'t> {
    fn from_error_kind(input: Tokens<'t>, _kind: ErrorKind) -> Self {
        Self::expected(input, "valid syntax")
    }

    fn append(_input: Tokens<'t>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

// ============================================================================
// Token primitives
// ============================================================================

fn token<'t>(
    expected_token: Token,
    expected: &'static str,
) -> impl FnMut(Tokens<'t>) -> PResult<'t, &'t SpannedToken> {
    move |input: Tokens<'t>| match input.split_first() {
        Some((first, rest)) if first.token == expected_token => Ok((rest, first)),
        _ => Err(nom::Err::Error(SyntaxError::expected(input, expected))),
    }
}

fn subunit(input: Tokens<'_>) -> PResult<'_, Component> {
    match input.split_first() {
        Some((
            SpannedToken {
                token: Token::Identifier(id) | Token::Digits(id),
                ..
            },
            rest,
        )) => Ok((rest, Component::Subunit(id.clone()))),
        _ => Err(nom::Err::Error(SyntaxError::expected(
            input,
            "subunit or '('",
        ))),
    }
}

fn count(input: Tokens<'_>) -> PResult<'_, u32> {
    match input.split_first() {
        Some((
            SpannedToken {
                token: Token::Digits(digits),
                ..
            },
            rest,
        )) => match digits.parse::<u32>() {
            Ok(count) => Ok((rest, count)),
            Err(_) => Err(nom::Err::Failure(SyntaxError {
                input,
                reason: Reason::CountOutOfRange,
            })),
        },
        _ => Err(nom::Err::Error(SyntaxError::expected(
            input,
            "multiplicity count",
        ))),
    }
}

// ============================================================================
// Grammar rules
// ============================================================================

fn protein(input: Tokens<'_>) -> PResult<'_, Component> {
    terminated(
        alternation,
        token(Token::EndOfInput, "'+', '|' or end of input"),
    )(input)
}

fn alternation(input: Tokens<'_>) -> PResult<'_, Component> {
    let (input, first) = concatenation(input)?;
    let (input, rest) = many0(preceded(token(Token::Pipe, "'|'"), cut(concatenation)))(input)?;

    if rest.is_empty() {
        return Ok((input, first));
    }
    let options = std::iter::once(first).chain(rest).collect();
    Ok((input, Component::Alternation(options)))
}

fn concatenation(input: Tokens<'_>) -> PResult<'_, Component> {
    let (input, first) = required_term(input)?;
    let (input, rest) = many0(preceded(token(Token::Plus, "'+'"), cut(term)))(input)?;

    // Left associative: a + b + c is (a + b) + c
    Ok((input, rest.into_iter().fold(first, Component::concatenation)))
}

fn term(input: Tokens<'_>) -> PResult<'_, Component> {
    alt((optional_term, required_term))(input)
}

fn required_term(input: Tokens<'_>) -> PResult<'_, Component> {
    let (input, base) = alt((subunit, group))(input)?;
    let (input, repeat) = opt(preceded(
        token(Token::LBrace, "'{'"),
        cut(terminated(count, token(Token::RBrace, "'}'"))),
    ))(input)?;

    match repeat {
        Some(count) => Ok((input, Component::multiplicity(base, count))),
        None => Ok((input, base)),
    }
}

fn group(input: Tokens<'_>) -> PResult<'_, Component> {
    preceded(
        token(Token::LParen, "subunit or '('"),
        cut(terminated(alternation, token(Token::RParen, "')'"))),
    )(input)
}

fn optional_term(input: Tokens<'_>) -> PResult<'_, Component> {
    map(
        preceded(
            token(Token::LBracket, "'['"),
            cut(terminated(alternation, token(Token::RBracket, "']'"))),
        ),
        Component::optional,
    )(input)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn b(n: u32) -> Component {
        Component::subunit(format!("B{}", n))
    }

    // ========================================================================
    // 1. Subunits
    // ========================================================================

    mod subunits {
        use super::*;

        #[test]
        fn test_single_subunit() {
            assert_eq!(parse("B1").unwrap(), b(1));
        }

        #[test]
        fn test_surrounding_whitespace() {
            assert_eq!(parse("  \n B36\t ").unwrap(), b(36));
        }

        #[test]
        fn test_general_identifiers() {
            assert_eq!(parse("Alpha").unwrap(), Component::subunit("Alpha"));
            assert_eq!(parse("alpha2b").unwrap(), Component::subunit("alpha2b"));
        }

        #[test]
        fn test_digit_only_identifier() {
            assert_eq!(parse("12").unwrap(), Component::subunit("12"));
        }

        #[test]
        fn test_identifier_case_preserved() {
            assert_eq!(parse("b1").unwrap(), Component::subunit("b1"));
            assert_ne!(parse("b1").unwrap(), parse("B1").unwrap());
        }
    }

    // ========================================================================
    // 2. Concatenation
    // ========================================================================

    mod concatenation {
        use super::*;

        #[test]
        fn test_two_subunits() {
            assert_eq!(
                parse("B1 + B1").unwrap(),
                Component::concatenation(b(1), b(1))
            );
        }

        #[test]
        fn test_left_associative() {
            assert_eq!(
                parse("B1 + B2 + B3").unwrap(),
                Component::concatenation(Component::concatenation(b(1), b(2)), b(3))
            );
        }

        #[test]
        fn test_no_whitespace() {
            assert_eq!(parse("B1+B2").unwrap(), parse("B1 + B2").unwrap());
        }

        #[test]
        fn test_parenthesized_right_operand() {
            assert_eq!(
                parse("B1 + (B2 + B3)").unwrap(),
                Component::concatenation(b(1), Component::concatenation(b(2), b(3)))
            );
        }

        #[test]
        fn test_redundant_parentheses_vanish() {
            assert_eq!(parse("((B1))").unwrap(), b(1));
        }
    }

    // ========================================================================
    // 3. Alternation
    // ========================================================================

    mod alternation {
        use super::*;

        #[test]
        fn test_grouped_branches() {
            assert_eq!(
                parse("(B1 + B2) | (B3 + B4)").unwrap(),
                Component::alternation([
                    Component::concatenation(b(1), b(2)),
                    Component::concatenation(b(3), b(4)),
                ])
            );
        }

        #[test]
        fn test_flat_option_list() {
            assert_eq!(
                parse("B1 | B2 | B3").unwrap(),
                Component::alternation([b(1), b(2), b(3)])
            );
        }

        #[test]
        fn test_binds_looser_than_concatenation() {
            assert_eq!(
                parse("B1 + B2 | B3").unwrap(),
                Component::alternation([Component::concatenation(b(1), b(2)), b(3)])
            );
        }

        #[test]
        fn test_inside_concatenation() {
            assert_eq!(
                parse("B1 + (B2 | B3) + B4").unwrap(),
                Component::concatenation(
                    Component::concatenation(b(1), Component::alternation([b(2), b(3)])),
                    b(4)
                )
            );
        }

        #[test]
        fn test_nested_group_is_separate_option() {
            assert_eq!(
                parse("(B1 | B2) | B3").unwrap(),
                Component::alternation([Component::alternation([b(1), b(2)]), b(3)])
            );
        }
    }

    // ========================================================================
    // 4. Multiplicity
    // ========================================================================

    mod multiplicity {
        use super::*;

        #[test]
        fn test_subunit() {
            assert_eq!(parse("B2{3}").unwrap(), Component::multiplicity(b(2), 3));
        }

        #[test]
        fn test_group() {
            assert_eq!(
                parse("(B1 | B2){2}").unwrap(),
                Component::multiplicity(Component::alternation([b(1), b(2)]), 2)
            );
        }

        #[test]
        fn test_zero_count() {
            assert_eq!(parse("B1{0}").unwrap(), Component::multiplicity(b(1), 0));
        }

        #[test]
        fn test_multi_digit_count() {
            assert_eq!(parse("B1{12}").unwrap(), Component::multiplicity(b(1), 12));
        }

        #[test]
        fn test_whitespace_inside_braces() {
            assert_eq!(parse("B1 { 3 }").unwrap(), Component::multiplicity(b(1), 3));
        }

        #[test]
        fn test_binds_tighter_than_concatenation() {
            assert_eq!(
                parse("B1 + B2{2}").unwrap(),
                Component::concatenation(b(1), Component::multiplicity(b(2), 2))
            );
        }

        #[test]
        fn test_nested_through_group() {
            assert_eq!(
                parse("(B1{2}){3}").unwrap(),
                Component::multiplicity(Component::multiplicity(b(1), 2), 3)
            );
        }
    }

    // ========================================================================
    // 5. Optional
    // ========================================================================

    mod optional {
        use super::*;

        #[test]
        fn test_middle_term() {
            assert_eq!(
                parse("B1 + [B2] + B3").unwrap(),
                Component::concatenation(
                    Component::concatenation(b(1), Component::optional(b(2))),
                    b(3)
                )
            );
        }

        #[test]
        fn test_trailing_term() {
            assert_eq!(
                parse("B1 + [B2]").unwrap(),
                Component::concatenation(b(1), Component::optional(b(2)))
            );
        }

        #[test]
        fn test_inner_concatenation() {
            assert_eq!(
                parse("B1 + [B2 + B3] + B4").unwrap(),
                Component::concatenation(
                    Component::concatenation(
                        b(1),
                        Component::optional(Component::concatenation(b(2), b(3)))
                    ),
                    b(4)
                )
            );
        }

        #[test]
        fn test_inner_alternation() {
            assert_eq!(
                parse("B1 + [B2 | B3]").unwrap(),
                Component::concatenation(
                    b(1),
                    Component::optional(Component::alternation([b(2), b(3)]))
                )
            );
        }

        #[test]
        fn test_top_level_optional_rejected() {
            let err = parse("[B3]").unwrap_err();
            assert_eq!(
                err,
                GrammarError::UnexpectedToken {
                    position: 0,
                    expected: "subunit or '('",
                    found: "'['".to_string(),
                }
            );
        }

        #[test]
        fn test_leading_optional_rejected() {
            assert!(parse("[B1] + B2").is_err());
        }

        #[test]
        fn test_optional_alternation_branch_rejected() {
            assert!(parse("B1 | [B2]").is_err());
        }

        #[test]
        fn test_parenthesized_optional_rejected() {
            assert!(parse("([B1])").is_err());
        }

        #[test]
        fn test_optional_cannot_take_multiplicity() {
            let err = parse("B1 + [B2]{2}").unwrap_err();
            assert!(matches!(
                err,
                GrammarError::UnexpectedToken { position: 9, .. }
            ));
        }
    }

    // ========================================================================
    // 6. Errors
    // ========================================================================

    mod errors {
        use super::*;

        #[test]
        fn test_empty() {
            assert_eq!(parse("").unwrap_err(), GrammarError::EmptyDefinition);
            assert_eq!(parse("  \n").unwrap_err(), GrammarError::EmptyDefinition);
        }

        #[test]
        fn test_unexpected_character() {
            assert_eq!(
                parse("B1 & B2").unwrap_err(),
                GrammarError::UnexpectedCharacter {
                    position: 3,
                    character: '&',
                }
            );
        }

        #[test]
        fn test_unclosed_parenthesis() {
            assert_eq!(
                parse("(B1 | B2").unwrap_err(),
                GrammarError::UnexpectedToken {
                    position: 8,
                    expected: "')'",
                    found: "end of input".to_string(),
                }
            );
        }

        #[test]
        fn test_unclosed_bracket() {
            assert!(matches!(
                parse("B1 + [B2").unwrap_err(),
                GrammarError::UnexpectedToken { expected: "']'", .. }
            ));
        }

        #[test]
        fn test_unclosed_brace() {
            assert!(matches!(
                parse("B1{3").unwrap_err(),
                GrammarError::UnexpectedToken { expected: "'}'", .. }
            ));
        }

        #[test]
        fn test_missing_count() {
            assert!(matches!(
                parse("B1{}").unwrap_err(),
                GrammarError::UnexpectedToken {
                    position: 3,
                    expected: "multiplicity count",
                    ..
                }
            ));
        }

        #[test]
        fn test_non_numeric_count() {
            assert!(matches!(
                parse("B1{x}").unwrap_err(),
                GrammarError::UnexpectedToken { position: 3, .. }
            ));
        }

        #[test]
        fn test_count_overflow() {
            assert_eq!(
                parse("B1{99999999999}").unwrap_err(),
                GrammarError::InvalidCount {
                    position: 3,
                    digits: "99999999999".to_string(),
                }
            );
        }

        #[test]
        fn test_empty_alternation_branch() {
            assert!(parse("B1 | | B2").is_err());
            assert!(parse("B1 |").is_err());
            assert!(parse("| B1").is_err());
        }

        #[test]
        fn test_dangling_plus() {
            assert!(matches!(
                parse("B1 +").unwrap_err(),
                GrammarError::UnexpectedToken { position: 4, .. }
            ));
        }

        #[test]
        fn test_empty_group() {
            assert!(parse("()").is_err());
            assert!(parse("B1 + []").is_err());
        }

        #[test]
        fn test_trailing_input() {
            assert_eq!(
                parse("B1 B2").unwrap_err(),
                GrammarError::UnexpectedToken {
                    position: 3,
                    expected: "'+', '|' or end of input",
                    found: "identifier 'B2'".to_string(),
                }
            );
        }

        #[test]
        fn test_stray_closer() {
            assert!(parse("B1)").is_err());
            assert!(parse("B1 + B2]").is_err());
        }

        #[test]
        fn test_chained_multiplicity_rejected() {
            assert!(parse("B1{2}{3}").is_err());
        }

        #[test]
        fn test_nesting_at_limit_accepted() {
            let definition = format!(
                "{}B1{}",
                "(".repeat(MAX_NESTING_DEPTH),
                ")".repeat(MAX_NESTING_DEPTH)
            );
            assert_eq!(parse(&definition).unwrap(), b(1));
        }

        #[test]
        fn test_nesting_past_limit_rejected() {
            let definition = format!("B1 + {}B2{}", "[".repeat(129), "]".repeat(129));
            assert_eq!(
                parse(&definition).unwrap_err(),
                GrammarError::NestingTooDeep {
                    position: 5 + MAX_NESTING_DEPTH,
                    limit: MAX_NESTING_DEPTH,
                }
            );
        }

        #[test]
        fn test_extreme_nesting_is_an_error() {
            let definition = format!("{}B1{}", "(".repeat(100_000), ")".repeat(100_000));
            assert!(matches!(
                parse(&definition).unwrap_err(),
                GrammarError::NestingTooDeep { .. }
            ));
        }

        #[test]
        fn test_sequential_groups_do_not_accumulate_depth() {
            let definition = vec!["(B1 | B2)"; 1000].join(" + ");
            assert!(parse(&definition).is_ok());
        }
    }

    // ========================================================================
    // 7. Display round trip
    // ========================================================================

    mod round_trip {
        use super::*;

        #[test]
        fn test_display_reparses_to_same_tree() {
            for definition in [
                "B1 + B1",
                "(B1 + B2) | (B3 + B4)",
                "B2{3}",
                "B1 + [B2] + B3",
                "(B1 | B2){2} + [B3]",
                "B1 + (B2 + B3)",
                "(B1 | B2) | B3 + [B4 | B5{0}]",
                "(B1 + B2){2} + (B3 | B4)",
            ] {
                let component = parse(definition).unwrap();
                let rendered = component.to_string();
                assert_eq!(parse(&rendered).unwrap(), component, "{}", rendered);
            }
        }

        #[test]
        fn test_parse_is_deterministic() {
            let definition = "B1 + [B2 | B3{2}] + (B4 | B5)";
            assert_eq!(parse(definition).unwrap(), parse(definition).unwrap());
        }
    }
}
