//! Protein expander implementation.

use std::time::Instant;

use ppss::Component;
use tracing::{debug, instrument};

use crate::config::ExpanderConfig;
use crate::error::{ExpansionError, ProteinResult};
use crate::result::{ExpansionResult, ExpansionStats, Structure};

/// Deepest component tree [`ProteinExpander::expand`] accepts, as measured by
/// [`Component::nesting_depth`]. Every tree [`ppss::parse`] produces fits.
pub const MAX_EXPANSION_DEPTH: usize = 1024;

/// Enumerates every concrete structure a protein definition denotes.
///
/// The expander holds only its configuration; each call allocates and
/// returns its own tree and results, so one expander can serve any number
/// of callers.
///
/// | Component | Expansion |
/// |-----------|-----------|
/// | `B1` | `[B1]` |
/// | `l + r` | every `l` expansion followed by every `r` expansion |
/// | `a \| b` | the expansions of `a`, then those of `b` |
/// | `c{n}` | every choice of `n` expansions of `c`, first repetition outermost |
/// | `[c]` | the expansions of `c`, then the empty structure |
///
/// # Example
///
/// ```rust
/// use ppss_expander::ProteinExpander;
///
/// let expander = ProteinExpander::new();
/// let structures = expander.parse_protein("B1 + (B2 | B3) + B4").unwrap();
/// assert_eq!(structures, vec!["B1 + B2 + B4", "B1 + B3 + B4"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProteinExpander {
    config: ExpanderConfig,
}

impl ProteinExpander {
    /// Creates a new expander with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an expander with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ppss_expander::{ExpanderConfig, ProteinExpander};
    ///
    /// let config = ExpanderConfig::builder().with_separator("-").build();
    /// let expander = ProteinExpander::with_config(config);
    /// assert_eq!(expander.parse_protein("B1 + B2").unwrap(), vec!["B1-B2"]);
    /// ```
    pub fn with_config(config: ExpanderConfig) -> Self {
        Self { config }
    }

    /// Returns a reference to the expander configuration.
    pub fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    /// Parses, expands and renders a protein definition.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Every structure joined with the configured separator
    /// * `Err(ProteinError)` - If parsing or expansion fails
    pub fn parse_protein(&self, definition: &str) -> ProteinResult<Vec<String>> {
        let result = self.expand_str(definition)?;
        Ok(result.render(&self.config.separator))
    }

    /// Parses and expands a protein definition.
    #[instrument(level = "debug", skip_all)]
    pub fn expand_str(&self, definition: &str) -> ProteinResult<ExpansionResult> {
        let component = ppss::parse(definition)?;
        Ok(self.expand(&component)?)
    }

    /// Expands a parsed component.
    ///
    /// Fails with [`ExpansionError::BareOptional`] if the root is an optional
    /// component, with [`ExpansionError::DegenerateAlternation`] if any
    /// alternation has fewer than two options, and with
    /// [`ExpansionError::NestingTooDeep`] past [`MAX_EXPANSION_DEPTH`]. None
    /// of these can come out of [`ppss::parse`]; all can be built by hand.
    #[instrument(level = "debug", skip_all)]
    pub fn expand(&self, component: &Component) -> Result<ExpansionResult, ExpansionError> {
        let start = Instant::now();

        if component.is_optional() {
            return Err(ExpansionError::BareOptional);
        }

        let depth = component.nesting_depth();
        if depth > MAX_EXPANSION_DEPTH {
            return Err(ExpansionError::NestingTooDeep {
                depth,
                limit: MAX_EXPANSION_DEPTH,
            });
        }

        let mut nodes_visited = 0;
        let structures = expand_component(component, &mut nodes_visited)?;

        debug!(
            structures = structures.len(),
            nodes_visited, "expanded protein component"
        );

        let stats = ExpansionStats::new(start.elapsed(), nodes_visited);
        Ok(ExpansionResult::new(structures, stats))
    }
}

fn expand_component(
    component: &Component,
    nodes_visited: &mut usize,
) -> Result<Vec<Structure>, ExpansionError> {
    *nodes_visited += 1;

    match component {
        Component::Subunit(id) => Ok(vec![vec![id.clone()]]),
        Component::Concatenation { left, right } => {
            // Walk the left spine so `a + b + c + ...` is one n-way product
            let mut operands = vec![&**right];
            let mut leftmost = &**left;
            while let Component::Concatenation { left, right } = leftmost {
                *nodes_visited += 1;
                operands.push(&**right);
                leftmost = &**left;
            }
            operands.push(leftmost);
            operands.reverse();

            let expanded = operands
                .into_iter()
                .map(|operand| expand_component(operand, nodes_visited))
                .collect::<Result<Vec<_>, _>>()?;
            let parts: Vec<&[Structure]> = expanded.iter().map(Vec::as_slice).collect();
            Ok(cartesian_product(&parts))
        }
        Component::Alternation(options) => {
            if options.len() < 2 {
                return Err(ExpansionError::DegenerateAlternation {
                    options: options.len(),
                });
            }
            let mut structures = Vec::new();
            for option in options {
                structures.extend(expand_component(option, nodes_visited)?);
            }
            Ok(structures)
        }
        Component::Multiplicity { component, count } => {
            let base = expand_component(component, nodes_visited)?;
            let parts = vec![base.as_slice(); *count as usize];
            Ok(cartesian_product(&parts))
        }
        Component::Optional(component) => {
            let mut structures = expand_component(component, nodes_visited)?;
            structures.push(Vec::new());
            Ok(structures)
        }
    }
}

/// One structure per choice of a structure from every part, joined in part
/// order. The first part varies slowest; zero parts yield one empty structure.
fn cartesian_product(parts: &[&[Structure]]) -> Vec<Structure> {
    if parts.iter().any(|part| part.is_empty()) {
        return Vec::new();
    }

    let total = parts
        .iter()
        .fold(1usize, |acc, part| acc.saturating_mul(part.len()));
    let mut structures = Vec::with_capacity(total);
    let mut indices = vec![0usize; parts.len()];

    loop {
        let len = parts
            .iter()
            .zip(&indices)
            .map(|(part, &i)| part[i].len())
            .sum();
        let mut joined = Vec::with_capacity(len);
        for (part, &i) in parts.iter().zip(&indices) {
            joined.extend_from_slice(&part[i]);
        }
        structures.push(joined);

        // Advance the odometer, last part fastest
        let mut slot = parts.len();
        loop {
            if slot == 0 {
                return structures;
            }
            slot -= 1;
            indices[slot] += 1;
            if indices[slot] < parts[slot].len() {
                break;
            }
            indices[slot] = 0;
        }
    }
}
