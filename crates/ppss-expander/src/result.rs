//! Expansion result types.

use std::time::Duration;

/// One concrete assembly: subunit identifiers in order.
pub type Structure = Vec<String>;

/// Result of expanding a protein component.
///
/// Holds every concrete structure in expansion order, plus statistics.
///
/// # Example
///
/// ```rust
/// use ppss_expander::ProteinExpander;
///
/// let result = ProteinExpander::new().expand_str("B1 + [B2]").unwrap();
///
/// assert_eq!(result.count(), 2);
/// assert_eq!(result.render(" + "), vec!["B1 + B2", "B1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpansionResult {
    /// Every structure, in expansion order.
    pub structures: Vec<Structure>,
    /// Expansion statistics.
    pub stats: ExpansionStats,
}

impl ExpansionResult {
    /// Creates a new ExpansionResult.
    pub fn new(structures: Vec<Structure>, stats: ExpansionStats) -> Self {
        Self { structures, stats }
    }

    /// Returns the number of structures.
    pub fn count(&self) -> usize {
        self.structures.len()
    }

    /// Returns true if there are no structures.
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Returns an iterator over the structures.
    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter()
    }

    /// Renders every structure by joining its identifiers with `separator`.
    pub fn render(&self, separator: &str) -> Vec<String> {
        self.structures
            .iter()
            .map(|structure| render_structure(structure, separator))
            .collect()
    }
}

impl IntoIterator for ExpansionResult {
    type Item = Structure;
    type IntoIter = std::vec::IntoIter<Structure>;

    fn into_iter(self) -> Self::IntoIter {
        self.structures.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExpansionResult {
    type Item = &'a Structure;
    type IntoIter = std::slice::Iter<'a, Structure>;

    fn into_iter(self) -> Self::IntoIter {
        self.structures.iter()
    }
}

/// Joins one structure's identifiers; the empty structure renders as `""`.
pub fn render_structure(structure: &[String], separator: &str) -> String {
    structure.join(separator)
}

/// Statistics from one expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Total expansion duration.
    pub duration: Duration,
    /// Number of tree nodes visited.
    pub nodes_visited: usize,
}

impl ExpansionStats {
    /// Creates new expansion stats.
    pub fn new(duration: Duration, nodes_visited: usize) -> Self {
        Self {
            duration,
            nodes_visited,
        }
    }
}
