//! Abstract Syntax Tree types for protein definitions.

use std::fmt;

/// A protein component: one node of a parsed protein definition.
///
/// The tree is built once by [`crate::parse`] and never shared or mutated.
///
/// # Example
///
/// ```rust
/// use ppss::{parse, Component};
///
/// let component = parse("B1 + B2").unwrap();
/// assert_eq!(
///     component,
///     Component::concatenation(Component::subunit("B1"), Component::subunit("B2"))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Component {
    /// A single named subunit.
    /// Example: `B1`
    Subunit(String),

    /// `left` immediately followed by `right`.
    /// Syntax: `component + component`
    /// Example: `B1 + B2`
    Concatenation {
        /// The leading component.
        left: Box<Component>,
        /// The trailing component.
        right: Box<Component>,
    },

    /// Exactly one of two or more options.
    /// Syntax: `component | component`
    /// Example: `(B1 + B2) | B3`
    Alternation(Vec<Component>),

    /// A component repeated a fixed number of times. Each repetition
    /// independently takes any of the component's expansions.
    /// Syntax: `subunit{n}` or `(alternation){n}`
    /// Example: `(B1 | B2){2}`
    Multiplicity {
        /// The repeated component.
        component: Box<Component>,
        /// Number of repetitions; zero is allowed.
        count: u32,
    },

    /// A component that may be present or absent.
    /// Syntax: `[alternation]`
    /// Example: `B1 + [B2]`
    Optional(Box<Component>),
}

impl Component {
    /// Creates a subunit.
    pub fn subunit(id: impl Into<String>) -> Self {
        Component::Subunit(id.into())
    }

    /// Creates a concatenation of two components.
    pub fn concatenation(left: Component, right: Component) -> Self {
        Component::Concatenation {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates an alternation over the given options.
    pub fn alternation(options: impl IntoIterator<Item = Component>) -> Self {
        Component::Alternation(options.into_iter().collect())
    }

    /// Creates a multiplicity.
    pub fn multiplicity(component: Component, count: u32) -> Self {
        Component::Multiplicity {
            component: Box::new(component),
            count,
        }
    }

    /// Creates an optional component.
    pub fn optional(component: Component) -> Self {
        Component::Optional(Box::new(component))
    }

    /// Returns true if this is a single subunit.
    pub fn is_subunit(&self) -> bool {
        matches!(self, Component::Subunit(_))
    }

    /// Returns true if this is an optional component.
    pub fn is_optional(&self) -> bool {
        matches!(self, Component::Optional(_))
    }

    /// Returns the identifier if this is a single subunit.
    pub fn subunit_id(&self) -> Option<&str> {
        match self {
            Component::Subunit(id) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Returns every subunit identifier in source order, repeats included.
    pub fn subunit_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_subunit_ids(&mut ids);
        ids
    }

    fn collect_subunit_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        match self {
            Component::Subunit(id) => ids.push(id),
            Component::Concatenation { left, right } => {
                left.collect_subunit_ids(ids);
                right.collect_subunit_ids(ids);
            }
            Component::Alternation(options) => {
                for option in options {
                    option.collect_subunit_ids(ids);
                }
            }
            Component::Multiplicity { component, .. } | Component::Optional(component) => {
                component.collect_subunit_ids(ids)
            }
        }
    }

    /// Returns how deeply components nest; a lone subunit has depth 1.
    ///
    /// The left operand of a concatenation sits at the same level as the
    /// concatenation itself, so a long `a + b + c + ...` chain stays shallow.
    /// Computed without recursion, so any tree can be measured.
    ///
    /// ```rust
    /// let component = ppss::parse("B1 + B2 + [B3]").unwrap();
    /// assert_eq!(component.nesting_depth(), 3);
    /// ```
    pub fn nesting_depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Component, usize)> = vec![(self, 1)];
        while let Some((component, level)) = pending.pop() {
            deepest = deepest.max(level);
            match component {
                Component::Subunit(_) => {}
                Component::Concatenation { left, right } => {
                    pending.push((&**left, level));
                    pending.push((&**right, level + 1));
                }
                Component::Alternation(options) => {
                    pending.extend(options.iter().map(|option| (option, level + 1)));
                }
                Component::Multiplicity { component, .. } | Component::Optional(component) => {
                    pending.push((&**component, level + 1))
                }
            }
        }
        deepest
    }

    /// Number of structures this component expands to, without expanding it.
    ///
    /// Saturates at `u128::MAX`.
    ///
    /// ```rust
    /// let component = ppss::parse("(B1 | B2){2} + [B3]").unwrap();
    /// assert_eq!(component.structure_count(), 8);
    /// ```
    pub fn structure_count(&self) -> u128 {
        match self {
            Component::Subunit(_) => 1,
            Component::Concatenation { left, right } => left
                .structure_count()
                .saturating_mul(right.structure_count()),
            Component::Alternation(options) => options
                .iter()
                .fold(0u128, |acc, option| acc.saturating_add(option.structure_count())),
            Component::Multiplicity { component, count } => {
                component.structure_count().saturating_pow(*count)
            }
            Component::Optional(component) => component.structure_count().saturating_add(1),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Subunit(id) => write!(f, "{}", id),
            Component::Concatenation { left, right } => {
                if matches!(**left, Component::Alternation(_)) {
                    write!(f, "({})", left)?;
                } else {
                    write!(f, "{}", left)?;
                }
                write!(f, " + ")?;
                match **right {
                    Component::Alternation(_) | Component::Concatenation { .. } => {
                        write!(f, "({})", right)
                    }
                    _ => write!(f, "{}", right),
                }
            }
            Component::Alternation(options) => {
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    if matches!(option, Component::Alternation(_)) {
                        write!(f, "({})", option)?;
                    } else {
                        write!(f, "{}", option)?;
                    }
                }
                Ok(())
            }
            Component::Multiplicity { component, count } => {
                if component.is_subunit() {
                    write!(f, "{}{{{}}}", component, count)
                } else {
                    write!(f, "({}){{{}}}", component, count)
                }
            }
            Component::Optional(component) => write!(f, "[{}]", component),
        }
    }
}
