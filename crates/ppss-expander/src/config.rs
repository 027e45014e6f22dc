//! Configuration types for the protein expander.

/// Separator placed between subunit identifiers when rendering a structure.
pub const DEFAULT_SEPARATOR: &str = " + ";

/// Configuration for the protein expander.
///
/// # Example
///
/// ```rust
/// use ppss_expander::ExpanderConfig;
///
/// let config = ExpanderConfig::builder()
///     .with_separator("-")
///     .build();
/// assert_eq!(config.separator, "-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpanderConfig {
    /// Text placed between subunit identifiers in rendered structures.
    pub separator: String,
}

impl ExpanderConfig {
    /// Creates a new builder for ExpanderConfig.
    pub fn builder() -> ExpanderConfigBuilder {
        ExpanderConfigBuilder::default()
    }
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Builder for ExpanderConfig.
#[derive(Debug, Clone, Default)]
pub struct ExpanderConfigBuilder {
    separator: Option<String>,
}

impl ExpanderConfigBuilder {
    /// Sets the rendering separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Builds the ExpanderConfig.
    pub fn build(self) -> ExpanderConfig {
        ExpanderConfig {
            separator: self
                .separator
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
        }
    }
}
