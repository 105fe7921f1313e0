//! Configuration for relevance search.

/// Configuration for [`search_locations`](crate::LocationResolver::search_locations)
/// operations.
///
/// # Examples
///
/// ```rust
/// use kaifong::SearchConfig;
///
/// let config = SearchConfig::builder().limit(5).build();
/// assert_eq!(config.limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of suggestions to return
    pub limit: usize,
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

/// Builder for creating search configurations with ergonomic defaults.
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Create a new builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder tuned for keystroke autocomplete (short lists).
    #[must_use]
    pub fn autocomplete() -> Self {
        let mut builder = Self::new();
        builder.config.limit = 5;
        builder
    }

    /// Create a builder tuned for browse-style pickers (longer lists).
    #[must_use]
    pub fn comprehensive() -> Self {
        let mut builder = Self::new();
        builder.config.limit = 25;
        builder
    }

    /// Set the maximum number of suggestions to return.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    /// Build the final configuration.
    #[must_use]
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
