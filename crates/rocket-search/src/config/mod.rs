use crate::error::RocketSearchError;

/// Configuration for proximity searches.
///
/// Use [`SearchConfigBuilder`] for an ergonomic way to create configurations
/// with sensible defaults.
///
/// ```rust
/// use rocket_search::SearchConfig;
///
/// let config = SearchConfig::builder().default_limit(5).case_sensitive(true).build();
/// assert_eq!(config.default_limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Limit used by requests created through the searcher
    pub default_limit: usize,
    /// Requests asking for more results than this are rejected
    pub max_limit: usize,
    /// Match query text case-sensitively
    pub case_sensitive: bool,
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 1000,
            case_sensitive: false,
        }
    }
}

/// Builder for creating search configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Create a new builder with sensible defaults
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Create a builder for search-as-you-type dropdowns (a handful of results)
    pub fn autocomplete() -> Self {
        let mut builder = Self::new();
        builder.config.default_limit = 5;
        builder.config.max_limit = 25;
        builder
    }

    /// Create a builder for listing pages that may show every row
    pub fn exhaustive() -> Self {
        let mut builder = Self::new();
        builder.config.default_limit = 100;
        builder.config.max_limit = usize::MAX;
        builder
    }

    /// Set the limit used by requests created through the searcher
    pub fn default_limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    /// Set the largest limit a request may ask for
    pub fn max_limit(mut self, limit: usize) -> Self {
        self.config.max_limit = limit;
        self
    }

    /// Match query text case-sensitively
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.config.case_sensitive = enabled;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SearchConfig {
        self.config
    }

    /// Build the final configuration, rejecting inconsistent limits
    pub fn try_build(self) -> Result<SearchConfig, RocketSearchError> {
        let SearchConfig {
            default_limit,
            max_limit,
            ..
        } = self.config;
        if default_limit == 0 {
            return Err(RocketSearchError::ConfigError(
                "default_limit must be at least 1".to_string(),
            ));
        }
        if default_limit > max_limit {
            return Err(RocketSearchError::ConfigError(format!(
                "default_limit {default_limit} exceeds max_limit {max_limit}"
            )));
        }
        Ok(self.config)
    }
}
