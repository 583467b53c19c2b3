//! Configuration types for the translator.

use std::num::NonZeroUsize;
use std::time::Duration;

/// How the source-concept and relationship-kind filters combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterMode {
    /// A row must match both the source concept and the relationship kind.
    #[default]
    RequireAll,
    /// A row matching either filter is returned. Reproduces the historical
    /// OR-joined filter list; rows for unrelated concepts can leak through.
    AnyOf,
}

/// Configuration for the [`Translator`](crate::Translator).
///
/// # Example
///
/// ```rust
/// use omop_translate::{CacheConfig, FilterMode, TranslatorConfig};
/// use std::num::NonZeroUsize;
/// use std::time::Duration;
///
/// let config = TranslatorConfig::builder()
///     .with_cache(CacheConfig::default())
///     .with_filter_mode(FilterMode::RequireAll)
///     .with_max_matches(25)
///     .build();
///
/// assert_eq!(config.max_matches.map(|n| n.get()), Some(25));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslatorConfig {
    /// Cache configuration (None = caching disabled).
    pub cache: Option<CacheConfig>,
    /// Relationship filter combination.
    pub filter_mode: FilterMode,
    /// Maximum number of matches per outcome (None = unlimited).
    pub max_matches: Option<NonZeroUsize>,
}

impl TranslatorConfig {
    /// Creates a new builder for TranslatorConfig.
    pub fn builder() -> TranslatorConfigBuilder {
        TranslatorConfigBuilder::default()
    }
}

/// Builder for TranslatorConfig.
#[derive(Debug, Clone, Default)]
pub struct TranslatorConfigBuilder {
    cache: Option<CacheConfig>,
    filter_mode: FilterMode,
    max_matches: Option<NonZeroUsize>,
}

impl TranslatorConfigBuilder {
    /// Enables caching with the given configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the relationship filter combination.
    pub fn with_filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }

    /// Caps the number of matches kept per outcome. Zero means unlimited.
    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = NonZeroUsize::new(max_matches);
        self
    }

    /// Builds the TranslatorConfig.
    pub fn build(self) -> TranslatorConfig {
        TranslatorConfig {
            cache: self.cache,
            filter_mode: self.filter_mode,
            max_matches: self.max_matches,
        }
    }
}

/// Configuration for the translation cache.
///
/// ```rust
/// use omop_translate::CacheConfig;
/// use std::num::NonZeroUsize;
/// use std::time::Duration;
///
/// let cache = CacheConfig {
///     max_entries: 50_000,
///     ttl: Duration::from_secs(600),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    /// Maximum number of cached outcomes.
    pub max_entries: usize,
    /// Time-to-live for cached outcomes.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(300),
        }
    }
}
