//! # omop-translate
//!
//! Translates a code in one terminology system into equivalent codes in
//! another, by following equivalence rows of a pre-populated OMOP
//! `concept_relationship` table.
//!
//! ## Key Features
//!
//! - **Store-agnostic** - reads through the [`ConceptLookup`] and
//!   [`RelationshipLookup`] traits
//! - **Never throws** - unknown systems, unknown codes, missing mappings and
//!   store failures all come back as a not-found [`TranslationOutcome`]
//! - **One-to-many** - every matching relationship row yields a match, in
//!   store order
//! - **Optional caching** - LRU + TTL cache of outcomes
//!
//! ## Quick Start
//!
//! ```rust
//! use omop_translate::{InMemoryConceptStore, Translator};
//! use omop_vocab::{Concept, ConceptRelationship, UriVocabularyNormalizer};
//!
//! let store = InMemoryConceptStore::from_parts(
//!     [
//!         Concept::new(3004410, "LOINC", "4548-4"),
//!         Concept::new(4184637, "SNOMED", "43396009"),
//!     ],
//!     [ConceptRelationship::new(3004410, 4184637, "LOINC - SNOMED eq")],
//! )?;
//! let normalizer = UriVocabularyNormalizer::new();
//! let translator = Translator::from_store(&normalizer, &store);
//!
//! let outcome = translator.translate("4548-4", "http://loinc.org", "http://snomed.info/sct");
//! assert!(outcome.found);
//! assert_eq!(outcome.matches[0].target_code, "43396009");
//!
//! let missing = translator.translate("0000-0", "http://loinc.org", "http://snomed.info/sct");
//! assert!(!missing.found);
//! # Ok::<(), omop_vocab::VocabError>(())
//! ```
//!
//! ## With Configuration
//!
//! ```ignore
//! use omop_translate::{CacheConfig, FilterMode, Translator, TranslatorConfig};
//! use std::time::Duration;
//!
//! let config = TranslatorConfig::builder()
//!     .with_cache(CacheConfig {
//!         max_entries: 50_000,
//!         ttl: Duration::from_secs(600),
//!     })
//!     .with_filter_mode(FilterMode::RequireAll)
//!     .build();
//!
//! let translator = Translator::with_config(&normalizer, &db, &db, config);
//! ```
//!
//! ## Logging
//!
//! Emits [`tracing`] events: `error` for unknown systems, unknown codes and
//! store failures, `info` when no mapping is known, `warn` for relationship
//! rows pointing at missing concepts, `debug` for cache hits. No subscriber
//! is installed.
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/Deserialize for outcomes, requests and configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod config;
mod result;
mod store;
mod traits;
mod translator;

// Public re-exports
pub use cache::{CacheKey, CacheStats, TranslationCache};
pub use config::{CacheConfig, FilterMode, TranslatorConfig, TranslatorConfigBuilder};
pub use result::{NotFoundReason, TargetMatch, TranslationOutcome, TranslationStats, EQUIVALENT};
pub use store::InMemoryConceptStore;
pub use traits::{ConceptLookup, RelationshipLookup};
pub use translator::{TranslationRequest, Translator};

// Re-export commonly used types from dependencies for convenience
pub use omop_vocab::{
    Concept, ConceptId, ConceptRelationship, RelationshipQuery, VocabError, VocabResult,
    VocabularyNormalizer,
};
