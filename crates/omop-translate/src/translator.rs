//! Cross-vocabulary translation.

use std::time::Instant;

use omop_vocab::{
    Concept, ConceptId, ConceptRelationship, Predicate, RelationshipKind, RelationshipQuery,
    VocabError, VocabularyNormalizer,
};
use tracing::{debug, error, info, warn};

use crate::cache::{CacheKey, TranslationCache};
use crate::config::{FilterMode, TranslatorConfig};
use crate::result::{NotFoundReason, TargetMatch, TranslationOutcome, TranslationStats, EQUIVALENT};
use crate::traits::{ConceptLookup, RelationshipLookup};

/// A single translation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslationRequest {
    /// Source code.
    pub code: String,
    /// Source terminology system.
    pub system: String,
    /// Target terminology system.
    pub target_system: String,
}

impl TranslationRequest {
    /// Creates a request.
    pub fn new(
        code: impl Into<String>,
        system: impl Into<String>,
        target_system: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            system: system.into(),
            target_system: target_system.into(),
        }
    }
}

/// Translates codes between vocabularies using equivalence relationships.
///
/// Every failure mode (unknown system, unknown code, no relationship rows,
/// store errors) produces a not-found [`TranslationOutcome`] and a log entry;
/// `translate` never returns an error.
///
/// # Example
///
/// ```rust
/// use omop_translate::{InMemoryConceptStore, Translator};
/// use omop_vocab::{Concept, ConceptRelationship, UriVocabularyNormalizer};
///
/// let mut store = InMemoryConceptStore::new();
/// store.add_concept(Concept::new(201826, "SNOMED", "44054006"))?;
/// store.add_concept(Concept::new(45576876, "ICD10CM", "E11"))?;
/// store.add_relationship(ConceptRelationship::new(201826, 45576876, "SNOMED - ICD10CM eq"));
///
/// let normalizer = UriVocabularyNormalizer::new();
/// let translator = Translator::from_store(&normalizer, &store);
///
/// let outcome = translator.translate(
///     "44054006",
///     "http://snomed.info/sct",
///     "http://hl7.org/fhir/sid/icd-10-cm",
/// );
/// assert!(outcome.found);
/// assert_eq!(outcome.target_codes(), vec!["E11"]);
/// # Ok::<(), omop_vocab::VocabError>(())
/// ```
pub struct Translator<'a> {
    normalizer: &'a dyn VocabularyNormalizer,
    concepts: &'a dyn ConceptLookup,
    relationships: &'a dyn RelationshipLookup,
    config: TranslatorConfig,
    cache: Option<TranslationCache>,
}

/// Whether an outcome may be cached. Store failures are transient.
fn is_cacheable(outcome: &TranslationOutcome) -> bool {
    !matches!(outcome.reason, Some(NotFoundReason::StoreUnavailable(_)))
}

impl<'a> Translator<'a> {
    /// Creates a translator with default configuration.
    pub fn new(
        normalizer: &'a dyn VocabularyNormalizer,
        concepts: &'a dyn ConceptLookup,
        relationships: &'a dyn RelationshipLookup,
    ) -> Self {
        Self::with_config(
            normalizer,
            concepts,
            relationships,
            TranslatorConfig::default(),
        )
    }

    /// Creates a translator with custom configuration.
    pub fn with_config(
        normalizer: &'a dyn VocabularyNormalizer,
        concepts: &'a dyn ConceptLookup,
        relationships: &'a dyn RelationshipLookup,
        config: TranslatorConfig,
    ) -> Self {
        let cache = config.cache.clone().map(TranslationCache::new);
        Self {
            normalizer,
            concepts,
            relationships,
            config,
            cache,
        }
    }

    /// Creates a translator over a store serving both concepts and
    /// relationships.
    pub fn from_store<S>(normalizer: &'a dyn VocabularyNormalizer, store: &'a S) -> Self
    where
        S: ConceptLookup + RelationshipLookup,
    {
        Self::new(normalizer, store, store)
    }

    /// Returns a reference to the cache if enabled.
    pub fn cache(&self) -> Option<&TranslationCache> {
        self.cache.as_ref()
    }

    /// Returns a reference to the translator configuration.
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translates `code` from `system` into `target_system`.
    ///
    /// # Arguments
    ///
    /// * `code` - Source code, matched exactly
    /// * `system` - Source terminology system (URI, OID or vocabulary id)
    /// * `target_system` - Target terminology system
    ///
    /// Surrounding whitespace is stripped from both systems; matches report
    /// the stripped `target_system`.
    pub fn translate(&self, code: &str, system: &str, target_system: &str) -> TranslationOutcome {
        let start = Instant::now();
        let system = system.trim();
        let target_system = target_system.trim();
        let key = CacheKey::new(code, system, target_system);

        if let Some(cache) = &self.cache {
            if let Some(mut outcome) = cache.get(&key) {
                debug!(code, system, target_system, "translation served from cache");
                outcome.stats = TranslationStats::new(start.elapsed(), 0, true);
                return outcome;
            }
        }

        let mut examined = 0;
        let outcome = match self.resolve(code, system, target_system, &mut examined) {
            Ok(matches) => TranslationOutcome::found(
                matches,
                TranslationStats::new(start.elapsed(), examined, false),
            ),
            Err(reason) => TranslationOutcome::not_found(
                reason,
                TranslationStats::new(start.elapsed(), examined, false),
            ),
        };

        if let Some(cache) = &self.cache {
            if is_cacheable(&outcome) {
                cache.set(key, outcome.clone());
            }
        }

        outcome
    }

    /// Translates a request.
    pub fn translate_request(&self, request: &TranslationRequest) -> TranslationOutcome {
        self.translate(&request.code, &request.system, &request.target_system)
    }

    /// Translates several requests, returning outcomes in request order.
    pub fn translate_many<'r, I>(&self, requests: I) -> Vec<TranslationOutcome>
    where
        I: IntoIterator<Item = &'r TranslationRequest>,
    {
        requests
            .into_iter()
            .map(|request| self.translate_request(request))
            .collect()
    }

    /// Builds the relationship query for a source concept.
    pub fn relationship_query(
        &self,
        source_concept_id: ConceptId,
        kind: &RelationshipKind,
    ) -> RelationshipQuery {
        let filters = vec![
            Predicate::source_concept(source_concept_id),
            Predicate::relationship_like(kind.pattern()),
        ];

        let predicate = match self.config.filter_mode {
            FilterMode::RequireAll => Predicate::all(filters),
            FilterMode::AnyOf => Predicate::any(filters),
        };

        RelationshipQuery::new(predicate)
    }

    fn resolve(
        &self,
        code: &str,
        system: &str,
        target_system: &str,
        examined: &mut usize,
    ) -> Result<Vec<TargetMatch>, NotFoundReason> {
        let source_vocabulary = self.normalize(system)?;
        let target_vocabulary = self.normalize(target_system)?;
        let kind = RelationshipKind::equivalence(&source_vocabulary, &target_vocabulary);

        let source = self
            .concepts
            .find_concept_by_code(&source_vocabulary, code)
            .map_err(|e| store_failure(&e, "concept lookup by code"))?
            .ok_or_else(|| {
                error!(
                    code,
                    vocabulary = %source_vocabulary,
                    "source code not found in concept store"
                );
                NotFoundReason::ConceptNotFound {
                    vocabulary: source_vocabulary.clone(),
                    code: code.to_string(),
                }
            })?;

        let query = self.relationship_query(source.concept_id, &kind);
        let rows = self
            .relationships
            .find_relationships(&query)
            .map_err(|e| store_failure(&e, "relationship lookup"))?;
        *examined = rows.len();

        if rows.is_empty() {
            info!(
                code,
                concept_id = source.concept_id,
                relationship = %kind,
                "no mapping known"
            );
            return Err(NotFoundReason::NoMappingKnown);
        }

        let mut matches = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(target) = self.target_concept(row)? {
                matches.push(TargetMatch {
                    equivalence: EQUIVALENT.to_string(),
                    target_system: target_system.to_string(),
                    target_vocabulary: target.vocabulary_id,
                    target_code: target.concept_code,
                    target_concept_id: target.concept_id,
                    target_display: target.concept_name,
                });
            }
        }

        if matches.is_empty() {
            info!(
                code,
                concept_id = source.concept_id,
                relationship = %kind,
                "no mapping known: every target concept is missing"
            );
            return Err(NotFoundReason::NoMappingKnown);
        }

        if let Some(max) = self.config.max_matches {
            matches.truncate(max.get());
        }

        Ok(matches)
    }

    fn normalize(&self, system: &str) -> Result<String, NotFoundReason> {
        self.normalizer.normalize(system).ok_or_else(|| {
            error!(system, "unknown terminology system");
            NotFoundReason::UnknownVocabulary(system.to_string())
        })
    }

    fn target_concept(&self, row: &ConceptRelationship) -> Result<Option<Concept>, NotFoundReason> {
        let target = self
            .concepts
            .find_concept_by_id(row.concept_id_2)
            .map_err(|e| store_failure(&e, "concept lookup by id"))?;

        if target.is_none() {
            warn!(
                concept_id = row.concept_id_2,
                relationship = %row.relationship_id,
                "relationship target concept missing, skipping row"
            );
        }

        Ok(target)
    }
}

fn store_failure(err: &VocabError, operation: &str) -> NotFoundReason {
    error!(error = %err, operation, "concept store call failed");
    NotFoundReason::StoreUnavailable(err.to_string())
}

impl std::fmt::Debug for Translator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
