//! Vocabulary name normalization.
//!
//! Callers name terminology systems by URI (`http://snomed.info/sct`) or OID
//! (`urn:oid:2.16.840.1.113883.6.96`); the concept store names them by
//! `vocabulary_id` (`SNOMED`). A [`VocabularyNormalizer`] bridges the two.

use std::collections::HashMap;

/// Vocabulary ids and system identifiers known out of the box.
pub mod well_known {
    /// SNOMED CT
    pub const SNOMED: &str = "SNOMED";
    /// LOINC
    pub const LOINC: &str = "LOINC";
    /// RxNorm
    pub const RXNORM: &str = "RxNorm";
    /// ICD-9-CM
    pub const ICD9CM: &str = "ICD9CM";
    /// ICD-10-CM
    pub const ICD10CM: &str = "ICD10CM";
    /// ICD-10 (WHO)
    pub const ICD10: &str = "ICD10";
    /// CPT-4
    pub const CPT4: &str = "CPT4";
    /// National Drug Code
    pub const NDC: &str = "NDC";
    /// UCUM units
    pub const UCUM: &str = "UCUM";
    /// CDC vaccine codes
    pub const CVX: &str = "CVX";

    /// `(system identifier, vocabulary_id)` pairs registered by
    /// [`UriVocabularyNormalizer::new`](super::UriVocabularyNormalizer::new).
    pub const SYSTEMS: &[(&str, &str)] = &[
        ("http://snomed.info/sct", SNOMED),
        ("urn:oid:2.16.840.1.113883.6.96", SNOMED),
        ("http://loinc.org", LOINC),
        ("urn:oid:2.16.840.1.113883.6.1", LOINC),
        ("http://www.nlm.nih.gov/research/umls/rxnorm", RXNORM),
        ("urn:oid:2.16.840.1.113883.6.88", RXNORM),
        ("http://hl7.org/fhir/sid/icd-9-cm", ICD9CM),
        ("urn:oid:2.16.840.1.113883.6.103", ICD9CM),
        ("http://hl7.org/fhir/sid/icd-10-cm", ICD10CM),
        ("urn:oid:2.16.840.1.113883.6.90", ICD10CM),
        ("http://hl7.org/fhir/sid/icd-10", ICD10),
        ("urn:oid:2.16.840.1.113883.6.3", ICD10),
        ("http://www.ama-assn.org/go/cpt", CPT4),
        ("urn:oid:2.16.840.1.113883.6.12", CPT4),
        ("http://hl7.org/fhir/sid/ndc", NDC),
        ("urn:oid:2.16.840.1.113883.6.69", NDC),
        ("http://unitsofmeasure.org", UCUM),
        ("urn:oid:2.16.840.1.113883.6.8", UCUM),
        ("http://hl7.org/fhir/sid/cvx", CVX),
        ("urn:oid:2.16.840.1.113883.12.292", CVX),
    ];
}

/// Maps a terminology system identifier to an internal `vocabulary_id`.
///
/// Returns `None` for systems with no vocabulary mapping. An unknown system is
/// an expected condition, so implementations should not treat it as an error.
///
/// Any `Fn(&str) -> Option<String>` closure is a normalizer:
///
/// ```rust
/// use omop_vocab::VocabularyNormalizer;
///
/// let normalizer = |system: &str| (system == "urn:local").then(|| "Local".to_string());
/// assert_eq!(normalizer.normalize("urn:local").as_deref(), Some("Local"));
/// assert!(normalizer.normalize("urn:other").is_none());
/// ```
pub trait VocabularyNormalizer: Send + Sync {
    /// Normalizes `system` into a `vocabulary_id`.
    fn normalize(&self, system: &str) -> Option<String>;
}

impl<F> VocabularyNormalizer for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn normalize(&self, system: &str) -> Option<String> {
        self(system)
    }
}

/// Table-backed normalizer keyed by system URI or OID.
///
/// Lookup trims surrounding whitespace and a trailing `/`. A system that is
/// already a registered `vocabulary_id` (compared case-insensitively)
/// normalizes to that id's canonical spelling.
///
/// # Example
///
/// ```rust
/// use omop_vocab::{UriVocabularyNormalizer, VocabularyNormalizer};
///
/// let normalizer = UriVocabularyNormalizer::new()
///     .with_mapping("http://example.org/local-codes", "Local");
///
/// assert_eq!(normalizer.normalize("http://snomed.info/sct/").as_deref(), Some("SNOMED"));
/// assert_eq!(normalizer.normalize("rxnorm").as_deref(), Some("RxNorm"));
/// assert_eq!(normalizer.normalize("http://example.org/local-codes").as_deref(), Some("Local"));
/// assert!(normalizer.normalize("http://example.org/unknown").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct UriVocabularyNormalizer {
    systems: HashMap<String, String>,
}

impl Default for UriVocabularyNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl UriVocabularyNormalizer {
    /// Creates a normalizer preloaded with [`well_known::SYSTEMS`].
    pub fn new() -> Self {
        let mut normalizer = Self::empty();
        for (system, vocabulary) in well_known::SYSTEMS {
            normalizer.insert(system, vocabulary);
        }
        normalizer
    }

    /// Creates a normalizer with no mappings.
    pub fn empty() -> Self {
        Self {
            systems: HashMap::new(),
        }
    }

    /// Adds or overrides a mapping.
    pub fn with_mapping(mut self, system: &str, vocabulary_id: &str) -> Self {
        self.insert(system, vocabulary_id);
        self
    }

    /// Adds or overrides a mapping in place.
    pub fn insert(&mut self, system: &str, vocabulary_id: &str) {
        self.systems
            .insert(system_key(system).to_string(), vocabulary_id.to_string());
    }

    /// Returns the number of registered system identifiers.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns true if no mappings are registered.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Exact spelling wins; among case-insensitive matches the smallest
    /// spelling is chosen so the result does not depend on hash order.
    fn vocabulary_by_name(&self, name: &str) -> Option<&String> {
        if let Some(exact) = self.systems.values().find(|vocabulary| *vocabulary == name) {
            return Some(exact);
        }
        self.systems
            .values()
            .filter(|vocabulary| vocabulary.eq_ignore_ascii_case(name))
            .min()
    }
}

impl VocabularyNormalizer for UriVocabularyNormalizer {
    fn normalize(&self, system: &str) -> Option<String> {
        let key = system_key(system);
        if key.is_empty() {
            return None;
        }

        self.systems
            .get(key)
            .or_else(|| self.vocabulary_by_name(key))
            .cloned()
    }
}

fn system_key(system: &str) -> &str {
    let trimmed = system.trim();
    trimmed.strip_suffix('/').unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_uris() {
        let normalizer = UriVocabularyNormalizer::new();
        assert_eq!(
            normalizer.normalize("http://snomed.info/sct").as_deref(),
            Some(well_known::SNOMED)
        );
        assert_eq!(
            normalizer.normalize("http://loinc.org").as_deref(),
            Some(well_known::LOINC)
        );
        assert_eq!(
            normalizer
                .normalize("http://hl7.org/fhir/sid/icd-10-cm")
                .as_deref(),
            Some(well_known::ICD10CM)
        );
        assert_eq!(
            normalizer
                .normalize("http://www.nlm.nih.gov/research/umls/rxnorm")
                .as_deref(),
            Some(well_known::RXNORM)
        );
    }

    #[test]
    fn test_builtin_oids() {
        let normalizer = UriVocabularyNormalizer::new();
        assert_eq!(
            normalizer
                .normalize("urn:oid:2.16.840.1.113883.6.96")
                .as_deref(),
            Some(well_known::SNOMED)
        );
    }

    #[test]
    fn test_trailing_slash_and_whitespace() {
        let normalizer = UriVocabularyNormalizer::new();
        assert_eq!(
            normalizer.normalize("  http://loinc.org/ ").as_deref(),
            Some(well_known::LOINC)
        );
    }

    #[test]
    fn test_vocabulary_name_passthrough() {
        let normalizer = UriVocabularyNormalizer::new();
        assert_eq!(normalizer.normalize("SNOMED").as_deref(), Some("SNOMED"));
        assert_eq!(normalizer.normalize("icd10cm").as_deref(), Some("ICD10CM"));
    }

    #[test]
    fn test_unknown_and_empty() {
        let normalizer = UriVocabularyNormalizer::new();
        assert!(normalizer.normalize("http://example.org/nothing").is_none());
        assert!(normalizer.normalize("").is_none());
        assert!(normalizer.normalize("   ").is_none());
        assert!(normalizer.normalize("/").is_none());
    }

    #[test]
    fn test_override_mapping() {
        let normalizer =
            UriVocabularyNormalizer::new().with_mapping("http://loinc.org", "LOINC-LOCAL");
        assert_eq!(
            normalizer.normalize("http://loinc.org").as_deref(),
            Some("LOINC-LOCAL")
        );
    }

    #[test]
    fn test_vocabulary_names_differing_by_case() {
        let normalizer = UriVocabularyNormalizer::empty()
            .with_mapping("urn:a", "Local")
            .with_mapping("urn:b", "LOCAL");

        assert_eq!(normalizer.normalize("Local").as_deref(), Some("Local"));
        assert_eq!(normalizer.normalize("LOCAL").as_deref(), Some("LOCAL"));
        for _ in 0..10 {
            assert_eq!(normalizer.clone().normalize("local").as_deref(), Some("LOCAL"));
        }
    }

    #[test]
    fn test_empty_normalizer() {
        let normalizer = UriVocabularyNormalizer::empty();
        assert!(normalizer.is_empty());
        assert!(normalizer.normalize("http://snomed.info/sct").is_none());
        assert!(normalizer.normalize("SNOMED").is_none());
    }

    #[test]
    fn test_len_counts_system_identifiers() {
        let normalizer = UriVocabularyNormalizer::new();
        assert_eq!(normalizer.len(), well_known::SYSTEMS.len());
    }
}
