//! Concept and concept relationship rows.

use crate::ConceptId;

/// Concept id OMOP uses for "no matching concept".
pub const NO_MATCHING_CONCEPT: ConceptId = 0;

/// A row of the OMOP `concept` table.
///
/// A concept is unique per `(vocabulary_id, concept_code)` pair.
///
/// # Examples
///
/// ```
/// use omop_vocab::Concept;
///
/// let concept = Concept::new(201826, "SNOMED", "44054006")
///     .with_name("Type 2 diabetes mellitus");
///
/// assert_eq!(concept.concept_id, 201826);
/// assert!(concept.is_in_vocabulary("SNOMED"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concept {
    /// Store-internal identifier.
    pub concept_id: ConceptId,
    /// Vocabulary the code belongs to (e.g. `SNOMED`, `ICD10CM`).
    pub vocabulary_id: String,
    /// Code within the vocabulary.
    pub concept_code: String,
    /// Display name, when the store carries one.
    pub concept_name: Option<String>,
}

impl Concept {
    /// Creates a concept without a display name.
    pub fn new(
        concept_id: ConceptId,
        vocabulary_id: impl Into<String>,
        concept_code: impl Into<String>,
    ) -> Self {
        Self {
            concept_id,
            vocabulary_id: vocabulary_id.into(),
            concept_code: concept_code.into(),
            concept_name: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.concept_name = Some(name.into());
        self
    }

    /// Returns true if this concept belongs to `vocabulary_id`.
    pub fn is_in_vocabulary(&self, vocabulary_id: &str) -> bool {
        self.vocabulary_id == vocabulary_id
    }
}

/// A row of the OMOP `concept_relationship` table.
///
/// Directed edge from `concept_id_1` to `concept_id_2`. Several rows may share
/// the same source concept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptRelationship {
    /// Source concept.
    pub concept_id_1: ConceptId,
    /// Target concept.
    pub concept_id_2: ConceptId,
    /// Relationship kind, e.g. `"SNOMED - ICD10CM eq"`.
    pub relationship_id: String,
}

impl ConceptRelationship {
    /// Creates a relationship row.
    pub fn new(
        concept_id_1: ConceptId,
        concept_id_2: ConceptId,
        relationship_id: impl Into<String>,
    ) -> Self {
        Self {
            concept_id_1,
            concept_id_2,
            relationship_id: relationship_id.into(),
        }
    }
}
