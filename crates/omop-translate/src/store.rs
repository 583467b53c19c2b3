//! In-memory concept store.

use std::collections::HashMap;

use omop_vocab::{
    Concept, ConceptId, ConceptRelationship, RelationshipQuery, VocabError, VocabResult,
};

use crate::traits::{ConceptLookup, RelationshipLookup};

/// A concept and relationship store held entirely in memory.
///
/// Relationships are returned in insertion order. Useful for small
/// vocabularies, fixtures, and tests.
///
/// # Example
///
/// ```rust
/// use omop_translate::{ConceptLookup, InMemoryConceptStore};
/// use omop_vocab::{Concept, ConceptRelationship};
///
/// let mut store = InMemoryConceptStore::new();
/// store.add_concept(Concept::new(201826, "SNOMED", "44054006"))?;
/// store.add_concept(Concept::new(45576876, "ICD10CM", "E11"))?;
/// store.add_relationship(ConceptRelationship::new(201826, 45576876, "SNOMED - ICD10CM eq"));
///
/// assert!(store.find_concept_by_code("SNOMED", "44054006")?.is_some());
/// # Ok::<(), omop_vocab::VocabError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryConceptStore {
    concepts: HashMap<ConceptId, Concept>,
    by_code: HashMap<(String, String), ConceptId>,
    relationships: Vec<ConceptRelationship>,
}

impl InMemoryConceptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from concepts and relationships.
    pub fn from_parts(
        concepts: impl IntoIterator<Item = Concept>,
        relationships: impl IntoIterator<Item = ConceptRelationship>,
    ) -> VocabResult<Self> {
        let mut store = Self::new();
        for concept in concepts {
            store.add_concept(concept)?;
        }
        for relationship in relationships {
            store.add_relationship(relationship);
        }
        Ok(store)
    }

    /// Adds a concept.
    ///
    /// Fails if the id or the `(vocabulary_id, concept_code)` pair is already
    /// taken.
    pub fn add_concept(&mut self, concept: Concept) -> VocabResult<()> {
        let key = (concept.vocabulary_id.clone(), concept.concept_code.clone());
        if self.concepts.contains_key(&concept.concept_id) || self.by_code.contains_key(&key) {
            return Err(VocabError::DuplicateConcept {
                vocabulary_id: concept.vocabulary_id,
                concept_code: concept.concept_code,
            });
        }

        self.by_code.insert(key, concept.concept_id);
        self.concepts.insert(concept.concept_id, concept);
        Ok(())
    }

    /// Appends a relationship row. Endpoints are not checked.
    pub fn add_relationship(&mut self, relationship: ConceptRelationship) {
        self.relationships.push(relationship);
    }

    /// Returns the number of concepts.
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Returns the number of relationship rows.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }
}

impl ConceptLookup for InMemoryConceptStore {
    fn find_concept_by_code(
        &self,
        vocabulary_id: &str,
        concept_code: &str,
    ) -> VocabResult<Option<Concept>> {
        let key = (vocabulary_id.to_string(), concept_code.to_string());
        Ok(self
            .by_code
            .get(&key)
            .and_then(|id| self.concepts.get(id))
            .cloned())
    }

    fn find_concept_by_id(&self, concept_id: ConceptId) -> VocabResult<Option<Concept>> {
        Ok(self.concepts.get(&concept_id).cloned())
    }
}

impl RelationshipLookup for InMemoryConceptStore {
    fn find_relationships(
        &self,
        query: &RelationshipQuery,
    ) -> VocabResult<Vec<ConceptRelationship>> {
        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(self
            .relationships
            .iter()
            .filter(|row| query.matches(row))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omop_vocab::Predicate;

    fn store() -> InMemoryConceptStore {
        InMemoryConceptStore::from_parts(
            [
                Concept::new(1, "SNOMED", "A"),
                Concept::new(2, "ICD10CM", "B1"),
                Concept::new(3, "ICD10CM", "B2"),
            ],
            [
                ConceptRelationship::new(1, 3, "SNOMED - ICD10CM eq"),
                ConceptRelationship::new(1, 2, "SNOMED - ICD10CM eq"),
                ConceptRelationship::new(2, 1, "ICD10CM - SNOMED eq"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_counts() {
        let store = store();
        assert_eq!(store.concept_count(), 3);
        assert_eq!(store.relationship_count(), 3);
    }

    #[test]
    fn test_find_by_code_and_id() {
        let store = store();
        assert_eq!(
            store
                .find_concept_by_code("ICD10CM", "B2")
                .unwrap()
                .map(|c| c.concept_id),
            Some(3)
        );
        assert!(store.find_concept_by_code("SNOMED", "B2").unwrap().is_none());
        assert_eq!(
            store.find_concept_by_id(1).unwrap().map(|c| c.concept_code),
            Some("A".to_string())
        );
        assert!(store.find_concept_by_id(99).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_concepts_rejected() {
        let mut store = store();
        let err = store
            .add_concept(Concept::new(10, "SNOMED", "A"))
            .unwrap_err();
        assert!(matches!(err, VocabError::DuplicateConcept { .. }));

        assert!(store.add_concept(Concept::new(1, "LOINC", "Z")).is_err());
        assert_eq!(store.concept_count(), 3);
    }

    #[test]
    fn test_relationships_keep_insertion_order() {
        let store = store();
        let rows = store
            .find_relationships(&RelationshipQuery::new(Predicate::source_concept(1)))
            .unwrap();
        let targets: Vec<ConceptId> = rows.iter().map(|r| r.concept_id_2).collect();
        assert_eq!(targets, vec![3, 2]);
    }

    #[test]
    fn test_relationship_limit() {
        let store = store();
        let rows = store
            .find_relationships(&RelationshipQuery::new(Predicate::source_concept(1)).with_limit(1))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].concept_id_2, 3);
    }
}
