//! Store traits consumed by the translator.
//!
//! The translator never owns vocabulary data. It reads concepts and concept
//! relationships through [`ConceptLookup`] and [`RelationshipLookup`], which a
//! consuming crate implements for its database layer.
//!
//! # Example: implementing the lookups over a SQL pool
//!
//! ```ignore
//! use omop_translate::{ConceptLookup, RelationshipLookup};
//! use omop_vocab::{Concept, ConceptId, ConceptRelationship, RelationshipQuery, VocabError, VocabResult};
//!
//! impl ConceptLookup for OmopDatabase {
//!     fn find_concept_by_code(&self, vocabulary_id: &str, concept_code: &str) -> VocabResult<Option<Concept>> {
//!         self.query_concept("vocabulary_id = $1 AND concept_code = $2", &[&vocabulary_id, &concept_code])
//!             .map_err(|e| VocabError::Store(e.to_string()))
//!     }
//!
//!     fn find_concept_by_id(&self, concept_id: ConceptId) -> VocabResult<Option<Concept>> {
//!         self.query_concept("concept_id = $1", &[&concept_id])
//!             .map_err(|e| VocabError::Store(e.to_string()))
//!     }
//! }
//!
//! impl RelationshipLookup for OmopDatabase {
//!     fn find_relationships(&self, query: &RelationshipQuery) -> VocabResult<Vec<ConceptRelationship>> {
//!         // RelationshipQuery renders as a SQL predicate via Display.
//!         self.select_relationships(&query.to_string())
//!             .map_err(|e| VocabError::Store(e.to_string()))
//!     }
//! }
//! ```

use omop_vocab::{Concept, ConceptId, ConceptRelationship, RelationshipQuery, VocabResult};

/// Read access to the `concept` table.
pub trait ConceptLookup: Send + Sync {
    /// Finds the concept with `concept_code` in `vocabulary_id`.
    ///
    /// Returns `Ok(None)` if no such concept exists.
    fn find_concept_by_code(
        &self,
        vocabulary_id: &str,
        concept_code: &str,
    ) -> VocabResult<Option<Concept>>;

    /// Finds a concept by id.
    ///
    /// Returns `Ok(None)` if no such concept exists.
    fn find_concept_by_id(&self, concept_id: ConceptId) -> VocabResult<Option<Concept>>;
}

/// Read access to the `concept_relationship` table.
pub trait RelationshipLookup: Send + Sync {
    /// Returns every row satisfying `query`, in store order, honouring
    /// `query.limit`.
    fn find_relationships(&self, query: &RelationshipQuery)
        -> VocabResult<Vec<ConceptRelationship>>;
}
