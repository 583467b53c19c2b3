//! # omop-vocab
//!
//! Shared data model for working with a pre-populated OMOP vocabulary:
//! concepts, concept relationships, and the query descriptors used to read
//! relationships out of whatever store holds them.
//!
//! This crate provides:
//! - **Model types**: [`Concept`], [`ConceptRelationship`], [`ConceptId`]
//! - **Relationship kinds**: [`RelationshipKind`] builds and parses
//!   `relationship_id` values such as `"SNOMED - ICD10CM eq"`
//! - **Queries**: a small predicate tree ([`Predicate`], [`RelationshipQuery`])
//!   that stores can translate into SQL or evaluate in memory
//! - **Vocabulary normalization**: [`VocabularyNormalizer`] and the table-backed
//!   [`UriVocabularyNormalizer`] mapping FHIR system URIs to vocabulary ids
//!
//! ## Usage
//!
//! ```rust
//! use omop_vocab::{
//!     ConceptRelationship, Predicate, RelationshipKind, RelationshipQuery,
//!     UriVocabularyNormalizer, VocabularyNormalizer,
//! };
//!
//! let normalizer = UriVocabularyNormalizer::new();
//! let source = normalizer.normalize("http://snomed.info/sct").unwrap();
//! let target = normalizer.normalize("http://hl7.org/fhir/sid/icd-10-cm").unwrap();
//!
//! let kind = RelationshipKind::equivalence(&source, &target);
//! assert_eq!(kind.to_string(), "SNOMED - ICD10CM eq");
//!
//! let query = RelationshipQuery::new(Predicate::all(vec![
//!     Predicate::source_concept(201826),
//!     Predicate::relationship_like(kind.pattern()),
//! ]));
//!
//! let row = ConceptRelationship::new(201826, 45576876, "SNOMED - ICD10CM eq");
//! assert!(query.matches(&row));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod concept;
mod error;
mod query;
mod relationship_kind;
mod vocabulary;

pub use concept::{Concept, ConceptRelationship, NO_MATCHING_CONCEPT};
pub use error::{VocabError, VocabResult};
pub use query::{
    like_matches, Combinator, Comparison, Filter, FilterValue, Predicate, RelationshipField,
    RelationshipQuery,
};
pub use relationship_kind::{RelationshipKind, EQUIVALENCE_TAG, VOCABULARY_SEPARATOR};
pub use vocabulary::{well_known, UriVocabularyNormalizer, VocabularyNormalizer};

/// OMOP concept identifier (`concept.concept_id`).
pub type ConceptId = i64;
