//! Error types for vocabulary access.

use thiserror::Error;

/// Errors raised by vocabulary stores and query descriptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VocabError {
    /// The underlying concept or relationship store failed.
    #[error("store error: {0}")]
    Store(String),

    /// A concept with the same vocabulary and code is already present.
    #[error("duplicate concept: {vocabulary_id}/{concept_code}")]
    DuplicateConcept {
        /// Vocabulary of the rejected concept.
        vocabulary_id: String,
        /// Code of the rejected concept.
        concept_code: String,
    },

    /// A query descriptor the store cannot evaluate.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type for vocabulary operations.
pub type VocabResult<T> = std::result::Result<T, VocabError>;
