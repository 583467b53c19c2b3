//! Relationship kind keys.
//!
//! Cross-vocabulary equivalence rows carry a `relationship_id` built from the
//! source vocabulary, the target vocabulary and an equivalence tag:
//!
//! ```text
//! SNOMED - ICD10CM eq
//! ^^^^^^   ^^^^^^^ ^^
//! source   target  tag
//! ```
//!
//! Stores may append qualifiers after the tag, so lookups match on the key as
//! a prefix rather than by equality.

use std::fmt;

/// Separator between the source and target vocabulary names.
pub const VOCABULARY_SEPARATOR: &str = " - ";

/// Tag marking an equivalence relationship.
pub const EQUIVALENCE_TAG: &str = "eq";

/// Structured form of a `relationship_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationshipKind {
    /// Vocabulary of `concept_id_1`.
    pub source_vocabulary: String,
    /// Vocabulary of `concept_id_2`.
    pub target_vocabulary: String,
    /// Relationship tag (e.g. `eq`).
    pub tag: String,
}

impl RelationshipKind {
    /// Creates a relationship kind with an arbitrary tag.
    pub fn new(
        source_vocabulary: impl Into<String>,
        target_vocabulary: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            source_vocabulary: source_vocabulary.into(),
            target_vocabulary: target_vocabulary.into(),
            tag: tag.into(),
        }
    }

    /// Creates the equivalence kind between two vocabularies.
    pub fn equivalence(source_vocabulary: &str, target_vocabulary: &str) -> Self {
        Self::new(source_vocabulary, target_vocabulary, EQUIVALENCE_TAG)
    }

    /// Returns the LIKE pattern matching this key and any suffix.
    ///
    /// `%` and `_` inside vocabulary names are left as-is; vocabulary ids in
    /// OMOP do not contain them.
    pub fn pattern(&self) -> String {
        format!("{self}%")
    }

    /// Returns true if this is an equivalence relationship.
    pub fn is_equivalence(&self) -> bool {
        self.tag == EQUIVALENCE_TAG
    }

    /// Parses a `relationship_id`.
    ///
    /// Anything after the tag (separated by whitespace) is ignored. Returns
    /// `None` when the separator, either vocabulary, or the tag is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use omop_vocab::RelationshipKind;
    ///
    /// let kind = RelationshipKind::parse("SNOMED - ICD10CM eq (inferred)").unwrap();
    /// assert_eq!(kind.source_vocabulary, "SNOMED");
    /// assert_eq!(kind.target_vocabulary, "ICD10CM");
    /// assert!(kind.is_equivalence());
    ///
    /// assert!(RelationshipKind::parse("Maps to").is_none());
    /// ```
    pub fn parse(relationship_id: &str) -> Option<Self> {
        let (source, rest) = relationship_id.split_once(VOCABULARY_SEPARATOR)?;
        let source = source.trim();
        let mut parts = rest.split_whitespace();
        let target = parts.next()?;
        let tag = parts.next()?;

        if source.is_empty() {
            return None;
        }

        Some(Self::new(source, target, tag))
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{} {}",
            self.source_vocabulary, VOCABULARY_SEPARATOR, self.target_vocabulary, self.tag
        )
    }
}
