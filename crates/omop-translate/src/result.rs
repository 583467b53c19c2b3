//! Translation outcome types.

use std::fmt;
use std::time::Duration;

use omop_vocab::ConceptId;

/// Equivalence reported for every match.
pub const EQUIVALENT: &str = "equivalent";

/// One target coding produced by a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetMatch {
    /// Semantic closeness of the match (always [`EQUIVALENT`]).
    pub equivalence: String,
    /// The target system identifier the caller asked for.
    pub target_system: String,
    /// Vocabulary id of the target concept.
    pub target_vocabulary: String,
    /// Code of the target concept.
    pub target_code: String,
    /// Store id of the target concept.
    pub target_concept_id: ConceptId,
    /// Display name of the target concept, when known.
    pub target_display: Option<String>,
}

/// Why a translation produced no matches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NotFoundReason {
    /// A source or target system has no vocabulary mapping.
    UnknownVocabulary(String),
    /// The source code is not in the concept store.
    ConceptNotFound {
        /// Normalized source vocabulary.
        vocabulary: String,
        /// Source code.
        code: String,
    },
    /// The concept exists but no equivalence rows lead to the target.
    NoMappingKnown,
    /// A store call failed.
    StoreUnavailable(String),
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::UnknownVocabulary(system) => {
                write!(f, "unknown terminology system: {system}")
            }
            NotFoundReason::ConceptNotFound { vocabulary, code } => {
                write!(f, "code {code} not found in vocabulary {vocabulary}")
            }
            NotFoundReason::NoMappingKnown => write!(f, "no mapping known"),
            NotFoundReason::StoreUnavailable(message) => {
                write!(f, "concept store unavailable: {message}")
            }
        }
    }
}

/// Result of a translation.
///
/// `found` is true exactly when `matches` is non-empty. Matches keep the
/// order the relationship store returned them in, and a single source code
/// may yield several.
///
/// # Example
///
/// ```ignore
/// let outcome = translator.translate("44054006", "http://snomed.info/sct", "http://hl7.org/fhir/sid/icd-10-cm");
///
/// if outcome.found {
///     for m in &outcome {
///         println!("{} {}", m.equivalence, m.target_code);
///     }
/// } else {
///     println!("not found: {}", outcome.reason.unwrap());
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslationOutcome {
    /// Whether any target coding was found.
    pub found: bool,
    /// Target codings, in store order.
    pub matches: Vec<TargetMatch>,
    /// Set when `found` is false.
    pub reason: Option<NotFoundReason>,
    /// Execution statistics.
    pub stats: TranslationStats,
}

impl TranslationOutcome {
    /// Creates an outcome from matches. Empty matches yield a not-found
    /// outcome with [`NotFoundReason::NoMappingKnown`].
    pub fn found(matches: Vec<TargetMatch>, stats: TranslationStats) -> Self {
        if matches.is_empty() {
            return Self::not_found(NotFoundReason::NoMappingKnown, stats);
        }
        Self {
            found: true,
            matches,
            reason: None,
            stats,
        }
    }

    /// Creates a not-found outcome.
    pub fn not_found(reason: NotFoundReason, stats: TranslationStats) -> Self {
        Self {
            found: false,
            matches: Vec::new(),
            reason: Some(reason),
            stats,
        }
    }

    /// Returns the number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns true if there are no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns an iterator over the matches.
    pub fn iter(&self) -> impl Iterator<Item = &TargetMatch> {
        self.matches.iter()
    }

    /// Returns the target codes in match order.
    pub fn target_codes(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.target_code.as_str()).collect()
    }

    /// Returns a human-readable message for not-found outcomes.
    pub fn message(&self) -> Option<String> {
        self.reason.as_ref().map(ToString::to_string)
    }
}

impl IntoIterator for TranslationOutcome {
    type Item = TargetMatch;
    type IntoIter = std::vec::IntoIter<TargetMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl<'a> IntoIterator for &'a TranslationOutcome {
    type Item = &'a TargetMatch;
    type IntoIter = std::slice::Iter<'a, TargetMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// Statistics from a translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslationStats {
    /// Total duration.
    pub duration: Duration,
    /// Relationship rows returned by the store.
    pub relationships_examined: usize,
    /// Whether the outcome was served from cache.
    pub cache_hit: bool,
}

impl TranslationStats {
    /// Creates new translation stats.
    pub fn new(duration: Duration, relationships_examined: usize, cache_hit: bool) -> Self {
        Self {
            duration,
            relationships_examined,
            cache_hit,
        }
    }
}
