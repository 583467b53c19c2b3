//! Categorical code tables.
//!
//! Each [`CategoricalCodeTable`] is a closed list of `(domain code, concept id)`
//! pairs plus the sentinel entries returned when a code has no real mapping.

use std::fmt;
use std::str::FromStr;

use omop_vocab::ConceptId;
use tracing::debug;

use crate::error::{CategoricalError, CategoricalResult};

/// The categorical value sets with fixed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Category {
    /// FHIR `administrative-gender`.
    AdministrativeSex,
    /// FHIR `organization-type`.
    OrganizationType,
    /// FHIR `observation-category`.
    ObservationCategory,
    /// v3 `ActCode` encounter class.
    EncounterClass,
    /// FHIR `condition-category`.
    ConditionCategory,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::AdministrativeSex,
        Category::OrganizationType,
        Category::ObservationCategory,
        Category::EncounterClass,
        Category::ConditionCategory,
    ];

    /// Returns the kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AdministrativeSex => "administrative-sex",
            Category::OrganizationType => "organization-type",
            Category::ObservationCategory => "observation-category",
            Category::EncounterClass => "encounter-class",
            Category::ConditionCategory => "condition-category",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CategoricalError::UnknownCategory(s.to_string()))
    }
}

/// One row of a categorical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CategoricalMappingEntry {
    /// Source code, matched exactly.
    pub domain_code: &'static str,
    /// Target OMOP concept id.
    pub concept_id: ConceptId,
}

impl CategoricalMappingEntry {
    /// Creates an entry.
    pub const fn new(domain_code: &'static str, concept_id: ConceptId) -> Self {
        Self {
            domain_code,
            concept_id,
        }
    }
}

/// What a table does with an absent or empty code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyInput {
    /// Fail with [`CategoricalError::InvalidInput`].
    Reject,
    /// Return the null sentinel.
    Fallback,
}

/// A fixed bidirectional code table for one [`Category`].
///
/// Both sentinels are members of `entries`, so resolving a sentinel's own
/// domain code returns its id like any other entry.
#[derive(Debug)]
pub struct CategoricalCodeTable {
    /// Category served by this table.
    pub category: Category,
    /// All entries, sentinels included. Domain codes are unique.
    pub entries: &'static [CategoricalMappingEntry],
    /// Returned for empty input (under [`EmptyInput::Fallback`]) and for
    /// unrecognized codes when there is no `other_sentinel`.
    pub null_sentinel: CategoricalMappingEntry,
    /// Returned for unrecognized non-empty codes, when defined.
    pub other_sentinel: Option<CategoricalMappingEntry>,
    /// Policy for absent or empty codes.
    pub empty_input: EmptyInput,
}

impl CategoricalCodeTable {
    /// Finds the entry for `domain_code`, without any fallback.
    pub fn lookup(&self, domain_code: &str) -> Option<&CategoricalMappingEntry> {
        self.entries
            .iter()
            .find(|entry| entry.domain_code == domain_code)
    }

    /// Finds the first entry mapping to `concept_id`.
    pub fn find_by_concept_id(&self, concept_id: ConceptId) -> Option<&CategoricalMappingEntry> {
        self.entries
            .iter()
            .find(|entry| entry.concept_id == concept_id)
    }

    /// Resolves a domain code to a concept id.
    ///
    /// Absent or empty input follows [`Self::empty_input`]. Any other code
    /// resolves to its entry, or to the other sentinel (falling back to the
    /// null sentinel) when it is not in the table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use omop_categorical::{tables, CategoricalError};
    ///
    /// let sex = &tables::ADMINISTRATIVE_SEX;
    /// assert_eq!(sex.resolve(Some("female")), Ok(8532));
    /// assert_eq!(sex.resolve(Some("not-a-sex-code")), Ok(8521));
    /// assert!(matches!(sex.resolve(None), Err(CategoricalError::InvalidInput { .. })));
    /// ```
    pub fn resolve(&self, domain_code: Option<&str>) -> CategoricalResult<ConceptId> {
        match non_empty(domain_code) {
            Some(code) => Ok(self.resolve_code(code)),
            None => match self.empty_input {
                EmptyInput::Reject => Err(CategoricalError::InvalidInput {
                    category: self.category,
                }),
                EmptyInput::Fallback => Ok(self.null_sentinel.concept_id),
            },
        }
    }

    /// Resolves a domain code, mapping absent or empty input to the null
    /// sentinel regardless of [`Self::empty_input`].
    pub fn resolve_or_null(&self, domain_code: Option<&str>) -> ConceptId {
        match non_empty(domain_code) {
            Some(code) => self.resolve_code(code),
            None => self.null_sentinel.concept_id,
        }
    }

    /// Maps a concept id back to its domain code.
    ///
    /// Ids with no entry return the null sentinel's domain code.
    pub fn reverse_resolve(&self, concept_id: ConceptId) -> &'static str {
        match self.find_by_concept_id(concept_id) {
            Some(entry) => entry.domain_code,
            None => {
                debug!(
                    category = %self.category,
                    concept_id,
                    fallback = self.null_sentinel.domain_code,
                    "no categorical entry for concept id"
                );
                self.null_sentinel.domain_code
            }
        }
    }

    /// Returns the number of entries, sentinels included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoricalMappingEntry> {
        self.entries.iter()
    }

    fn resolve_code(&self, code: &str) -> ConceptId {
        if let Some(entry) = self.lookup(code) {
            return entry.concept_id;
        }

        let fallback = self.other_sentinel.unwrap_or(self.null_sentinel);
        debug!(
            category = %self.category,
            code,
            fallback = fallback.concept_id,
            "unrecognized categorical code"
        );
        fallback.concept_id
    }
}

fn non_empty(code: Option<&str>) -> Option<&str> {
    code.filter(|code| !code.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENTRIES: [CategoricalMappingEntry; 3] = [
        CategoricalMappingEntry::new("a", 1),
        CategoricalMappingEntry::new("b", 2),
        CategoricalMappingEntry::new("none", 0),
    ];

    fn table(empty_input: EmptyInput, other: bool) -> CategoricalCodeTable {
        CategoricalCodeTable {
            category: Category::EncounterClass,
            entries: &ENTRIES,
            null_sentinel: ENTRIES[2],
            other_sentinel: other.then_some(ENTRIES[1]),
            empty_input,
        }
    }

    #[test]
    fn test_category_roundtrip_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn test_category_unknown_name() {
        assert_eq!(
            "gender".parse::<Category>(),
            Err(CategoricalError::UnknownCategory("gender".to_string()))
        );
    }

    #[test]
    fn test_lookup_exact_only() {
        let t = table(EmptyInput::Fallback, false);
        assert_eq!(t.lookup("a").map(|e| e.concept_id), Some(1));
        assert!(t.lookup("A").is_none());
        assert!(t.lookup(" a").is_none());
    }

    #[test]
    fn test_resolve_known() {
        let t = table(EmptyInput::Reject, true);
        assert_eq!(t.resolve(Some("a")), Ok(1));
        assert_eq!(t.resolve(Some("none")), Ok(0));
    }

    #[test]
    fn test_resolve_empty_reject() {
        let t = table(EmptyInput::Reject, false);
        let expected = Err(CategoricalError::InvalidInput {
            category: Category::EncounterClass,
        });
        assert_eq!(t.resolve(None), expected);
        assert_eq!(t.resolve(Some("")), expected);
    }

    #[test]
    fn test_resolve_empty_fallback() {
        let t = table(EmptyInput::Fallback, true);
        assert_eq!(t.resolve(None), Ok(0));
        assert_eq!(t.resolve(Some("")), Ok(0));
    }

    #[test]
    fn test_resolve_unknown_prefers_other_sentinel() {
        assert_eq!(table(EmptyInput::Reject, true).resolve(Some("zzz")), Ok(2));
        assert_eq!(table(EmptyInput::Reject, false).resolve(Some("zzz")), Ok(0));
    }

    #[test]
    fn test_resolve_or_null_ignores_policy() {
        let t = table(EmptyInput::Reject, true);
        assert_eq!(t.resolve_or_null(None), 0);
        assert_eq!(t.resolve_or_null(Some("")), 0);
        assert_eq!(t.resolve_or_null(Some("zzz")), 2);
        assert_eq!(t.resolve_or_null(Some("a")), 1);
    }

    #[test]
    fn test_reverse_resolve() {
        let t = table(EmptyInput::Fallback, false);
        assert_eq!(t.reverse_resolve(1), "a");
        assert_eq!(t.reverse_resolve(0), "none");
        assert_eq!(t.reverse_resolve(999), "none");
    }

    #[test]
    fn test_len_and_iter() {
        let t = table(EmptyInput::Fallback, false);
        assert_eq!(t.len(), 3);
        assert!(!t.is_empty());
        let codes: Vec<&str> = t.iter().map(|e| e.domain_code).collect();
        assert_eq!(codes, vec!["a", "b", "none"]);
    }
}
