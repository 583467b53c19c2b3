//! The fixed categorical tables.
//!
//! Concept ids are OMOP standard concepts. Each table lists its sentinels as
//! ordinary entries so they resolve and reverse-resolve like any other code.

use crate::table::{CategoricalCodeTable, CategoricalMappingEntry as Entry, Category, EmptyInput};

const SEX_OTHER: Entry = Entry::new("other", 8521);
const SEX_UNKNOWN: Entry = Entry::new("unknown", 8551);

/// FHIR administrative gender to OMOP gender concepts.
///
/// Empty input is rejected; unrecognized codes resolve to `other`.
pub static ADMINISTRATIVE_SEX: CategoricalCodeTable = CategoricalCodeTable {
    category: Category::AdministrativeSex,
    entries: &[
        Entry::new("male", 8507),
        Entry::new("female", 8532),
        SEX_OTHER,
        SEX_UNKNOWN,
    ],
    null_sentinel: SEX_UNKNOWN,
    other_sentinel: Some(SEX_OTHER),
    empty_input: EmptyInput::Reject,
};

const ORGANIZATION_OTHER: Entry = Entry::new("other", 8844);
const ORGANIZATION_UNKNOWN: Entry = Entry::new("unknown", 0);

/// FHIR organization type to OMOP care site / place of service concepts.
///
/// Empty input is rejected; unrecognized codes resolve to `other`.
pub static ORGANIZATION_TYPE: CategoricalCodeTable = CategoricalCodeTable {
    category: Category::OrganizationType,
    entries: &[
        Entry::new("prov", 4107295),
        Entry::new("dept", 4195901),
        Entry::new("team", 4217012),
        Entry::new("govt", 4174263),
        Entry::new("ins", 4129030),
        Entry::new("edu", 4286493),
        Entry::new("reli", 4322976),
        Entry::new("crs", 4124939),
        Entry::new("cg", 4081615),
        Entry::new("bus", 4111046),
        ORGANIZATION_OTHER,
        ORGANIZATION_UNKNOWN,
    ],
    null_sentinel: ORGANIZATION_UNKNOWN,
    other_sentinel: Some(ORGANIZATION_OTHER),
    empty_input: EmptyInput::Reject,
};

const OBSERVATION_UNKNOWN: Entry = Entry::new("unknown", 0);

/// FHIR observation category to OMOP observation type concepts.
pub static OBSERVATION_CATEGORY: CategoricalCodeTable = CategoricalCodeTable {
    category: Category::ObservationCategory,
    entries: &[
        Entry::new("social-history", 44814721),
        Entry::new("vital-signs", 44818701),
        Entry::new("imaging", 44818703),
        Entry::new("laboratory", 44818702),
        Entry::new("procedure", 38000279),
        Entry::new("survey", 45905771),
        Entry::new("exam", 44788731),
        Entry::new("therapy", 38000280),
        OBSERVATION_UNKNOWN,
    ],
    null_sentinel: OBSERVATION_UNKNOWN,
    other_sentinel: None,
    empty_input: EmptyInput::Fallback,
};

const ENCOUNTER_UNKNOWN: Entry = Entry::new("unknown", 0);

/// v3 ActCode encounter class to OMOP visit concepts.
pub static ENCOUNTER_CLASS: CategoricalCodeTable = CategoricalCodeTable {
    category: Category::EncounterClass,
    entries: &[
        Entry::new("IMP", 9201),
        Entry::new("AMB", 9202),
        Entry::new("EMER", 9203),
        Entry::new("HH", 581476),
        Entry::new("VR", 5083),
        Entry::new("ACUTE", 8717),
        Entry::new("NONAC", 8546),
        Entry::new("OBSENC", 581385),
        ENCOUNTER_UNKNOWN,
    ],
    null_sentinel: ENCOUNTER_UNKNOWN,
    other_sentinel: None,
    empty_input: EmptyInput::Fallback,
};

const CONDITION_UNKNOWN: Entry = Entry::new("unknown", 0);

/// FHIR condition category to OMOP condition type concepts.
///
/// Concept ids are unique so that reverse resolution is a left inverse.
pub static CONDITION_CATEGORY: CategoricalCodeTable = CategoricalCodeTable {
    category: Category::ConditionCategory,
    entries: &[
        Entry::new("problem-list-item", 38000245),
        Entry::new("encounter-diagnosis", 32020),
        Entry::new("health-concern", 32840),
        Entry::new("complaint", 42894222),
        CONDITION_UNKNOWN,
    ],
    null_sentinel: CONDITION_UNKNOWN,
    other_sentinel: None,
    empty_input: EmptyInput::Fallback,
};

/// Returns the table for `category`.
pub fn table_for(category: Category) -> &'static CategoricalCodeTable {
    match category {
        Category::AdministrativeSex => &ADMINISTRATIVE_SEX,
        Category::OrganizationType => &ORGANIZATION_TYPE,
        Category::ObservationCategory => &OBSERVATION_CATEGORY,
        Category::EncounterClass => &ENCOUNTER_CLASS,
        Category::ConditionCategory => &CONDITION_CATEGORY,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_table_for_matches_category() {
        for category in Category::ALL {
            assert_eq!(table_for(category).category, category);
        }
    }

    #[test]
    fn test_domain_codes_unique() {
        for category in Category::ALL {
            let table = table_for(category);
            let codes: HashSet<&str> = table.iter().map(|e| e.domain_code).collect();
            assert_eq!(codes.len(), table.len(), "duplicate code in {category}");
        }
    }

    #[test]
    fn test_sentinels_are_entries() {
        for category in Category::ALL {
            let table = table_for(category);
            assert!(table.entries.contains(&table.null_sentinel), "{category}");
            if let Some(other) = table.other_sentinel {
                assert!(table.entries.contains(&other), "{category}");
            }
        }
    }

    #[test]
    fn test_condition_concept_ids_unique() {
        let ids: HashSet<i64> = CONDITION_CATEGORY.iter().map(|e| e.concept_id).collect();
        assert_eq!(ids.len(), CONDITION_CATEGORY.len());
    }

    #[test]
    fn test_empty_input_policy() {
        assert_eq!(ADMINISTRATIVE_SEX.empty_input, EmptyInput::Reject);
        assert_eq!(ORGANIZATION_TYPE.empty_input, EmptyInput::Reject);
        assert_eq!(OBSERVATION_CATEGORY.empty_input, EmptyInput::Fallback);
        assert_eq!(ENCOUNTER_CLASS.empty_input, EmptyInput::Fallback);
        assert_eq!(CONDITION_CATEGORY.empty_input, EmptyInput::Fallback);
    }
}
