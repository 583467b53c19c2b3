//! Caller-facing categorical resolvers.
//!
//! Sex and organization type require a code and fail with
//! [`CategoricalError::InvalidInput`] without one. The other categories
//! resolve absent codes to their null sentinel.
//!
//! [`CategoricalError::InvalidInput`]: crate::CategoricalError::InvalidInput

use omop_vocab::ConceptId;

use crate::error::CategoricalResult;
use crate::table::Category;
use crate::tables::{
    table_for, ADMINISTRATIVE_SEX, CONDITION_CATEGORY, ENCOUNTER_CLASS, OBSERVATION_CATEGORY,
    ORGANIZATION_TYPE,
};

/// Resolves an administrative sex code (`male`, `female`, `other`, `unknown`).
pub fn resolve_administrative_sex(code: Option<&str>) -> CategoricalResult<ConceptId> {
    ADMINISTRATIVE_SEX.resolve(code)
}

/// Resolves an organization type code (`prov`, `dept`, ...).
pub fn resolve_organization_type(code: Option<&str>) -> CategoricalResult<ConceptId> {
    ORGANIZATION_TYPE.resolve(code)
}

/// Resolves an observation category code.
pub fn resolve_observation_category(code: Option<&str>) -> ConceptId {
    OBSERVATION_CATEGORY.resolve_or_null(code)
}

/// Resolves an encounter class code.
pub fn resolve_encounter_class(code: Option<&str>) -> ConceptId {
    ENCOUNTER_CLASS.resolve_or_null(code)
}

/// Resolves a condition category code.
pub fn resolve_condition_category(code: Option<&str>) -> ConceptId {
    CONDITION_CATEGORY.resolve_or_null(code)
}

/// Maps a condition type concept id back to its condition category code.
pub fn reverse_resolve_condition_category(concept_id: ConceptId) -> &'static str {
    CONDITION_CATEGORY.reverse_resolve(concept_id)
}

/// Resolves `code` in the table for `category`, honouring that table's
/// empty-input policy.
pub fn resolve(category: Category, code: Option<&str>) -> CategoricalResult<ConceptId> {
    table_for(category).resolve(code)
}
