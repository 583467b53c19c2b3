//! # omop-categorical
//!
//! Resolves small fixed categorical codes (administrative sex, organization
//! type, observation category, encounter class, condition category) into OMOP
//! concept ids.
//!
//! Every category is a static [`CategoricalCodeTable`] with a designated
//! "unknown" sentinel entry, and all categories share one lookup routine.
//! Unrecognized codes never fail: they resolve to the category's sentinel.
//!
//! ## Usage
//!
//! ```rust
//! use omop_categorical::{
//!     resolve_administrative_sex, resolve_encounter_class, reverse_resolve_condition_category,
//!     resolve_condition_category,
//! };
//!
//! assert_eq!(resolve_administrative_sex(Some("male")), Ok(8507));
//! assert_eq!(resolve_encounter_class(Some("IMP")), 9201);
//! assert_eq!(resolve_encounter_class(Some("XYZ")), 0);
//!
//! let id = resolve_condition_category(Some("problem-list-item"));
//! assert_eq!(reverse_resolve_condition_category(id), "problem-list-item");
//! ```
//!
//! ## Empty input
//!
//! | Category | Absent / empty code | Unrecognized code |
//! |----------|---------------------|-------------------|
//! | administrative sex | `InvalidInput` | `other` (8521) |
//! | organization type | `InvalidInput` | `other` (8844) |
//! | observation category | `unknown` (0) | `unknown` (0) |
//! | encounter class | `unknown` (0) | `unknown` (0) |
//! | condition category | `unknown` (0) | `unknown` (0) |
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/Deserialize for [`Category`] and Serialize for entries

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod resolver;
mod table;
pub mod tables;

pub use error::{CategoricalError, CategoricalResult};
pub use resolver::{
    resolve, resolve_administrative_sex, resolve_condition_category, resolve_encounter_class,
    resolve_observation_category, resolve_organization_type, reverse_resolve_condition_category,
};
pub use table::{CategoricalCodeTable, CategoricalMappingEntry, Category, EmptyInput};
pub use tables::table_for;

pub use omop_vocab::ConceptId;
