//! Error types for categorical resolution.

use crate::table::Category;

/// Result type for categorical resolution.
pub type CategoricalResult<T> = Result<T, CategoricalError>;

/// Errors that can occur while resolving categorical codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoricalError {
    /// A required code was absent or empty.
    #[error("{category} code is required")]
    InvalidInput {
        /// Category whose contract requires a value.
        category: Category,
    },

    /// A category name that does not match any table.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_input() {
        let err = CategoricalError::InvalidInput {
            category: Category::AdministrativeSex,
        };
        assert_eq!(err.to_string(), "administrative-sex code is required");
    }

    #[test]
    fn test_error_display_unknown_category() {
        let err = CategoricalError::UnknownCategory("marital-status".to_string());
        assert_eq!(err.to_string(), "unknown category: marital-status");
    }
}
