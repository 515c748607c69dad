//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  storefront-catalog errors (separate crate)                            │
//! │  └── CatalogError     - Remote call failures                           │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → screen                 │
//! │        CatalogError ───────────────► ApiError → screen                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations are total and have no error type of their own.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product identifier could not be parsed.
    #[error("Invalid product id: {0}")]
    InvalidProductId(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form validation errors.
///
/// These are raised before any remote call is made; a form that fails
/// validation is never submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required form fields are blank.
    ///
    /// The message is the one shown under the product form.
    #[error("Please fill in all fields.")]
    MissingFields { fields: Vec<&'static str> },

    /// A single required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MissingFields {
            fields: vec!["title", "price"],
        };
        assert_eq!(err.to_string(), "Please fill in all fields.");

        let err = ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a number".to_string(),
        };
        assert_eq!(err.to_string(), "price has invalid format: must be a number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "title".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
