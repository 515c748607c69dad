//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function  Result<T, ApiError>                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Form invalid? ───── ValidationError ─────────────► VALIDATION_ERROR    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Catalog call failed? ── CatalogError ──┬─ NotFound ─► NOT_FOUND        │
//! │         │                               └─ other ────► REMOTE_ERROR     │
//! │         ▼                                                               │
//! │  Success                                                                │
//! │                                                                         │
//! │  The cause is logged; the message carries the fixed text the view      │
//! │  shows for that operation.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_catalog::CatalogError;
use storefront_core::{CoreError, ValidationError};

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "REMOTE_ERROR",
///   "message": "Failed to update product."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or cart entry not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The catalog call failed (transport, status or body)
    RemoteError,

    /// Internal error
    Internal,
}

/// The catalog operation a failure belongs to; decides the message shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOperation {
    ListProducts,
    ProductDetails,
    LoadForEdit,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
}

impl CatalogOperation {
    /// Message shown to the user when this operation fails.
    pub fn failure_message(&self, err: &CatalogError) -> String {
        match self {
            CatalogOperation::ListProducts => format!("Failed to fetch products: {}", err),
            CatalogOperation::ProductDetails => "Failed to fetch product details.".to_string(),
            CatalogOperation::LoadForEdit => "Failed to load product details.".to_string(),
            CatalogOperation::CreateProduct => "Something went wrong. Please try again.".to_string(),
            CatalogOperation::UpdateProduct => "Failed to update product.".to_string(),
            CatalogOperation::DeleteProduct => "Failed to delete product.".to_string(),
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Converts a failed catalog call into the message for `operation`.
    pub fn catalog(operation: CatalogOperation, err: CatalogError) -> Self {
        let message = operation.failure_message(&err);

        let code = if err.is_not_found() {
            tracing::warn!(?operation, "Catalog call found nothing: {}", err);
            ErrorCode::NotFound
        } else if err.is_remote() {
            tracing::error!(?operation, "Catalog call failed: {}", err);
            ErrorCode::RemoteError
        } else {
            tracing::error!(?operation, "Catalog client misconfigured: {}", err);
            ErrorCode::Internal
        };

        ApiError::new(code, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }
}

/// Converts form validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidProductId(raw) => {
                ApiError::validation(format!("Invalid product id: {}", raw))
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ProductId;

    fn server_error() -> CatalogError {
        CatalogError::Status {
            status: 503,
            body: "unavailable".to_string(),
        }
    }

    #[test]
    fn test_operation_messages() {
        let cases = [
            (CatalogOperation::ProductDetails, "Failed to fetch product details."),
            (CatalogOperation::LoadForEdit, "Failed to load product details."),
            (CatalogOperation::CreateProduct, "Something went wrong. Please try again."),
            (CatalogOperation::UpdateProduct, "Failed to update product."),
            (CatalogOperation::DeleteProduct, "Failed to delete product."),
        ];

        for (operation, expected) in cases {
            let err = ApiError::catalog(operation, server_error());
            assert_eq!(err.code, ErrorCode::RemoteError);
            assert_eq!(err.message, expected);
        }
    }

    #[test]
    fn test_list_failure_carries_detail() {
        let err = ApiError::catalog(CatalogOperation::ListProducts, server_error());
        assert_eq!(
            err.message,
            "Failed to fetch products: Catalog service returned 503: unavailable"
        );
    }

    #[test]
    fn test_not_found_keeps_load_failure_message() {
        let err = ApiError::catalog(
            CatalogOperation::ProductDetails,
            CatalogError::NotFound(ProductId::new(99)),
        );
        assert!(err.is_not_found());
        assert_eq!(err.message, "Failed to fetch product details.");
    }

    #[test]
    fn test_validation_conversion() {
        let err: ApiError = ValidationError::MissingFields {
            fields: vec!["title"],
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Please fill in all fields.");

        let err: ApiError = CoreError::InvalidProductId("abc".to_string()).into();
        assert_eq!(err.message, "Invalid product id: abc");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::validation("nope")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "nope");
    }
}
