//! # Validation Module
//!
//! The add/edit product form and its local validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Form Submission                                    │
//! │                                                                         │
//! │  ProductForm (raw text as typed)                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate()  ← THIS MODULE                                             │
//! │  ├── any field blank?     → "Please fill in all fields."               │
//! │  ├── price not a number?  → InvalidFormat                              │
//! │  └── price negative?      → MustNotBeNegative                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ProductDraft ──► POST /products  or  PUT /products/{id}               │
//! │                                                                         │
//! │  A form that fails here is never sent.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, ProductDraft};
use crate::PLACEHOLDER_IMAGE_URL;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Form
// =============================================================================

/// Raw field values of the add/edit product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductForm {
    pub title: String,
    /// Price as typed, e.g. `"9.99"`.
    pub price: String,
    pub description: String,
    pub category: String,
}

impl ProductForm {
    /// Names of the fields that are blank after trimming, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("price", &self.price),
            ("description", &self.description),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Checks the form without consuming it.
    pub fn validate(&self) -> ValidationResult<Money> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing });
        }

        validate_price(&self.price)
    }

    /// Validates the form and builds the payload to send.
    ///
    /// The image is always the placeholder; the form has no image field.
    pub fn into_draft(self) -> ValidationResult<ProductDraft> {
        let price = self.validate()?;

        Ok(ProductDraft {
            title: self.title.trim().to_string(),
            price,
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            image: PLACEHOLDER_IMAGE_URL.to_string(),
        })
    }

    /// Empties every field, as after a successful "add".
    pub fn clear(&mut self) {
        *self = ProductForm::default();
    }
}

/// Pre-fills the edit form from a fetched product.
impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        ProductForm {
            title: product.title.clone(),
            price: product.price.to_decimal_string(),
            description: product.description.clone(),
            category: product.category.clone(),
        }
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a price as typed into the form.
///
/// ## Rules
/// - Must be a decimal number with at most two decimals
/// - Zero is allowed, negatives are not
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_price;
///
/// assert_eq!(validate_price("9.99").unwrap().cents(), 999);
/// assert!(validate_price("0").is_ok());
/// assert!(validate_price("-1").is_err());
/// assert!(validate_price("cheap").is_err());
/// ```
pub fn validate_price(price: &str) -> ValidationResult<Money> {
    if price.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    price.parse::<Money>()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn filled_form() -> ProductForm {
        ProductForm {
            title: "Mechanical Keyboard".to_string(),
            price: "79.90".to_string(),
            description: "Tenkeyless, brown switches".to_string(),
            category: "electronics".to_string(),
        }
    }

    #[test]
    fn test_complete_form_builds_draft() {
        let draft = filled_form().into_draft().unwrap();
        assert_eq!(draft.title, "Mechanical Keyboard");
        assert_eq!(draft.price.cents(), 7990);
        assert_eq!(draft.image, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let mut form = filled_form();
        form.title = "   ".to_string();
        form.category.clear();

        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields.");
        assert_eq!(
            err,
            ValidationError::MissingFields {
                fields: vec!["title", "category"]
            }
        );
    }

    #[test]
    fn test_empty_form_lists_every_field() {
        let form = ProductForm::default();
        assert_eq!(
            form.missing_fields(),
            vec!["title", "price", "description", "category"]
        );
    }

    #[test]
    fn test_bad_price_is_rejected() {
        let mut form = filled_form();
        form.price = "ten".to_string();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));

        form.price = "-5".to_string();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let mut form = filled_form();
        form.price = "0".to_string();
        assert!(form.validate().unwrap().is_zero());
    }

    #[test]
    fn test_edit_form_prefill() {
        let product = Product {
            id: ProductId::new(3),
            title: "Mens Cotton Jacket".to_string(),
            price: Money::from_cents(5599),
            description: "Great outerwear jacket".to_string(),
            category: "men's clothing".to_string(),
            image: "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg".to_string(),
        };

        let form = ProductForm::from(&product);
        assert_eq!(form.price, "55.99");
        assert_eq!(form.into_draft().unwrap().price, product.price);
    }

    #[test]
    fn test_clear() {
        let mut form = filled_form();
        form.clear();
        assert_eq!(form, ProductForm::default());
    }
}
