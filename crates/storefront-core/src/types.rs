//! # Domain Types
//!
//! Catalog types shared by the client, the cart and the view layer.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Product      │   │  ProductDraft   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id (service)   │   │  title          │  ◄── POST /products         │
//! │  │  title          │   │  price          │  ◄── PUT  /products/{id}    │
//! │  │  price          │   │  description    │                             │
//! │  │  description    │   │  category       │                             │
//! │  │  category       │   │  image          │                             │
//! │  │  image          │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are assigned by the catalog service. A draft has none.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Identifier assigned to a product by the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ProductId)
            .map_err(|_| CoreError::InvalidProductId(s.to_string()))
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item as returned by the catalog service.
///
/// Immutable once fetched into a view. Fields the service sends that are not
/// listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    pub title: String,

    /// Price, rounded to cents when decoded.
    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price: Money,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    /// Image URI.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Returns the editable part of this product.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.title.clone(),
            price: self.price,
            description: self.description.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
        }
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Write payload for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub title: String,

    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price: Money,

    pub description: String,

    pub category: String,

    pub image: String,
}

impl ProductDraft {
    /// Combines the draft with the id the service assigned to it.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_product_decodes_catalog_json() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.cents(), 10995);
        assert_eq!(product.category, "men's clothing");
    }

    #[test]
    fn test_product_rejects_negative_price() {
        let json = r#"{"id": 2, "title": "x", "price": -4.0}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_product_id_parsing() {
        assert_eq!("7".parse::<ProductId>().unwrap(), ProductId::new(7));
        assert_eq!(" 12 ".parse::<ProductId>().unwrap().get(), 12);
        assert!("abc".parse::<ProductId>().is_err());
        assert!("-1".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_draft_round_trips_through_product() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        let draft = product.to_draft();
        assert_eq!(draft.clone().into_product(product.id), product);

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["price"], serde_json::json!(109.95));
        assert!(json.get("id").is_none());
    }
}
