//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐   add_to_cart    ┌──────────┐                            │
//! │  │  Empty   │─────────────────►│ In Cart  │◄──┐ add_to_cart            │
//! │  │  Cart    │◄─────────────────│          │───┘ remove_cart_entry      │
//! │  └──────────┘ remove_from_cart └──────────┘     remove_from_cart       │
//! │                                                                         │
//! │  The cart lives for the session. Nothing clears it.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use storefront_core::{Cart, CartEntry, CartSummary, ProductId};

use crate::error::{ApiError, CatalogOperation};
use crate::state::{CartState, CatalogState};

/// Cart response including entries and the badge summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub entries: Vec<CartEntry>,
    pub summary: CartSummary,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            entries: cart.entries().to_vec(),
            summary: cart.summary(),
        }
    }
}

/// Result of removing a product: how many slots went, and the cart after.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveResponse {
    pub removed: usize,
    #[serde(flatten)]
    pub cart: CartResponse,
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Fetches a product and appends it to the cart.
///
/// ## Behavior
/// - Always a new slot, even if the product is already in the cart
/// - The price is frozen at the time of adding
pub async fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");
    let id = product_id.parse::<ProductId>()?;

    let product = catalog
        .client()
        .get_product(id)
        .await
        .map_err(|e| ApiError::catalog(CatalogOperation::ProductDetails, e))?;

    Ok(cart.with_cart_mut(|c| {
        c.add(&product);
        CartResponse::from(&*c)
    }))
}

/// Removes every slot holding a product.
///
/// Removing a product that is not in the cart is not an error.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> Result<RemoveResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    let id = product_id.parse::<ProductId>()?;

    Ok(cart.with_cart_mut(|c| {
        let removed = c.remove(id);
        debug!(%id, removed, "Removed cart entries");
        RemoveResponse {
            removed,
            cart: CartResponse::from(&*c),
        }
    }))
}

/// Removes a single slot.
pub fn remove_cart_entry(cart: &CartState, entry_id: &str) -> Result<CartResponse, ApiError> {
    debug!(entry_id = %entry_id, "remove_cart_entry command");
    let uuid = Uuid::parse_str(entry_id.trim())
        .map_err(|_| ApiError::validation(format!("Invalid cart entry id: {}", entry_id)))?;

    cart.with_cart_mut(|c| {
        if c.remove_entry(uuid) {
            Ok(CartResponse::from(&*c))
        } else {
            Err(ApiError::not_found("Cart entry", entry_id))
        }
    })
}
