//! # Cart State
//!
//! Owned handle to the session cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shell Command            Command                 Cart State Change     │
//! │  ─────────────            ───────                 ─────────────────     │
//! │                                                                         │
//! │  cart-add <id> ──────────► add_to_cart() ────────► entries.push(snap)  │
//! │                                                                         │
//! │  cart-remove <id> ───────► remove_from_cart() ───► retain(id != id)    │
//! │                                                                         │
//! │  cart-drop <entry> ──────► remove_cart_entry() ──► entries.remove(i)   │
//! │                                                                         │
//! │  cart ───────────────────► get_cart() ───────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::{Cart, CartSummary};

/// Cloneable handle to the session cart.
///
/// Clones share the same cart. A poisoned lock is recovered: every cart
/// mutation is a single step, so the cart is never left half-updated.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = cart_state.with_cart(|cart| cart.summary());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let removed = cart_state.with_cart_mut(|cart| cart.remove(id));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    /// Count and total for the navigation badge.
    pub fn summary(&self) -> CartSummary {
        self.with_cart(Cart::summary)
    }
}
