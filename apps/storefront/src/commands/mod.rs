//! # Commands Module
//!
//! Every operation the view layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Catalog listing, details, add/edit/delete
//! └── cart.rs     ◄─── Cart manipulation
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! async fn list_products(catalog: &CatalogState)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs both
//! async fn add_to_cart(catalog: &CatalogState, cart: &CartState, product_id: &str)
//! ```
//!
//! Ids arrive as typed by the user and are parsed here; a malformed id is a
//! validation error, never a catalog call.

pub mod cart;
pub mod product;
