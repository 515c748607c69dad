//! # storefront-core: Pure Logic for the Storefront
//!
//! Everything the storefront decides without talking to the network: money,
//! catalog types, the cart, form validation and request bookkeeping.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View Layer (terminal shell)                  │   │
//! │  │   Catalog ──► Detail ──► Add/Edit form ──► Cart                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ProductForm│  │   │
//! │  │   │  Draft    │  │           │  │ CartEntry │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                  ┌───────────┐                                 │   │
//! │  │                  │  request  │  Pending / Failed / Succeeded   │   │
//! │  │                  └───────────┘                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            storefront-catalog (REST client)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, ProductDraft, ProductId)
//! - [`money`] - Money type with integer cents
//! - [`cart`] - The session cart
//! - [`request`] - Three-state request tracking for views
//! - [`validation`] - Product form validation
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod request;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry, CartSummary};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use request::{RequestSlot, RequestState, Ticket};
pub use types::{Product, ProductDraft, ProductId};
pub use validation::ProductForm;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Image sent with every product created or edited through the form.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";
