//! # storefront-catalog: Remote Catalog Client
//!
//! Product CRUD against the demo catalog REST service.
//!
//! ## Usage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Client Flow                                │
//! │                                                                         │
//! │  CatalogConfig::load(path)                                              │
//! │         │  defaults ◄─ storefront.toml ◄─ STOREFRONT_* env             │
//! │         ▼                                                               │
//! │  HttpCatalogClient::new(&config)                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Arc<dyn CatalogClient>  ──► list / get / create / update / delete     │
//! │                                                                         │
//! │  Tests swap in MockCatalogClient behind the same trait.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{CatalogClient, HttpCatalogClient, MockCatalogClient};
pub use config::{ApiSettings, CatalogConfig, DEFAULT_BASE_URL};
pub use error::{CatalogError, CatalogResult};
