//! # State Module
//!
//! Handles the shell passes to the commands that need them. There is no
//! global state: each handle is created once in `run()` and cloned into
//! whatever needs it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │       CartState          │        │        CatalogState          │  │
//! │  │                          │        │                              │  │
//! │  │  Arc<Mutex<Cart>>        │        │  Arc<dyn CatalogClient>      │  │
//! │  │  add / remove / summary  │        │  HttpCatalogClient in prod   │  │
//! │  │                          │        │  MockCatalogClient in tests  │  │
//! │  └──────────────────────────┘        └──────────────────────────────┘  │
//! │                                                                         │
//! │  Each cart mutation is one synchronous step under the lock; no lock    │
//! │  is ever held across an await.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;

pub use cart::CartState;
pub use catalog::CatalogState;
