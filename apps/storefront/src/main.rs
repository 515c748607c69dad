//! # Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront (terminal)                            │
//! │                                                                         │
//! │  main.rs ────► hands off to storefront_lib::run()                      │
//! │                                                                         │
//! │  lib.rs ─────► CLI args, logging, config, runtime                      │
//! │                                                                         │
//! │  shell.rs ───► products / show / new / edit / delete / cart ...        │
//! │                                                                         │
//! │  commands/ ──► list_products, add_to_cart, remove_from_cart, ...       │
//! │                                                                         │
//! │  state/ ─────► CartState, CatalogState                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match storefront_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("storefront: {}", err);
            ExitCode::FAILURE
        }
    }
}
