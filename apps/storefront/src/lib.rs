//! # Storefront Library
//!
//! Core library for the terminal storefront: startup, state, commands and
//! the interactive shell.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Command line arguments
//! ├── shell.rs        ◄─── Interactive view layer
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state handle
//! │   └── catalog.rs  ◄─── Catalog client handle
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Catalog list/detail/add/edit/delete
//! │   └── cart.rs     ◄─── Cart manipulation commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Args;
use shell::Shell;
use state::{CartState, CatalogState};
use storefront_catalog::{CatalogConfig, HttpCatalogClient};

/// Default tracing filter when neither `--log-filter` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

/// Runs the storefront.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • --config, --api-url, --log-filter, --save-config                  │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → STOREFRONT_* env → --api-url         │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CatalogState: HttpCatalogClient                                   │
/// │     • CartState: empty cart for this session                            │
/// │                                                                         │
/// │  5. Run the Shell on a single-threaded runtime ───────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_tracing(args.log_filter.as_deref());
    info!("Starting storefront");

    let config = load_config(&args)?;

    if args.save_config {
        config.save(args.config.clone())?;
        return Ok(());
    }

    let client = HttpCatalogClient::new(&config)?;
    info!(base_url = %client.base_url(), "Catalog client ready");

    let catalog = CatalogState::from_client(client);
    let cart = CartState::new();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let input = BufReader::new(tokio::io::stdin());
        let mut shell = Shell::new(catalog, cart, input, std::io::stdout());
        shell.run().await
    })?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `--log-filter debug` - takes precedence over everything
/// - `RUST_LOG=storefront_catalog=trace` - trace for the catalog client only
/// - Default: [`DEFAULT_LOG_FILTER`]
fn init_tracing(filter_override: Option<&str>) {
    let filter = match filter_override {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the catalog configuration and applies the command line override.
///
/// A broken config file falls back to defaults; a bad `--api-url` is an error.
fn load_config(args: &Args) -> Result<CatalogConfig, storefront_catalog::CatalogError> {
    let mut config = CatalogConfig::load_or_default(args.config.clone());

    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
        config.validate()?;
    }

    Ok(config)
}
