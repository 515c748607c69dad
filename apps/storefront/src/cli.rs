//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Browse the demo catalog, edit products and keep a cart for this session.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "storefront", version, about)]
pub struct Args {
    /// Path to storefront.toml (defaults to the platform config directory)
    #[arg(long, env = "STOREFRONT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog API base URL; overrides the config file and STOREFRONT_API_URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Tracing filter, e.g. "debug" or "storefront_catalog=trace"; overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub save_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "storefront",
            "--api-url",
            "http://localhost:8080",
            "--log-filter",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.api_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
        assert!(!args.save_config);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["storefront", "--bogus"]).is_err());
    }
}
