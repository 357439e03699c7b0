//! # pricetree - Catalog Tree Server
//!
//! The main binary for the pricetree catalog.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for replaying import batches offline
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/pricetree (THE BINARY)       │
//! │                                              │
//! │     ┌─────────────┐      ┌─────────────┐     │
//! │     │    CLI      │      │  HTTP API   │     │
//! │     │   (clap)    │      │   (axum)    │     │
//! │     └──────┬──────┘      └──────┬──────┘     │
//! │            └─────────┬──────────┘            │
//! │                      ▼                       │
//! │              ┌────────────────┐              │
//! │              │ pricetree-core │              │
//! │              │  (THE LOGIC)   │              │
//! │              └────────────────┘              │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! pricetree server --host 0.0.0.0 --port 8080
//!
//! # Offline replay
//! pricetree import -f batch1.json -f batch2.json --root 1
//! pricetree status -f batch1.json
//! ```

use clap::Parser;
use pricetree::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // PRICETREE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PRICETREE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "pricetree=debug,pricetree_core=debug,tower_http=debug"
    } else {
        "pricetree=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  pricetree v{}

  Categories • Offers • Mean prices
"#,
        env!("CARGO_PKG_VERSION")
    );
}
