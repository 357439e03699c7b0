//! # pricetree CLI Module
//!
//! This module implements the CLI interface for pricetree.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server (default when no command is given)
//! - `import` - Replay import batch files and print a priced subtree
//! - `status` - Replay import batch files and print catalog metrics

mod commands;

use clap::{Parser, Subcommand};
use pricetree_core::CatalogError;
use std::path::PathBuf;

pub use commands::*;

/// Default bind host for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port for the HTTP server.
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// pricetree - catalog tree server
///
/// Categories and offers in one in-memory tree, with category prices
/// derived from every offer beneath them.
#[derive(Parser, Debug)]
#[command(name = "pricetree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Import batch files applied before the server starts
        #[arg(short, long)]
        seed: Vec<PathBuf>,
    },

    /// Replay import batches and print the priced subtree of a node
    Import {
        /// Import batch files, applied in order
        #[arg(short, long = "file", required = true)]
        files: Vec<PathBuf>,

        /// Node to print; prints every root when omitted
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Replay import batches and print catalog metrics
    Status {
        /// Import batch files, applied in order
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CatalogError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port, seed }) => cmd_server(&host, port, &seed).await,
        Some(Commands::Import { files, root }) => cmd_import(&files, root.as_deref(), json_mode),
        Some(Commands::Status { files }) => cmd_status(&files, json_mode),
        None => cmd_server(DEFAULT_HOST, DEFAULT_PORT, &[]).await,
    }
}
