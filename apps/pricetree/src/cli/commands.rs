//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Batch files hold either one import request (`{"items": [...],
//! "updateDate": "..."}`) or a JSON array of them.

use crate::api::{self, ImportRequest};
use pricetree_core::{Catalog, CatalogError, CatalogMetrics, CatalogStore, NodeId, TreeView};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE HANDLING
// =============================================================================

/// Maximum size of a batch file (100 MB).
const MAX_BATCH_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Contents of a batch file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Many(Vec<ImportRequest>),
    One(ImportRequest),
}

impl BatchFile {
    fn into_requests(self) -> Vec<ImportRequest> {
        match self {
            Self::Many(requests) => requests,
            Self::One(request) => vec![request],
        }
    }
}

/// Canonicalize a path and make sure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, CatalogError> {
    let canonical = path.canonicalize().map_err(|e| {
        CatalogError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(CatalogError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Reject files larger than `max_size` before reading them.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CatalogError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CatalogError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CatalogError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Read every import request from a batch file.
pub fn read_batch_file(path: &Path) -> Result<Vec<ImportRequest>, CatalogError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_BATCH_FILE_SIZE)?;

    let contents = std::fs::read(&validated)
        .map_err(|e| CatalogError::Io(format!("Read file: {}", e)))?;

    let file: BatchFile = serde_json::from_slice(&contents).map_err(|e| {
        CatalogError::MalformedItem(format!("{}: {}", path.display(), e))
    })?;

    Ok(file.into_requests())
}

/// Build a catalog by replaying batch files in order.
pub fn load_catalog(files: &[PathBuf]) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();

    for file in files {
        let requests = read_batch_file(file)?;
        for request in &requests {
            let batch = request.to_batch()?;
            let summary = catalog.import_batch(&batch)?;
            tracing::debug!(
                file = %file.display(),
                created = summary.created,
                updated = summary.updated,
                "Batch replayed"
            );
        }
        tracing::info!(file = %file.display(), batches = requests.len(), "Batch file loaded");
    }

    Ok(catalog)
}

fn print_json(value: &impl serde::Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server, optionally seeded from batch files.
pub async fn cmd_server(host: &str, port: u16, seed: &[PathBuf]) -> Result<(), CatalogError> {
    let catalog = load_catalog(seed)?;

    println!("pricetree Catalog Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:  {}", host);
    println!("  Port:  {}", port);
    println!("  Seed:  {} node(s) from {} file(s)", catalog.node_count(), seed.len());
    println!();
    println!("Endpoints:");
    println!("  POST   /imports     - Import categories and offers");
    println!("  DELETE /delete/{{id}} - Delete a subtree");
    println!("  GET    /nodes/{{id}}  - Get a priced subtree");
    println!("  GET    /sales       - List node update dates");
    println!("  GET    /status      - Catalog metrics");
    println!("  GET    /health      - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, catalog).await
}

// =============================================================================
// IMPORT COMMAND
// =============================================================================

/// Replay batches and print the priced subtree of `root`, or of every root.
pub fn cmd_import(
    files: &[PathBuf],
    root: Option<&str>,
    json_mode: bool,
) -> Result<(), CatalogError> {
    let catalog = load_catalog(files)?;

    let roots: Vec<NodeId> = match root {
        Some(id) => vec![NodeId::from(id)],
        None => catalog.roots().map(|n| n.id.clone()).collect(),
    };

    let views = roots
        .iter()
        .map(|id| catalog.subtree(id))
        .collect::<Result<Vec<_>, _>>()?;

    if json_mode {
        match views.as_slice() {
            [single] => print_json(single),
            _ => print_json(&views),
        }
        return Ok(());
    }

    for view in &views {
        let mut out = String::new();
        render_tree(view, 0, &mut out);
        print!("{}", out);
    }

    Ok(())
}

/// Render a view as an indented outline.
fn render_tree(view: &TreeView, indent: usize, out: &mut String) {
    out.push_str(&"  ".repeat(indent));
    out.push_str(&format!(
        "- {} [{}] id={} price={} date={}\n",
        view.name, view.kind, view.id, view.price, view.date
    ));
    for child in view.children.iter().flatten() {
        render_tree(child, indent.saturating_add(1), out);
    }
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Replay batches and print catalog metrics.
pub fn cmd_status(files: &[PathBuf], json_mode: bool) -> Result<(), CatalogError> {
    let catalog = load_catalog(files)?;
    let metrics = CatalogMetrics::from_catalog(&catalog);

    if json_mode {
        print_json(&serde_json::json!({
            "files": files.len(),
            "node_count": metrics.node_count,
            "category_count": metrics.category_count,
            "offer_count": metrics.offer_count,
            "root_count": metrics.root_count,
            "max_depth": metrics.max_depth
        }));
        return Ok(());
    }

    println!("pricetree Catalog Status");
    println!("========================");
    println!("Files:      {}", files.len());
    println!();
    println!("Nodes:      {}", metrics.node_count);
    println!("Categories: {}", metrics.category_count);
    println!("Offers:     {}", metrics.offer_count);
    println!("Roots:      {}", metrics.root_count);
    println!("Max Depth:  {}", metrics.max_depth);

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
