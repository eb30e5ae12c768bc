//! Inner Content Materialization Inspector
//!
//! Loads content type descriptors and an inner-content document from disk,
//! materializes the document, and prints the resulting tree as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin ic-materialize -- content-types.json items.json [config.json]
//!
//! # Preview mode and verbose resolution logging
//! IC_PREVIEW=1 RUST_LOG=debug cargo run --bin ic-materialize -- types.json items.json
//! ```
//!
//! # Environment Variables
//!
//! - `IC_PREVIEW`: materialize in preview mode when set to `1` or `true`
//! - `IC_LEVEL`: root level (default: 0)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use innercontent_core::{
    InMemoryContentTypeService, InnerContentConfig, RequestContext, SchemaResolver,
    TreeMaterializer,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        anyhow::bail!("usage: ic-materialize <content-types.json> <items.json> [config.json]");
    }

    let types_path = PathBuf::from(&args[0]);
    let items_path = PathBuf::from(&args[1]);

    let config = match args.get(2) {
        Some(path) => InnerContentConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => InnerContentConfig::default(),
    };

    let preview = env::var("IC_PREVIEW")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let level = env::var("IC_LEVEL")
        .ok()
        .and_then(|l| l.parse::<i32>().ok())
        .unwrap_or(0);

    let raw_types = std::fs::read_to_string(&types_path)
        .with_context(|| format!("Failed to read {:?}", types_path))?;
    let content_types = InMemoryContentTypeService::from_json_str(&raw_types)
        .with_context(|| format!("Invalid content types in {:?}", types_path))?;
    tracing::info!("Loaded {} content types", content_types.len());

    let resolver = Arc::new(SchemaResolver::from_config(Arc::new(content_types), &config)?);
    let materializer = TreeMaterializer::new(resolver, &config);

    let raw_items = std::fs::read_to_string(&items_path)
        .with_context(|| format!("Failed to read {:?}", items_path))?;
    let nodes = materializer
        .materialize_str(&RequestContext::new(), &raw_items, level, preview)
        .with_context(|| format!("Failed to materialize {:?}", items_path))?;

    let stats = materializer.resolver().cache_stats();
    tracing::info!(
        "Materialized {} root nodes ({} schemas cached, {} hits, {} misses)",
        nodes.len(),
        stats.entries,
        stats.hits,
        stats.misses
    );

    let tree: Vec<serde_json::Value> = nodes.iter().map(|n| n.to_json()).collect();
    println!("{}", serde_json::to_string_pretty(&tree)?);

    Ok(())
}
