//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the registry is opened.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the directory holding the places file exists.
///
/// A bare file name (no parent component) resolves against the working
/// directory, which is assumed to exist.
pub async fn ensure_data_dir(places_file: &Path) -> anyhow::Result<()> {
    let parent = match places_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    if tokio::fs::metadata(parent).await.is_err() {
        warn!(dir = %parent.display(), "data directory missing; creating it");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    info!(file = %places_file.display(), "places file location ready");
    Ok(())
}
