// src/pipeline/inventory.rs

//! Snapshot of the site's block types, patterns, and templates.

use crate::error::Result;
use crate::services::WordPressClient;
use crate::services::wordpress::INVENTORY_ENDPOINTS;
use crate::storage::LocalStorage;

/// Fetch every inventory endpoint; failures are logged and skipped.
///
/// Returns the number of snapshots written.
pub async fn run_inventory(client: &WordPressClient, storage: &LocalStorage) -> Result<usize> {
    let mut written = 0;
    for (name, path) in INVENTORY_ENDPOINTS {
        match client.get_json::<serde_json::Value>(path).await {
            Ok(value) => {
                let count = value.as_array().map_or(1, Vec::len);
                storage.write_inventory(name, &value).await?;
                log::info!("Saved {name} ({count} entries)");
                written += 1;
            }
            Err(error) => log::warn!("Failed to fetch {name}: {error}"),
        }
    }
    Ok(written)
}
