//! Storage abstractions for extracted data.
//!
//! Element configurations sit behind the [`ElementStore`] trait so the
//! resolver can treat any key-value store as its cache. Everything else the
//! pipelines produce is written by [`LocalStorage`].
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Toolkit configuration
//! ├── elements.json         # GenerateBlocks configs keyed by element id
//! ├── blocks/               # One block list per post
//! │   └── 812.json
//! ├── styles.json           # Consolidated StyleRegistry
//! ├── stylesheet.css        # Stylesheet rendered from styles.json
//! ├── unmapped.json         # Block types the mapper does not cover
//! └── inventory/            # Raw REST snapshots (block types, patterns, ...)
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::GenerateBlocksConfig;

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStore;

/// Key-value store for element configurations.
#[async_trait]
pub trait ElementStore: Send + Sync {
    /// Look up one element by id.
    async fn get_element(&self, element_id: &str) -> Result<Option<GenerateBlocksConfig>>;

    /// Insert or replace configurations, keyed by `element_id`.
    async fn put_elements(&self, configs: &[GenerateBlocksConfig]) -> Result<()>;
}
