// src/pipeline/audit.rs

//! Coverage audit: which `wp-block-*` types appear in posts but are not mapped.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{Config, Post};
use crate::services::{BlockMapper, WordPressClient};
use crate::storage::LocalStorage;

/// Unmapped block type → ids of posts containing it.
pub fn audit_posts(mapper: &BlockMapper, posts: &[Post]) -> BTreeMap<String, Vec<u64>> {
    let mut report: BTreeMap<String, Vec<u64>> = BTreeMap::new();
    for post in posts {
        for block_type in mapper.unmapped_block_types(&post.content.rendered) {
            report.entry(block_type).or_default().push(post.id);
        }
    }
    report
}

/// Fetch posts, audit them, and store `unmapped.json`.
pub async fn run_audit(
    config: &Config,
    client: &WordPressClient,
    storage: &LocalStorage,
) -> Result<BTreeMap<String, Vec<u64>>> {
    let posts = client.fetch_posts().await?;
    let mapper = BlockMapper::new(&config.mapping, config.site_host())?;
    let report = audit_posts(&mapper, &posts);

    for (block_type, post_ids) in &report {
        log::warn!("Unmapped block type '{block_type}' in {} posts", post_ids.len());
    }
    storage.write_unmapped(&report).await?;
    Ok(report)
}
