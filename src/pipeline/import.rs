// src/pipeline/import.rs

//! Post import pipeline: posts → element resolution → blocks on disk.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, ContentBlock, Post};
use crate::services::elements::element_ids_in;
use crate::services::{BlockMapper, ElementResolver, ElementSource, WordPressClient};
use crate::storage::LocalStorage;

/// Totals of an import run.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub posts: usize,
    pub blocks: usize,
    pub elements_cached: usize,
    pub elements_fetched: usize,
    pub elements_unresolved: usize,
}

/// Fetch every post from WordPress and import it.
pub async fn run_import(
    config: &Config,
    client: &WordPressClient,
    storage: &LocalStorage,
) -> Result<ImportSummary> {
    log::info!("Fetching posts from {}", config.wordpress.base_url);
    let posts = client.fetch_posts().await?;
    log::info!("Fetched {} posts", posts.len());
    import_posts(config, client, storage, &posts).await
}

/// Map already-fetched posts into blocks, replacing each post's block file.
pub async fn import_posts(
    config: &Config,
    source: &dyn ElementSource,
    storage: &LocalStorage,
    posts: &[Post],
) -> Result<ImportSummary> {
    let ids: BTreeSet<String> = posts
        .iter()
        .flat_map(|post| element_ids_in(&post.content.rendered))
        .collect();

    let resolver = ElementResolver::new(source, storage, &config.fetch);
    let outcome = resolver.resolve(&ids).await;

    let mut summary = ImportSummary {
        posts: posts.len(),
        elements_cached: outcome.cached,
        elements_fetched: outcome.fetched,
        elements_unresolved: outcome.missing + outcome.failed,
        ..ImportSummary::default()
    };

    let mapper = BlockMapper::new(&config.mapping, config.site_host())?;
    let created_at = Utc::now();

    for post in posts {
        let mapped = mapper.map_document(&post.content.rendered, &outcome.elements);
        let blocks = mapped
            .iter()
            .map(|m| ContentBlock::from_mapped(post.id, m, created_at))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Post {} ({}): {} blocks", post.id, post.slug, blocks.len());
        storage.write_blocks(post.id, &blocks).await?;
        summary.blocks += blocks.len();
    }

    log::info!(
        "Imported {} posts into {} blocks ({} elements cached, {} fetched, {} unresolved)",
        summary.posts,
        summary.blocks,
        summary.elements_cached,
        summary.elements_fetched,
        summary.elements_unresolved
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockContent, BlockType, GenerateBlocksConfig, RenderedField};
    use crate::storage::ElementStore;
    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::TempDir;

    struct OneElement;

    #[async_trait]
    impl ElementSource for OneElement {
        async fn fetch_element(&self, element_id: &str) -> Result<Option<GenerateBlocksConfig>> {
            if element_id == "c0ffee" {
                let configuration = json!({ "display": "flex" }).as_object().cloned().unwrap();
                Ok(Some(GenerateBlocksConfig::new(element_id, "container", configuration)))
            } else {
                Ok(None)
            }
        }
    }

    fn post(id: u64, html: &str) -> Post {
        Post {
            id,
            slug: format!("post-{id}"),
            link: String::new(),
            date: String::new(),
            title: RenderedField::default(),
            content: RenderedField {
                rendered: html.to_string(),
            },
            categories: Vec::new(),
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.fetch.batch_delay_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_import_writes_blocks_per_post() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let posts = vec![
            post(
                1,
                r#"<h2 id="deals">Deals</h2><div class="gb-element-c0ffee"><p>x</p></div>"#,
            ),
            post(2, r#"<p>Hi</p><div class="gb-element-beef"></div>"#),
        ];

        let summary = import_posts(&config(), &OneElement, &storage, &posts)
            .await
            .unwrap();
        assert_eq!(summary.posts, 2);
        assert_eq!(summary.blocks, 4);
        assert_eq!(summary.elements_fetched, 1);
        assert_eq!(summary.elements_unresolved, 1);

        let blocks = storage.load_blocks(1).await.unwrap();
        assert_eq!(blocks[0].block_type, BlockType::Heading);
        match blocks[1].payload().unwrap() {
            BlockContent::Container(c) => assert_eq!(c.css, "display: flex;"),
            other => panic!("unexpected {other:?}"),
        }

        match storage.load_blocks(2).await.unwrap()[1].payload().unwrap() {
            BlockContent::Container(c) => assert!(c.style.is_empty()),
            other => panic!("unexpected {other:?}"),
        }

        assert!(storage.get_element("c0ffee").await.unwrap().is_some());
    }
}
