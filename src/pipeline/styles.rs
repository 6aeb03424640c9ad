// src/pipeline/styles.rs

//! Style consolidation pipeline: pages → extracted CSS → one stylesheet.

use std::path::PathBuf;
use std::time::Duration;

use futures::future;

use crate::error::Result;
use crate::models::{Config, PageCssData, StyleRegistry};
use crate::services::elements::{ELEMENT_CLASS_PREFIX, element_ids_in};
use crate::services::{CssExtractor, WordPressClient};
use crate::storage::LocalStorage;

/// Totals of a style run.
#[derive(Debug)]
pub struct StylesSummary {
    pub pages_scraped: usize,
    pub pages_failed: usize,
    pub elements: usize,
    pub stylesheet: PathBuf,
}

/// Extract element styles from one page's HTML.
///
/// The targets are the GenerateBlocks elements referenced in the page markup.
pub fn collect_page(extractor: &CssExtractor, url: &str, html: &str) -> Result<PageCssData> {
    let class_names: Vec<String> = element_ids_in(html)
        .into_iter()
        .map(|id| format!("{ELEMENT_CLASS_PREFIX}{id}"))
        .collect();
    extractor.extract_page(url, html, &class_names)
}

/// Scrape `pages` and write the consolidated registry and stylesheet.
///
/// With `append`, results are merged into the registry from a previous run.
pub async fn run_styles(
    config: &Config,
    client: &WordPressClient,
    storage: &LocalStorage,
    pages: &[String],
    append: bool,
) -> Result<StylesSummary> {
    let extractor = CssExtractor::new()?;
    let mut registry = if append {
        storage.load_styles().await?
    } else {
        StyleRegistry::new()
    };

    let batch_size = config.fetch.batch_size.max(1);
    let delay = Duration::from_millis(config.fetch.batch_delay_ms);
    let batch_count = pages.len().div_ceil(batch_size);
    let mut pages_scraped = 0;
    let mut pages_failed = 0;

    for (index, batch) in pages.chunks(batch_size).enumerate() {
        let results = future::join_all(batch.iter().map(|page| client.fetch_page_html(page))).await;

        for (page, result) in batch.iter().zip(results) {
            let url = client.page_url(page);
            let page_data = result.and_then(|html| collect_page(&extractor, &url, &html));
            match page_data {
                Ok(data) => {
                    log::info!(
                        "{}: {} styled elements, {} variables",
                        url,
                        data.element_styles.len(),
                        data.global_css_variables.len()
                    );
                    registry.add_page(data);
                    pages_scraped += 1;
                }
                Err(error) => {
                    pages_failed += 1;
                    log::warn!("Failed to scrape styles from {url}: {error}");
                }
            }
        }

        if index + 1 < batch_count && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    let stylesheet = storage.write_styles(&registry).await?;
    log::info!(
        "Consolidated {} elements from {} pages into {}",
        registry.elements.len(),
        pages_scraped,
        stylesheet.display()
    );

    Ok(StylesSummary {
        pages_scraped,
        pages_failed,
        elements: registry.elements.len(),
        stylesheet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_page_targets_markup_elements() {
        let html = r#"<html><head><style>
            .gb-element-aa11 { color: red; }
            .gb-element-bb22 { color: blue; }
            </style></head><body><div class="gb-element-aa11">x</div></body></html>"#;
        let page = collect_page(&CssExtractor::new().unwrap(), "https://example.com/", html).unwrap();

        assert_eq!(page.element_styles.len(), 1);
        assert_eq!(page.element_styles[0].element_id, "gb-element-aa11");
        assert_eq!(page.element_styles[0].css_rules, vec!["color: red;"]);
    }

    #[test]
    fn test_pages_consolidate_without_dedup() {
        let extractor = CssExtractor::new().unwrap();
        let html = r#"<html><head><style>.gb-element-aa11 { color: red; }</style></head>
            <body><div class="gb-element-aa11"></div></body></html>"#;

        let first = collect_page(&extractor, "https://example.com/a", html).unwrap();
        let second = collect_page(&extractor, "https://example.com/b", html).unwrap();
        let registry = StyleRegistry::new().with_page(first).with_page(second);

        assert_eq!(registry.elements["gb-element-aa11"].css_rules.len(), 2);
    }
}
