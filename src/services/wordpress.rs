// src/services/wordpress.rs

//! WordPress REST API client.
//!
//! Read-only access to posts, GenerateBlocks elements, and the block
//! inventory endpoints, authenticated with an application password when one
//! is configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, GenerateBlocksConfig, Post};
use crate::services::elements::ElementSource;
use crate::utils::{http, resolve_url, site_root};

const POSTS_PATH: &str = "wp-json/wp/v2/posts";
const ELEMENTS_PATH: &str = "wp-json/generateblocks/v1/elements";
const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Inventory snapshots: file name and REST path.
pub const INVENTORY_ENDPOINTS: &[(&str, &str)] = &[
    ("block-types", "wp-json/wp/v2/block-types"),
    ("block-patterns", "wp-json/wp/v2/block-patterns/patterns"),
    ("templates", "wp-json/wp/v2/templates"),
    ("template-parts", "wp-json/wp/v2/template-parts"),
];

/// Element payload as served by the GenerateBlocks endpoint.
#[derive(Debug, Deserialize)]
struct ElementResponse {
    #[serde(default, rename = "type", alias = "elementType", alias = "element_type")]
    kind: String,

    #[serde(default, alias = "settings", alias = "attributes", alias = "configuration")]
    styles: Map<String, Value>,
}

/// Client for one WordPress site.
pub struct WordPressClient {
    client: Client,
    root: Url,
    credentials: Option<(String, String)>,
    per_page: usize,
    max_pages: usize,
    page_delay: Duration,
}

impl WordPressClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http::create_client(&config.fetch)?,
            root: site_root(&config.wordpress.base_url)?,
            credentials: config
                .wordpress
                .credentials()
                .map(|(user, pass)| (user.to_string(), pass.to_string())),
            per_page: config.fetch.per_page,
            max_pages: config.fetch.max_pages.max(1),
            page_delay: Duration::from_millis(config.fetch.batch_delay_ms),
        })
    }

    /// Absolute URL for a path below the site root.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.root.join(path.trim_start_matches('/'))?)
    }

    /// Resolve a page path or URL against the site root.
    pub fn page_url(&self, path_or_url: &str) -> String {
        resolve_url(&self.root, path_or_url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, Some(pass));
        }
        Ok(request.send().await?)
    }

    /// GET a path and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let text = self.get(url).await?.error_for_status()?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Rendered HTML of a public page.
    pub async fn fetch_page_html(&self, path_or_url: &str) -> Result<String> {
        http::fetch_text(&self.client, &self.page_url(path_or_url)).await
    }

    /// Walk the paginated post listing.
    pub async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        let mut page = 1;

        loop {
            let mut url = self.endpoint(POSTS_PATH)?;
            url.query_pairs_mut()
                .append_pair("page", &page.to_string())
                .append_pair("per_page", &self.per_page.to_string());

            let response = self.get(url).await?;
            // WordPress answers 400 once `page` runs past the last page.
            if response.status() == StatusCode::BAD_REQUEST && page > 1 {
                break;
            }
            let response = response.error_for_status()?;
            let total_pages = response
                .headers()
                .get(TOTAL_PAGES_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(1);

            let batch: Vec<Post> = serde_json::from_str(&response.text().await?)?;
            log::info!("Fetched posts page {page}/{total_pages} ({} posts)", batch.len());
            let exhausted = batch.is_empty();
            posts.extend(batch);

            if exhausted || page >= total_pages || page >= self.max_pages {
                break;
            }
            page += 1;
            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(posts)
    }
}

#[async_trait]
impl ElementSource for WordPressClient {
    async fn fetch_element(&self, element_id: &str) -> Result<Option<GenerateBlocksConfig>> {
        let url = self.endpoint(&format!("{ELEMENTS_PATH}/{element_id}"))?;
        let response = self.get(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::fetch(
                format!("element {element_id}"),
                format!("status {}", response.status()),
            ));
        }
        let text = response.text().await?;
        parse_element(element_id, &text).map(Some)
    }
}

/// Build a config from an element endpoint body.
fn parse_element(element_id: &str, body: &str) -> Result<GenerateBlocksConfig> {
    let response: ElementResponse = serde_json::from_str(body)?;
    Ok(GenerateBlocksConfig::new(element_id, response.kind, response.styles))
}
