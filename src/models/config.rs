//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// WordPress site and credentials
    #[serde(default)]
    pub wordpress: WordPressConfig,

    /// HTTP and batching behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Class markers used when classifying fragments
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Output file naming
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.wordpress.base_url).map_err(|e| {
            AppError::validation(format!(
                "wordpress.base_url '{}' is not a valid URL: {e}",
                self.wordpress.base_url
            ))
        })?;
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.batch_size == 0 {
            return Err(AppError::validation("fetch.batch_size must be > 0"));
        }
        if self.fetch.per_page == 0 || self.fetch.per_page > 100 {
            return Err(AppError::validation("fetch.per_page must be within 1..=100"));
        }
        self.mapping.validate()
    }

    /// Host of the WordPress site, used to tell internal links from external ones.
    pub fn site_host(&self) -> Option<String> {
        url::Url::parse(&self.wordpress.base_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
    }
}

/// WordPress site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPressConfig {
    /// Site root, e.g. `https://cruisemadeeasy.com`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Account used for application-password authentication
    #[serde(default)]
    pub username: Option<String>,

    /// Application password for `username`
    #[serde(default)]
    pub application_password: Option<String>,
}

impl Default for WordPressConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            username: None,
            application_password: None,
        }
    }
}

impl WordPressConfig {
    /// Credentials pair, present only when both halves are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.application_password) {
            (Some(user), Some(pass)) if !user.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

/// HTTP client and batching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Number of remote fetches issued together
    #[serde(default = "defaults::batch_size")]
    pub batch_size: usize,

    /// Pause between batches in milliseconds
    #[serde(default = "defaults::batch_delay")]
    pub batch_delay_ms: u64,

    /// Page size for paginated WordPress listings
    #[serde(default = "defaults::per_page")]
    pub per_page: usize,

    /// Upper bound on listing pages walked per run
    #[serde(default = "defaults::max_pages")]
    pub max_pages: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            batch_size: defaults::batch_size(),
            batch_delay_ms: defaults::batch_delay(),
            per_page: defaults::per_page(),
            max_pages: defaults::max_pages(),
        }
    }
}

/// Class tokens that drive fragment classification.
///
/// A fragment carries a marker when any of its class tokens equals one of
/// the configured values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Marks a single call-to-action button
    #[serde(default = "defaults::button_markers")]
    pub button_markers: Vec<String>,

    /// Marks a wrapper holding several buttons
    #[serde(default = "defaults::button_group_markers")]
    pub button_group_markers: Vec<String>,

    /// Marks an image figure
    #[serde(default = "defaults::image_markers")]
    pub image_markers: Vec<String>,

    /// Marks a themed section wrapper
    #[serde(default = "defaults::section_markers")]
    pub section_markers: Vec<String>,

    /// Marks a multi-column wrapper
    #[serde(default = "defaults::columns_markers")]
    pub columns_markers: Vec<String>,

    /// Marks one column inside a multi-column wrapper
    #[serde(default = "defaults::column_markers")]
    pub column_markers: Vec<String>,

    /// `wp-block-*` names the mapper covers; anything else is reported as unmapped
    #[serde(default = "defaults::handled_block_types")]
    pub handled_block_types: Vec<String>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            button_markers: defaults::button_markers(),
            button_group_markers: defaults::button_group_markers(),
            image_markers: defaults::image_markers(),
            section_markers: defaults::section_markers(),
            columns_markers: defaults::columns_markers(),
            column_markers: defaults::column_markers(),
            handled_block_types: defaults::handled_block_types(),
        }
    }
}

impl MappingConfig {
    fn validate(&self) -> Result<()> {
        let lists = [
            ("mapping.button_markers", &self.button_markers),
            ("mapping.button_group_markers", &self.button_group_markers),
            ("mapping.image_markers", &self.image_markers),
            ("mapping.section_markers", &self.section_markers),
            ("mapping.columns_markers", &self.columns_markers),
            ("mapping.column_markers", &self.column_markers),
        ];
        for (name, list) in lists {
            if list.iter().all(|m| m.trim().is_empty()) {
                return Err(AppError::validation(format!("{name} has no markers")));
            }
        }
        Ok(())
    }
}

/// Output file naming inside the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory (relative to storage root) receiving one block file per post
    #[serde(default = "defaults::blocks_dir")]
    pub blocks_dir: String,

    /// Consolidated stylesheet file name
    #[serde(default = "defaults::stylesheet_file")]
    pub stylesheet_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            blocks_dir: defaults::blocks_dir(),
            stylesheet_file: defaults::stylesheet_file(),
        }
    }
}

mod defaults {
    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    // WordPress defaults
    pub fn base_url() -> String {
        "https://cruisemadeeasy.com".into()
    }

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; blockport/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn batch_size() -> usize {
        5
    }
    pub fn batch_delay() -> u64 {
        1000
    }
    pub fn per_page() -> usize {
        100
    }
    pub fn max_pages() -> usize {
        50
    }

    // Mapping defaults
    pub fn button_markers() -> Vec<String> {
        strings(&["wp-block-button", "wp-block-button__link", "gb-button", "button"])
    }
    pub fn button_group_markers() -> Vec<String> {
        strings(&["wp-block-buttons", "gb-buttons", "gb-button-wrapper"])
    }
    pub fn image_markers() -> Vec<String> {
        strings(&["wp-block-image", "gb-block-image"])
    }
    pub fn section_markers() -> Vec<String> {
        strings(&["gb-section", "cme-section", "wp-block-cover"])
    }
    pub fn columns_markers() -> Vec<String> {
        strings(&["wp-block-columns", "gb-grid-wrapper"])
    }
    pub fn column_markers() -> Vec<String> {
        strings(&["wp-block-column", "gb-grid-column"])
    }
    pub fn handled_block_types() -> Vec<String> {
        strings(&[
            "image", "button", "buttons", "columns", "column", "quote", "list", "table",
        ])
    }

    // Output defaults
    pub fn blocks_dir() -> String {
        "blocks".into()
    }
    pub fn stylesheet_file() -> String {
        "stylesheet.css".into()
    }
}
