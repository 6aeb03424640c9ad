//! Local filesystem storage implementation.
//!
//! All writes go through a temp file followed by a rename, so a crashed run
//! never leaves a half-written JSON file behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{ContentBlock, GenerateBlocksConfig, OutputConfig, StyleRegistry};
use crate::storage::ElementStore;

const ELEMENTS_KEY: &str = "elements.json";
const STYLES_KEY: &str = "styles.json";
const UNMAPPED_KEY: &str = "unmapped.json";

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    output: OutputConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::with_output(root_dir, OutputConfig::default())
    }

    /// Create a LocalStorage with custom output naming.
    pub fn with_output(root_dir: impl Into<PathBuf>, output: OutputConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            output,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn blocks_key(&self, post_id: u64) -> String {
        format!("{}/{}.json", self.output.blocks_dir, post_id)
    }

    /// All stored element configurations.
    pub async fn load_elements(&self) -> Result<BTreeMap<String, GenerateBlocksConfig>> {
        Ok(self.read_json(ELEMENTS_KEY).await?.unwrap_or_default())
    }

    /// Replace the block list of one post.
    pub async fn write_blocks(&self, post_id: u64, blocks: &[ContentBlock]) -> Result<()> {
        self.write_json(&self.blocks_key(post_id), blocks).await
    }

    pub async fn load_blocks(&self, post_id: u64) -> Result<Vec<ContentBlock>> {
        Ok(self
            .read_json(&self.blocks_key(post_id))
            .await?
            .unwrap_or_default())
    }

    /// Previously consolidated styles, or an empty registry.
    pub async fn load_styles(&self) -> Result<StyleRegistry> {
        Ok(self.read_json(STYLES_KEY).await?.unwrap_or_default())
    }

    /// Persist the registry and its rendered stylesheet.
    pub async fn write_styles(&self, registry: &StyleRegistry) -> Result<PathBuf> {
        self.write_json(STYLES_KEY, registry).await?;
        let key = self.output.stylesheet_file.clone();
        self.write_bytes(&key, registry.to_stylesheet().as_bytes())
            .await?;
        Ok(self.path(&key))
    }

    pub async fn write_unmapped(&self, report: &BTreeMap<String, Vec<u64>>) -> Result<()> {
        self.write_json(UNMAPPED_KEY, report).await
    }

    /// Store a raw REST snapshot under `inventory/<name>.json`.
    pub async fn write_inventory(&self, name: &str, value: &serde_json::Value) -> Result<()> {
        self.write_json(&format!("inventory/{name}.json"), value).await
    }
}

#[async_trait]
impl ElementStore for LocalStorage {
    async fn get_element(&self, element_id: &str) -> Result<Option<GenerateBlocksConfig>> {
        Ok(self.load_elements().await?.remove(element_id))
    }

    async fn put_elements(&self, configs: &[GenerateBlocksConfig]) -> Result<()> {
        let mut elements = self.load_elements().await?;
        for config in configs {
            elements.insert(config.element_id.clone(), config.clone());
        }
        self.write_json(ELEMENTS_KEY, &elements).await
    }
}
