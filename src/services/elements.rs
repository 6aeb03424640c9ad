// src/services/elements.rs

//! GenerateBlocks element resolution.
//!
//! Looks element ids up in an [`ElementStore`] first and fetches the misses
//! from an [`ElementSource`] in fixed-size batches. Fetched configurations
//! are persisted before they are returned.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use futures::future;
use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::models::{FetchConfig, GenerateBlocksConfig};
use crate::storage::ElementStore;

/// Class prefix GenerateBlocks puts in front of element ids.
pub const ELEMENT_CLASS_PREFIX: &str = "gb-element-";

/// Element configurations keyed by element id.
pub type ResolvedElements = HashMap<String, GenerateBlocksConfig>;

/// Remote source of element configurations.
#[async_trait]
pub trait ElementSource: Send + Sync {
    /// Fetch one element. `Ok(None)` means the source does not know the id.
    async fn fetch_element(&self, element_id: &str) -> Result<Option<GenerateBlocksConfig>>;
}

/// The hex id inside a `gb-element-<hex>` class token.
pub fn element_id_from_class(class: &str) -> Option<&str> {
    let id = class.strip_prefix(ELEMENT_CLASS_PREFIX)?;
    (!id.is_empty() && id.chars().all(|c| c.is_ascii_hexdigit())).then_some(id)
}

/// All element ids referenced by class names anywhere in `html`.
pub fn element_ids_in(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .flat_map(|el| el.value().classes().filter_map(element_id_from_class))
        .map(str::to_string)
        .collect()
}

/// Summary of a resolution run.
#[derive(Debug, Default)]
pub struct ResolveOutcome {
    pub elements: ResolvedElements,
    pub cached: usize,
    pub fetched: usize,
    pub missing: usize,
    pub failed: usize,
}

/// Cache-first resolver for element configurations.
pub struct ElementResolver<'a> {
    source: &'a dyn ElementSource,
    store: &'a dyn ElementStore,
    batch_size: usize,
    batch_delay: Duration,
}

impl<'a> ElementResolver<'a> {
    pub fn new(
        source: &'a dyn ElementSource,
        store: &'a dyn ElementStore,
        config: &FetchConfig,
    ) -> Self {
        Self {
            source,
            store,
            batch_size: config.batch_size.max(1),
            batch_delay: Duration::from_millis(config.batch_delay_ms),
        }
    }

    /// Resolve every id. Ids that cannot be fetched are left out of the result.
    pub async fn resolve(&self, ids: &BTreeSet<String>) -> ResolveOutcome {
        let mut outcome = ResolveOutcome::default();
        let mut misses = Vec::new();

        for id in ids {
            match self.store.get_element(id).await {
                Ok(Some(config)) => {
                    outcome.cached += 1;
                    outcome.elements.insert(id.clone(), config);
                }
                Ok(None) => misses.push(id.as_str()),
                Err(error) => {
                    log::warn!("Element store lookup failed for {id}: {error}");
                    misses.push(id.as_str());
                }
            }
        }

        if misses.is_empty() {
            log::debug!("All {} elements resolved from store", outcome.cached);
            return outcome;
        }

        log::info!(
            "Resolving {} elements ({} cached, {} to fetch)",
            ids.len(),
            outcome.cached,
            misses.len()
        );

        let batch_count = misses.len().div_ceil(self.batch_size);
        for (index, batch) in misses.chunks(self.batch_size).enumerate() {
            let results =
                future::join_all(batch.iter().map(|id| self.source.fetch_element(id))).await;

            let mut fetched = Vec::new();
            for (id, result) in batch.iter().zip(results) {
                match result {
                    Ok(Some(config)) => fetched.push(config),
                    Ok(None) => {
                        outcome.missing += 1;
                        log::debug!("Element {id} not found at source");
                    }
                    Err(error) => {
                        outcome.failed += 1;
                        log::warn!("Failed to fetch element {id}: {error}");
                    }
                }
            }

            if !fetched.is_empty() {
                if let Err(error) = self.store.put_elements(&fetched).await {
                    log::warn!("Failed to persist {} elements: {error}", fetched.len());
                }
                outcome.fetched += fetched.len();
                for config in fetched {
                    outcome.elements.insert(config.element_id.clone(), config);
                }
            }

            if index + 1 < batch_count && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        outcome
    }
}
