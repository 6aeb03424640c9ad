//! In-memory element store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::GenerateBlocksConfig;
use crate::storage::ElementStore;

/// Element store kept in process memory.
#[derive(Default)]
pub struct MemoryStore {
    elements: RwLock<HashMap<String, GenerateBlocksConfig>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ElementStore for MemoryStore {
    async fn get_element(&self, element_id: &str) -> Result<Option<GenerateBlocksConfig>> {
        let elements = self
            .elements
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(elements.get(element_id).cloned())
    }

    async fn put_elements(&self, configs: &[GenerateBlocksConfig]) -> Result<()> {
        let mut elements = self
            .elements
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for config in configs {
            elements.insert(config.element_id.clone(), config.clone());
        }
        Ok(())
    }
}
