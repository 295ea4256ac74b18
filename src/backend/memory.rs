use super::Backend;
use crate::error::Result;
use crate::types::{Entry, Serializable};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A result set captured by [`MemoryBackend`]
#[derive(Clone, Debug, PartialEq)]
pub struct SavedPayload {
    /// Storage name
    pub slug: String,
    /// Flat entry view
    pub entries: Vec<Entry>,
    /// Structured view
    pub json: serde_json::Value,
}

/// Keeps saved result sets in memory, keyed by slug
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Mutex<BTreeMap<String, SavedPayload>>,
    creates: AtomicUsize,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload saved under `slug`
    pub fn get(&self, slug: &str) -> Option<SavedPayload> {
        self.saved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(slug)
            .cloned()
    }

    /// Every saved slug, sorted
    pub fn slugs(&self) -> Vec<String> {
        self.saved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect()
    }

    /// How many times `create` was called
    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn create(&self) -> Result<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn save(&self, data: &dyn Serializable) -> Result<()> {
        let payload = SavedPayload {
            slug: data.slug(),
            entries: data.entries().to_vec(),
            json: data.to_json()?,
        };

        self.saved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(payload.slug.clone(), payload);
        Ok(())
    }
}
