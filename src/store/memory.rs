use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Store, StoreError};
use crate::db::Document;

/// Keeps the document in memory. Clones share the same document.
#[derive(Clone, Default)]
pub struct MemoryStore {
    doc: Arc<Mutex<Document>>,
    saves: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn with_document(doc: Document) -> Self {
        Self {
            doc: Arc::new(Mutex::new(doc)),
            saves: Arc::default(),
        }
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self) -> Result<Document, StoreError> {
        Ok(self.doc.lock().await.clone())
    }

    async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        *self.doc.lock().await = doc.clone();
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
