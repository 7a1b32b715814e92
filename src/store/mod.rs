//! Whole-document persistence.
//!
//! A [`Store`] only knows how to read and replace the entire [`Document`].
//! [`Db`] wraps one and serialises the load-modify-save write paths so two
//! requests cannot silently overwrite each other's changes.

mod file;
mod memory;

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::db::Document;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed data file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Reads the persisted document. A store that has never been saved yields
    /// the empty document.
    async fn load(&self) -> Result<Document, StoreError>;

    /// Replaces the persisted document.
    async fn save(&self, doc: &Document) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct Db {
    store: Arc<dyn Store>,
    write_lock: Arc<Mutex<()>>,
}

impl Db {
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            store: Arc::new(store),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn load(&self) -> Result<Document, StoreError> {
        self.store.load().await
    }

    /// Loads, applies `f`, and saves only if `f` succeeded. Writers are
    /// serialised for the whole cycle.
    pub async fn update<T, E>(&self, f: impl FnOnce(&mut Document) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut doc = self.store.load().await?;
        let out = f(&mut doc)?;
        self.store.save(&doc).await?;

        Ok(out)
    }
}
