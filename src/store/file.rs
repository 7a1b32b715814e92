use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{Store, StoreError};
use crate::db::Document;

/// The document as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_owned();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Writes the empty document if no file exists yet.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        match fs::try_exists(&self.path).await {
            Ok(true) => Ok(()),
            Ok(false) => self.save(&Document::default()).await,
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[async_trait]
impl Store for FileStore {
    async fn load(&self) -> Result<Document, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(doc)?;
        let temp_path = self.temp_path();
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        fs::write(&temp_path, json).await.map_err(write_err)?;
        fs::rename(&temp_path, &self.path).await.map_err(write_err)?;

        debug!(
            path = %self.path.display(),
            users = doc.users.len(),
            messages = doc.messages.len(),
            tasks = doc.tasks.len(),
            "saved document"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Message, Task, User};
    use tempfile::TempDir;

    fn sample() -> Document {
        let alice = User::new("alice".into(), "pw".into(), "alice@example.com".into());
        let bob = User::new("Боб".into(), "pw".into(), "bob@example.com".into());
        let task = Task::new(
            alice.id.clone(),
            "Inventory".into(),
            Some("count pallets".into()),
            "2025-03-01".into(),
            Some(bob.id.clone()),
        );
        let msg = Message::new(bob.id.clone(), "general".into(), "привет".into());
        Document {
            users: vec![alice, bob],
            messages: vec![msg],
            tasks: vec![task],
        }
    }

    #[tokio::test]
    async fn missing_file_loads_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data.json"));

        let doc = store.load().await.unwrap();
        assert_eq!(doc, Document::default());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data.json"));
        let doc = sample();

        store.save(&doc).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, doc);

        store.save(&loaded).await.unwrap();
        assert_eq!(store.load().await.unwrap(), doc);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn repeated_loads_are_equal() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data.json"));
        store.save(&sample()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), store.load().await.unwrap());
    }

    #[tokio::test]
    async fn writes_utf8_with_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data.json"));
        store.save(&sample()).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("привет"));
        assert!(text.starts_with("{\n  \"users\": ["));
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ malformed json ...").unwrap();

        let err = FileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[tokio::test]
    async fn null_task_description_still_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{"users": [], "messages": [], "tasks": [{"id": "t1", "title": "Restock",
                "description": null, "due_date": "2025-04-01", "created_by": "u1",
                "assigned_to": null, "status": "pending",
                "created_at": "2025-01-01T00:00:00.000000"}]}"#,
        )
        .unwrap();

        let doc = FileStore::new(&path).load().await.unwrap();
        assert_eq!(doc.tasks.len(), 1);
        assert_eq!(doc.tasks[0].title, "Restock");
        assert_eq!(doc.tasks[0].description, "");
    }

    #[tokio::test]
    async fn ensure_exists_creates_parents_and_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested/dir/data.json"));

        store.ensure_exists().await.unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            serde_json::from_str::<Document>(&text).unwrap(),
            Document::default()
        );

        store.save(&sample()).await.unwrap();
        store.ensure_exists().await.unwrap();
        assert_eq!(store.load().await.unwrap().users.len(), 2);
    }
}
