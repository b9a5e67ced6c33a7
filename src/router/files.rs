//! File store behind the `/files/` routes.
//!
//! Each resource is one regular file directly under the configured root.
//! Reads and writes of the same name are serialized through a per-name
//! reader/writer lock so a GET never sees a half-written POST from this
//! process. Writes are not transactional: a crash mid-write can still leave
//! a truncated file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;

use crate::http::response::Response;

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("invalid file name {0:?}")]
    InvalidName(String),
    #[error("file store directory is not configured")]
    NotConfigured,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

type LockMap = HashMap<String, Arc<RwLock<()>>>;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    locks: Arc<Mutex<LockMap>>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, FileStoreError> {
        let path = self.resolve(name)?;
        let lock = self.lock_for(name);

        let result = {
            let _guard = lock.read().await;
            tokio::fs::read(&path).await
        };

        self.release(name, lock);
        Ok(result?)
    }

    /// Replaces the whole content of `name` with `contents`.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), FileStoreError> {
        let path = self.resolve(name)?;
        let lock = self.lock_for(name);

        let result = {
            let _guard = lock.write().await;
            tokio::fs::write(&path, contents).await
        };

        self.release(name, lock);
        Ok(result?)
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, FileStoreError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    fn lock_for(&self, name: &str) -> Arc<RwLock<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(name.to_string()).or_default())
    }

    // Drops the map entry once nobody else holds it, so the map only tracks
    // names with operations in flight.
    fn release(&self, name: &str, lock: Arc<RwLock<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if Arc::strong_count(&lock) == 2 {
            locks.remove(name);
        }
    }
}

/// Rejects names that are empty or could escape the root directory.
pub fn validate_name(name: &str) -> Result<(), FileStoreError> {
    let traversal = name == "." || name == "..";
    let separator = name.contains(['/', '\\', '\0']);

    if name.is_empty() || traversal || separator {
        return Err(FileStoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// `GET /files/{name}`: 200 octet-stream with the file bytes, or 404 for
/// anything that prevents reading them.
pub async fn get_file(store: Option<&FileStore>, name: &str) -> Response {
    let Some(store) = store else {
        tracing::debug!(file = name, error = %FileStoreError::NotConfigured, "File read refused");
        return Response::not_found();
    };

    match store.read(name).await {
        Ok(contents) => Response::octet_stream(contents),
        Err(e) => {
            tracing::debug!(file = name, error = %e, "File read failed");
            Response::not_found()
        }
    }
}

/// `POST /files/{name}`: 201 after storing `body`, 500 if the write fails,
/// 404 when no directory is configured.
pub async fn post_file(store: Option<&FileStore>, name: &str, body: &[u8]) -> Response {
    let Some(store) = store else {
        tracing::debug!(file = name, error = %FileStoreError::NotConfigured, "File write refused");
        return Response::not_found();
    };

    match store.write(name, body).await {
        Ok(()) => {
            tracing::info!(file = name, bytes = body.len(), "File stored");
            Response::created()
        }
        Err(e) => {
            tracing::error!(file = name, error = %e, "File write failed");
            Response::internal_error()
        }
    }
}
