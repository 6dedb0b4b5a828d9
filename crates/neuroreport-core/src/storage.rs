//! Object-store collaborator contract.
//!
//! Uploaded documents and generated artifacts live in an external object
//! store; the core only needs opaque put/get. Store failures are fatal to the
//! request, unlike per-file extraction failures.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Object-store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Opaque blob storage.
pub trait ObjectStore {
    /// Store `data` under `name`; returns the object's URI.
    fn put(&self, data: &[u8], name: &str) -> StorageResult<String>;

    /// Fetch an object by URI.
    fn get(&self, uri: &str) -> StorageResult<Vec<u8>>;
}

/// In-memory object store for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryObjectStore {
    fn put(&self, data: &[u8], name: &str) -> StorageResult<String> {
        let uri = format!("mem://{name}");
        self.objects
            .lock()
            .map_err(|e| StorageError::Backend(format!("lock poisoned: {e}")))?
            .insert(uri.clone(), data.to_vec());
        Ok(uri)
    }

    fn get(&self, uri: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .lock()
            .map_err(|e| StorageError::Backend(format!("lock poisoned: {e}")))?
            .get(uri)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(uri.to_string()))
    }
}
