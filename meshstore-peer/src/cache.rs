use bytes::Bytes;
use meshstore::{FileName, LocalStore};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Persists peer-fetched files into the local store, off the response path.
#[derive(Clone)]
pub struct CacheWriter {
    store: Arc<LocalStore>,
    enabled: bool,
}

impl CacheWriter {
    pub fn new(store: Arc<LocalStore>, enabled: bool) -> Self {
        Self { store, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Detached variant for the request path: the response never waits on
    /// the write, and the task keeps running after the handle is dropped.
    pub fn cache_in_background(&self, file_name: FileName, content: Bytes) {
        if let Some(handle) = self.maybe_cache(file_name, content) {
            drop(handle);
        }
    }

    /// The write runs on the blocking pool and its failure is only logged.
    /// The handle lets tests wait for the write to land.
    pub fn maybe_cache(&self, file_name: FileName, content: Bytes) -> Option<JoinHandle<()>> {
        if !self.enabled {
            return None;
        }

        let store = Arc::clone(&self.store);
        Some(tokio::task::spawn_blocking(move || {
            match store.write(&file_name, &content) {
                Ok(()) => {
                    tracing::info!("[CACHE {}] saved {} bytes locally", file_name, content.len());
                }
                Err(e) => {
                    tracing::warn!("[CACHE {}] failed to save locally: {}", file_name, e);
                }
            }
        }))
    }
}
