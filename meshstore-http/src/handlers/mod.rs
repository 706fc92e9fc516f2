use meshstore::{LocalStore, NodeIdentity};
use meshstore_peer::{CacheWriter, FallbackCoordinator, NodeConfig};
use std::sync::Arc;

pub mod files;
pub mod info;

pub struct AppState {
    pub identity: NodeIdentity,
    pub store: Arc<LocalStore>,
    pub fallback: Arc<FallbackCoordinator>,
    pub cache: CacheWriter,
}

impl AppState {
    /// Build every component from the immutable node configuration.
    pub fn from_config(config: &NodeConfig) -> meshstore::Result<Arc<Self>> {
        let store = Arc::new(LocalStore::open(&config.directory)?);
        let fallback = Arc::new(FallbackCoordinator::from_config(config));
        let cache = CacheWriter::new(Arc::clone(&store), config.save_file);

        Ok(Arc::new(Self {
            identity: config.identity(),
            store,
            fallback,
            cache,
        }))
    }
}

pub use files::{get_file, get_local, post_file};
pub use info::get_info;
