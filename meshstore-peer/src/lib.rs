pub mod cache;
pub mod config;
pub mod fallback;
pub mod peer;

pub use cache::CacheWriter;
pub use config::NodeConfig;
pub use fallback::{FallbackCoordinator, Resolution};
pub use peer::PeerClient;
