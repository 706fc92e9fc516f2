use meshstore::{MeshError, NodeIdentity, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PEER_TIMEOUT_SECS: u64 = 5;

/// Startup settings for one node, read from a YAML file.
///
/// ```yaml
/// host: 127.0.0.1
/// port: 8081
/// directory: ./data/node-a
/// neighbors:
///   - 127.0.0.1:8082
///   - 127.0.0.1:8083
/// save_file: true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub directory: PathBuf,
    #[serde(default)]
    pub neighbors: Vec<String>, // e.g. "127.0.0.1:8082" or "http://node-b:8082"
    #[serde(default)]
    pub save_file: bool,
    #[serde(default = "default_peer_timeout_secs")]
    pub peer_timeout_secs: u64,
}

fn default_peer_timeout_secs() -> u64 {
    DEFAULT_PEER_TIMEOUT_SECS
}

impl NodeConfig {
    /// Load and validate settings from a YAML file. Any failure here is fatal
    /// for the process.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MeshError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml_str(&content)?;

        tracing::info!(
            "Loaded node config from {}: address={}:{}, neighbors={}, save_file={}",
            path.display(),
            config.host,
            config.port,
            config.neighbors.len(),
            config.save_file
        );
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: NodeConfig = serde_yaml::from_str(content)
            .map_err(|e| MeshError::Config(format!("Failed to parse settings: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(MeshError::Config("host must not be empty".into()));
        }
        if self.directory.as_os_str().is_empty() {
            return Err(MeshError::Config("directory must not be empty".into()));
        }
        if self.peer_timeout_secs == 0 {
            return Err(MeshError::Config(
                "peer_timeout_secs must be at least 1".into(),
            ));
        }
        for neighbor in &self.neighbors {
            if neighbor.trim().is_empty() {
                return Err(MeshError::Config("neighbor address must not be empty".into()));
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs)
    }

    pub fn identity(&self) -> NodeIdentity {
        NodeIdentity {
            host: self.host.clone(),
            port: self.port,
            base_dir: self.directory.clone(),
        }
    }
}
