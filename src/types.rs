use crate::error::{MeshError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Prefix of the temp files the store stages writes in. Reserved, so a
/// half-written cache entry can never be requested by name.
pub const STAGING_PREFIX: &str = ".meshstore-";

/// A file name that is safe to join onto a node's base directory.
///
/// The store namespace is flat: a valid name is exactly one normal path
/// component, so `base_dir.join(name)` can never escape `base_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(MeshError::InvalidFileName("empty name".to_string()));
        }
        if raw.contains('/') || raw.contains('\\') {
            return Err(MeshError::InvalidFileName(format!(
                "{:?} contains a path separator",
                raw
            )));
        }
        if raw.chars().any(|c| c.is_control()) {
            return Err(MeshError::InvalidFileName(format!(
                "{:?} contains control characters",
                raw
            )));
        }

        if raw.starts_with(STAGING_PREFIX) {
            return Err(MeshError::InvalidFileName(format!(
                "{:?} uses the reserved prefix {:?}",
                raw, STAGING_PREFIX
            )));
        }

        let mut components = Path::new(raw).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(FileName(raw.to_string())),
            _ => Err(MeshError::InvalidFileName(format!(
                "{:?} does not resolve inside the store",
                raw
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against a base directory.
    pub fn resolve(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.0)
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result of asking one source (local directory or peer) for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOutcome {
    Found(Bytes),
    NotFound,
    /// Peer could not be reached or the transfer broke off.
    ConnectionError(String),
}

impl RetrievalOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RetrievalOutcome::Found(_))
    }

    pub fn into_content(self) -> Option<Bytes> {
        match self {
            RetrievalOutcome::Found(content) => Some(content),
            _ => None,
        }
    }
}

/// Static identity of this node, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    pub host: String,
    pub port: u16,
    pub base_dir: PathBuf,
}

impl NodeIdentity {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn info(&self) -> NodeInfo {
        NodeInfo {
            address: self.address(),
            base_dir: self.base_dir.display().to_string(),
        }
    }
}

/// Body of `GET /info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub address: String,
    pub base_dir: String,
}
