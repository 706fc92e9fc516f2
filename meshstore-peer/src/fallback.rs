use super::config::NodeConfig;
use super::peer::PeerClient;
use bytes::Bytes;
use meshstore::{FileName, RetrievalOutcome};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Result of one fan-out round across the peer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { peer: String, content: Bytes },
    AllMissed,
}

/// Races a file lookup across every configured neighbour.
///
/// All peers are asked concurrently. The first `Found` in completion order
/// wins and the remaining fetches are aborted. Misses, unreachable peers and
/// panicked fetch tasks are all absorbed here. When several peers hold
/// different bytes under the same name, whichever answers first is returned.
pub struct FallbackCoordinator {
    peers: Vec<Arc<PeerClient>>,
}

impl FallbackCoordinator {
    pub fn new(peers: Vec<PeerClient>) -> Self {
        Self {
            peers: peers.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_config(config: &NodeConfig) -> Self {
        let timeout = config.peer_timeout();
        let peers = config
            .neighbors
            .iter()
            .map(|addr| PeerClient::new(addr.clone(), timeout))
            .collect();
        Self::new(peers)
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    pub fn peer_addrs(&self) -> Vec<&str> {
        self.peers.iter().map(|p| p.addr()).collect()
    }

    pub async fn resolve(&self, file_name: &FileName) -> Resolution {
        if self.peers.is_empty() {
            return Resolution::AllMissed;
        }

        let mut join_set = JoinSet::new();
        for peer in &self.peers {
            let peer = Arc::clone(peer);
            let file_name = file_name.clone();
            join_set.spawn(async move {
                let outcome = peer.fetch(&file_name).await;
                (peer.addr().to_string(), outcome)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((peer, RetrievalOutcome::Found(content))) => {
                    join_set.abort_all();
                    tracing::info!(
                        "[FALLBACK {}] found on peer {} ({} bytes)",
                        file_name,
                        peer,
                        content.len()
                    );
                    return Resolution::Found { peer, content };
                }
                Ok((peer, RetrievalOutcome::NotFound)) => {
                    tracing::debug!("[FALLBACK {}] peer {} does not have it", file_name, peer);
                }
                Ok((peer, RetrievalOutcome::ConnectionError(reason))) => {
                    tracing::warn!(
                        "[FALLBACK {}] peer {} unreachable: {}",
                        file_name,
                        peer,
                        reason
                    );
                }
                Err(e) => {
                    tracing::warn!("[FALLBACK {}] peer fetch task failed: {}", file_name, e);
                }
            }
        }

        tracing::info!(
            "[FALLBACK {}] missed on all {} peers",
            file_name,
            self.peers.len()
        );
        Resolution::AllMissed
    }
}
