use meshstore::{FileName, RetrievalOutcome};
use reqwest::StatusCode;
use std::time::Duration;

/// HTTP client wrapper for fetching files from a single peer node.
///
/// Only the peer's local-only endpoint is ever called, so a fetch never
/// triggers the peer's own fallback.
pub struct PeerClient {
    addr: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl PeerClient {
    pub fn new(addr: String, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let base_url = base_url_for(&addr);

        Self {
            addr,
            base_url,
            http_client,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask this peer for `file_name`. Never fails: unreachable peers come back
    /// as `ConnectionError`, anything other than 200 counts as a miss.
    pub async fn fetch(&self, file_name: &FileName) -> RetrievalOutcome {
        let url = format!(
            "{}/from_node/{}",
            self.base_url,
            urlencoding::encode(file_name.as_str())
        );

        let response = match self.http_client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                return RetrievalOutcome::ConnectionError(format!(
                    "Failed to send request to {}: {}",
                    self.addr, e
                ))
            }
        };

        match response.status() {
            StatusCode::OK => match response.bytes().await {
                Ok(content) => RetrievalOutcome::Found(content),
                Err(e) => RetrievalOutcome::ConnectionError(format!(
                    "Failed to read body from {}: {}",
                    self.addr, e
                )),
            },
            StatusCode::NOT_FOUND => RetrievalOutcome::NotFound,
            other => {
                tracing::warn!(
                    "[PEER {}] unexpected status {} for {}, treating as miss",
                    self.addr,
                    other,
                    file_name
                );
                RetrievalOutcome::NotFound
            }
        }
    }
}

fn base_url_for(addr: &str) -> String {
    let addr = addr.trim().trim_end_matches('/');
    if addr.starts_with("http://") || addr.starts_with("https://") {
        addr.to_string()
    } else {
        format!("http://{}", addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn name(s: &str) -> FileName {
        FileName::parse(s).unwrap()
    }

    fn client_for(server: &MockServer) -> PeerClient {
        PeerClient::new(server.uri(), Duration::from_secs(5))
    }

    #[test]
    fn test_peer_client_creation() {
        let peer = PeerClient::new("127.0.0.1:8082".to_string(), Duration::from_secs(5));

        assert_eq!(peer.addr(), "127.0.0.1:8082");
        assert_eq!(peer.base_url(), "http://127.0.0.1:8082");
    }

    #[test]
    fn test_base_url_keeps_explicit_scheme() {
        assert_eq!(base_url_for("http://node-b:8082/"), "http://node-b:8082");
        assert_eq!(base_url_for("https://node-b"), "https://node-b");
    }

    #[tokio::test]
    async fn test_fetch_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/from_node/x.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).fetch(&name("x.txt")).await;
        assert_eq!(outcome, RetrievalOutcome::Found(Bytes::from_static(b"hello")));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/from_node/x.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = client_for(&server).fetch(&name("x.txt")).await;
        assert_eq!(outcome, RetrievalOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_miss() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let outcome = client_for(&server).fetch(&name("x.txt")).await;
        assert_eq!(outcome, RetrievalOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_encodes_file_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/from_node/my%20file%231.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"spaced".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).fetch(&name("my file#1.txt")).await;
        assert!(outcome.is_found());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_peer() {
        // Bind then drop to get a port nothing is listening on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let peer = PeerClient::new(addr, Duration::from_secs(5));
        let outcome = peer.fetch(&name("x.txt")).await;
        assert!(matches!(outcome, RetrievalOutcome::ConnectionError(_)));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"late".to_vec())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let peer = PeerClient::new(server.uri(), Duration::from_millis(200));
        let outcome = peer.fetch(&name("x.txt")).await;
        assert!(matches!(outcome, RetrievalOutcome::ConnectionError(_)));
    }
}
