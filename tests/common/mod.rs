use meshstore_peer::NodeConfig;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub struct TestNode {
    pub addr: String,
    pub dir: TempDir,
}

impl TestNode {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn put_local(&self, name: &str, content: &[u8]) {
        std::fs::write(self.dir.path().join(name), content).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Start a node on an ephemeral port with its own temp directory.
pub async fn spawn_node(neighbors: Vec<String>, save_file: bool) -> TestNode {
    let dir = TempDir::new().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let local = listener.local_addr().unwrap();

    let config = NodeConfig {
        host: local.ip().to_string(),
        port: local.port(),
        directory: dir.path().to_path_buf(),
        neighbors,
        save_file,
        peer_timeout_secs: 2,
    };
    let state = meshstore_http::handlers::AppState::from_config(&config).unwrap();
    let app = meshstore_http::router(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    TestNode {
        addr: local.to_string(),
        dir,
    }
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub fn unreachable_addr() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);
    addr
}

/// Poll until `path` exists or the deadline passes.
#[allow(dead_code)]
pub async fn wait_for_file(path: &Path, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    path.exists()
}
