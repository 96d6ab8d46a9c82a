//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use voicenotes_ai::MockGateway;
use voicenotes_server::{AppState, Server, ServerConfig};

/// Entry document written into every test server's static directory.
pub const INDEX_HTML: &str = "<!doctype html><html><body><h1>VoiceNotes</h1></body></html>";

/// A test server that runs in the background.
pub struct TestServer {
    /// The server's address.
    pub addr: SocketAddr,
    /// HTTP client configured for this server.
    pub client: Client,
    /// Shared state, for inspecting storage directly.
    pub state: AppState,
    /// The gateway the server calls.
    pub gateway: Arc<MockGateway>,
    /// Handle to the server task.
    _handle: JoinHandle<()>,
    /// Static asset directory.
    pub static_dir: TempDir,
}

impl TestServer {
    /// Start a new test server whose gateway always succeeds.
    pub async fn start() -> Result<Self> {
        Self::start_with_gateway(MockGateway::new("hello from audio", "Business report")).await
    }

    /// Start a new test server with the given gateway.
    pub async fn start_with_gateway(gateway: MockGateway) -> Result<Self> {
        let static_dir = TempDir::new()?;
        std::fs::write(static_dir.path().join("index.html"), INDEX_HTML)?;
        std::fs::create_dir(static_dir.path().join("js"))?;
        std::fs::write(static_dir.path().join("js/app.js"), "console.log('ok');")?;

        // Find an available port
        let addr = find_available_port().await?;

        let config = ServerConfig::new()
            .with_bind_address(addr)
            .with_static_dir(static_dir.path())
            .with_request_logging(false);

        let gateway = Arc::new(gateway);
        let state = AppState::in_memory(gateway.clone(), config);

        // Start server in background
        let server = Server::from_state(state.clone());
        let handle = tokio::spawn(async move {
            let _ = server.run_on(addr).await;
        });

        // Wait for server to be ready
        let client = Client::new();
        wait_for_server(&client, addr).await?;

        Ok(Self {
            addr,
            client,
            state,
            gateway,
            _handle: handle,
            static_dir,
        })
    }

    /// Get the base URL for the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Full URL for a path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.patch(self.url(path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Create a note over HTTP and return its JSON.
    pub async fn create_note(&self, title: &str) -> Result<serde_json::Value> {
        let resp = self
            .post("/api/notes")
            .json(&serde_json::json!({ "title": title }))
            .send()
            .await?;
        anyhow::ensure!(resp.status().as_u16() == 201, "create failed: {}", resp.status());
        Ok(resp.json().await?)
    }
}

/// Find an available port for the test server.
async fn find_available_port() -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

/// Wait for the server to become ready.
async fn wait_for_server(client: &Client, addr: SocketAddr) -> Result<()> {
    let url = format!("http://{}/api/", addr);

    let result = timeout(Duration::from_secs(5), async {
        loop {
            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                _ => tokio::time::sleep(Duration::from_millis(50)).await,
            }
        }
    })
    .await;

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e),
        Err(_) => anyhow::bail!("Timeout waiting for server to start"),
    }
}
