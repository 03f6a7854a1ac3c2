#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

/// Secrets injected into the spawned server; tests sign their own tokens
/// with these to exercise the verification paths.
pub const SIGNING_KEY: &str = "integration-access-secret";
pub const REFRESH_SIGNING_KEY: &str = "integration-refresh-secret";
pub const BASIC_TOKEN: &str = "integration-basic-token";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests.
        // Environment is inherited so DATABASE_URL from .env still applies.
        let mut cmd = Command::new("target/debug/account-api");
        cmd.env("PORT", port.to_string())
            .env("SIGNING_KEY", SIGNING_KEY)
            .env("REFRESH_SIGNING_KEY", REFRESH_SIGNING_KEY)
            .env("BASIC_TOKEN", BASIC_TOKEN)
            // Keep startup snappy when no database is reachable
            .env("DATABASE_CONNECT_TIMEOUT_SECS", "2")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Authorization header value that passes the static-token gate.
pub fn static_bearer() -> String {
    format!("Bearer {}", BASIC_TOKEN)
}
