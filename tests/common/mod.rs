#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{header, Response, StatusCode};
use serde_json::{json, Value};

use blog_api::app::{router, AppState};
use blog_api::auth::SessionIssuer;
use blog_api::config::{AppConfig, Environment};
use blog_api::database::MemoryStore;

pub const TEST_SECRET: &str = "integration-test-secret";

/// An in-process server on its own port, backed by a fresh in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    /// Issuer sharing the server's secret, for minting tokens directly
    pub issuer: SessionIssuer,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = AppConfig::new(Environment::Development, TEST_SECRET)?;
        let issuer = SessionIssuer::from_config(&config.security);
        let app = router(AppState::new(config, Arc::new(MemoryStore::new())));

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
            issuer,
            handle,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /jwt and return the token from the `Set-Cookie` header
    pub async fn login(&self, email: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/jwt"))
            .json(&json!({ "email": email }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        session_cookie(&res).context("login response did not set a session cookie")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.header(header::COOKIE, format!("token={}", token));
        }
        Ok(req.send().await?)
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Result<Response> {
        let mut req = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            req = req.header(header::COOKIE, format!("token={}", token));
        }
        Ok(req.send().await?)
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> Result<Response> {
        let mut req = self.client.put(self.url(path)).json(&body);
        if let Some(token) = token {
            req = req.header(header::COOKIE, format!("token={}", token));
        }
        Ok(req.send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// Create a blog owned by `owner` through the gated POST /blog route
    pub async fn create_blog(&self, token: &str, title: &str, owner: &str) -> Result<Value> {
        let res = self.post("/blog", Some(token), blog_body(title, owner)).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create blog failed: {}", res.status());
        let body: Value = res.json().await?;
        Ok(body["data"].clone())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn blog_body(title: &str, owner: &str) -> Value {
    json!({
        "title": title,
        "image": "https://img.test/cover.png",
        "category": "rust",
        "short_description": "A short summary",
        "long_description": "A much longer body of text",
        "user_email": owner,
        "user_name": "Test Author"
    })
}

/// Raw `Set-Cookie` header for the session cookie, if present
pub fn set_cookie_header(res: &Response) -> Option<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .map(str::to_string)
}

/// Value of the session cookie set by a response, if non-empty
pub fn session_cookie(res: &Response) -> Option<String> {
    let header = set_cookie_header(res)?;
    let value = header.strip_prefix("token=")?.split(';').next()?.to_string();
    (!value.is_empty()).then_some(value)
}
