//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers against PostgreSQL and
//! making HTTP requests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chatstream_api::{create_app, AppState};
use chatstream_common::AppConfig;
use chatstream_db::{create_pool, run_migrations, PgChatMessageRepository, PgUserRepository};
use chatstream_service::registration::{MailError, Mailer};
use chatstream_service::ServiceContextBuilder;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Mailer that keeps verification links so tests can follow them
#[derive(Debug, Default)]
pub struct CapturingMailer {
    links: Mutex<Vec<(String, String)>>,
}

impl CapturingMailer {
    /// Token from the last link mailed to `email`
    pub fn token_for(&self, email: &str) -> Option<String> {
        let links = self.links.lock().ok()?;
        links
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .and_then(|(_, link)| link.split("token=").nth(1))
            .map(String::from)
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send_verification(&self, email: &str, _username: &str, link: &str) -> Result<(), MailError> {
        self.links
            .lock()
            .map_err(|e| MailError::Delivery(e.to_string()))?
            .push((email.to_string(), link.to_string()));
        Ok(())
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub mailer: Arc<CapturingMailer>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let pool = create_pool(&chatstream_db::DatabaseConfig::from(&config.database)).await?;
        run_migrations(&pool, &config.database.migrations_dir).await?;

        let mailer = Arc::new(CapturingMailer::default());
        let ctx = ServiceContextBuilder::new()
            .message_repo(Arc::new(PgChatMessageRepository::new(pool.clone())))
            .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
            .mailer(Arc::clone(&mailer) as Arc<dyn Mailer>)
            .registration(config.registration.clone())
            .store_timeout(config.store.timeout())
            .build()?;

        let app = create_app(AppState::new(ctx, Some(pool), config));

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            mailer,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.put(self.url(path)).json(body).send().await?)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }
}

/// Create a test configuration from the environment with test defaults
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let migrations = concat!(env!("CARGO_MANIFEST_DIR"), "/../../crates/chatstream-db/migrations");
    let config = AppConfig::from_lookup(|key| {
        std::env::var(key).ok().or_else(|| match key {
            "API_PORT" => Some("0".to_string()),
            "DATABASE_MIGRATIONS_DIR" => Some(migrations.to_string()),
            _ => None,
        })
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
