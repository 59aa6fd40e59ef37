//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests
//! on behalf of a user.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use review_api::{create_app, create_app_state};
use review_common::AppConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Header carrying the caller's user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// User granted the super admin role when the test server starts
pub const SUPER_ADMIN: i64 = 1;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server over a fresh in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config(&[])?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        // Ephemeral port; the OS picks a free one
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    /// Get base URL for the API
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn as_user(builder: RequestBuilder, user_id: i64) -> RequestBuilder {
        builder.header(USER_ID_HEADER, user_id.to_string())
    }

    /// Make an anonymous GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request as `user_id`
    pub async fn get_as(&self, path: &str, user_id: i64) -> Result<Response> {
        Ok(Self::as_user(self.client.get(self.url(path)), user_id)
            .send()
            .await?)
    }

    /// Make an anonymous POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request as `user_id`
    pub async fn post_as<T: Serialize>(&self, path: &str, user_id: i64, body: &T) -> Result<Response> {
        Ok(Self::as_user(self.client.post(self.url(path)), user_id)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request as `user_id`
    pub async fn patch_as<T: Serialize>(&self, path: &str, user_id: i64, body: &T) -> Result<Response> {
        Ok(Self::as_user(self.client.patch(self.url(path)), user_id)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request as `user_id`
    pub async fn put_as<T: Serialize>(&self, path: &str, user_id: i64, body: &T) -> Result<Response> {
        Ok(Self::as_user(self.client.put(self.url(path)), user_id)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request as `user_id`
    pub async fn delete_as(&self, path: &str, user_id: i64) -> Result<Response> {
        Ok(Self::as_user(self.client.delete(self.url(path)), user_id)
            .send()
            .await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Memory-backed configuration with a bootstrap super admin
///
/// `overrides` replace or add environment entries.
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let super_admin = SUPER_ADMIN.to_string();
    let vars: HashMap<String, String> = [
        ("STORAGE_BACKEND", "memory"),
        ("BOOTSTRAP_SUPER_ADMIN", super_admin.as_str()),
        ("RATE_LIMIT_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "10000"),
    ]
    .iter()
    .chain(overrides)
    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
    .collect();

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
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

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Missing error code in {body}"))
}
