//! HTTP client for a Supabase-style marketplace backend.
//!
//! Catalog data is read through the PostgREST endpoints under `/rest/v1`,
//! authentication goes through the `/auth/v1` endpoints. The session obtained
//! on sign-in is kept in memory for the lifetime of the client.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;

use super::error::{BackendError, BackendResult};
use super::trait_def::{AuthBackend, CatalogBackend};
use crate::catalog_store::{AppDetails, AppFilters, AppStatus, Category};
use crate::session_store::{AuthIdentity, AuthSession, User};

/// Columns requested for app listings, with the owner summary embedded.
const APP_SELECT: &str = "*,user:users(id,full_name,avatar_url)";

/// Fields checked, in order, for a human-readable message in error bodies.
const ERROR_MESSAGE_KEYS: &[&str] = &["msg", "message", "error_description", "error"];

pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    session: Mutex<Option<AuthSession>>,
}

impl RestBackend {
    /// Create a new backend client.
    ///
    /// # Arguments
    /// * `base_url` - Project URL (e.g., "https://xyz.supabase.co")
    /// * `anon_key` - Public access key sent with every request
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: String, anon_key: String, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            anon_key,
            session: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn access_token(&self) -> Option<String> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    /// Adds the api key and the bearer token (session token once signed in,
    /// api key otherwise).
    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .access_token()
            .await
            .unwrap_or_else(|| self.anon_key.clone());
        request.header("apikey", &self.anon_key).bearer_auth(token)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> BackendResult<Vec<T>> {
        let request = self
            .authorized(self.client.get(self.rest_url(table)).query(query))
            .await;
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Query parameters for listing published apps with the given filters.
pub(crate) fn list_apps_query(filters: &AppFilters) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("select", APP_SELECT.to_string()),
        ("status", format!("eq.{}", AppStatus::Published.as_str())),
        ("order", filters.sort_by.order_clause().to_string()),
    ];
    if let Some(category) = filters.category.as_deref().filter(|c| !c.is_empty()) {
        query.push(("category", format!("eq.{}", category)));
    }
    if let Some(search) = filters
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query.push(("title", format!("ilike.*{}*", search)));
    }
    query
}

async fn check_status(response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::api(status.as_u16(), error_message(status, &body)))
}

/// Extracts the message of an error body, falling back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ERROR_MESSAGE_KEYS.iter().find_map(|key| {
                value
                    .get(*key)
                    .and_then(|v| v.as_str())
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

#[async_trait]
impl CatalogBackend for RestBackend {
    async fn list_apps(&self, filters: &AppFilters) -> BackendResult<Vec<AppDetails>> {
        debug!("Listing apps with filters {:?}", filters);
        self.select("apps", &list_apps_query(filters)).await
    }

    async fn get_app(&self, id: &str) -> BackendResult<AppDetails> {
        let query = [
            ("select", APP_SELECT.to_string()),
            ("id", format!("eq.{}", id)),
        ];
        let rows: Vec<AppDetails> = self.select("apps", &query).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn list_categories(&self) -> BackendResult<Vec<Category>> {
        let query = [("select", "*".to_string()), ("order", "name.asc".to_string())];
        self.select("categories", &query).await
    }
}

#[async_trait]
impl AuthBackend for RestBackend {
    async fn get_session(&self) -> BackendResult<Option<AuthSession>> {
        Ok(self.session.lock().await.clone())
    }

    async fn get_user_record(&self, user_id: &str) -> BackendResult<Option<User>> {
        let query = [
            ("select", "*".to_string()),
            ("id", format!("eq.{}", user_id)),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<User> = self.select("users", &query).await?;
        Ok(rows.into_iter().next())
    }

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<()> {
        debug!("Signing in {}", email);
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let session: AuthSession = check_status(response).await?.json().await?;
        *self.session.lock().await = Some(session);
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> BackendResult<()> {
        debug!("Signing up {}", email);
        let response = self
            .client
            .post(self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn sign_out(&self) -> BackendResult<()> {
        let Some(token) = self.access_token().await else {
            return Ok(());
        };
        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;
        // An expired or unknown token means the server side is already gone.
        if !matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND
        ) {
            check_status(response).await?;
        }
        *self.session.lock().await = None;
        Ok(())
    }

    async fn get_current_identity(&self) -> BackendResult<Option<AuthIdentity>> {
        let Some(token) = self.access_token().await else {
            return Ok(None);
        };
        let response = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        Ok(Some(check_status(response).await?.json().await?))
    }
}
