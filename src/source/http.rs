//! HTTP catalog source
//!
//! Reads the course and user collections from the platform's REST backend:
//! `GET {base}/courses` and `GET {base}/admin/users`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{decode_collection, CatalogSource, SourceError, COURSES, USERS};
use crate::domain::{Course, UserAccount};

/// HTTP catalog configuration.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Backend base URL, e.g. `https://lms.example.com/api`
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    pub courses_path: String,
    pub users_path: String,
}

impl Default for HttpCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            timeout: Duration::from_secs(10),
            courses_path: "/courses".to_string(),
            users_path: "/admin/users".to_string(),
        }
    }
}

impl HttpCatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Catalog backed by the REST backend.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    config: HttpCatalogConfig,
}

impl HttpCatalog {
    /// Create a new HTTP catalog with the given configuration.
    pub fn new(config: HttpCatalogConfig) -> Result<Self, SourceError> {
        if config.base_url.trim().is_empty() {
            return Err(SourceError::Config("base URL not configured".to_string()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    #[tracing::instrument(skip(self), fields(url = tracing::field::Empty))]
    async fn get_collection<T>(&self, collection: &'static str, path: &str) -> Result<Vec<T>, SourceError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        tracing::Span::current().record("url", url.as_str());

        let mut request = self.client.get(&url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "Upstream rejected catalog request");
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|source| SourceError::Decode { collection, source })?;

        let entries = decode_collection(collection, body)?;
        tracing::debug!(count = entries.len(), "Fetched catalog collection");
        Ok(entries)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_courses(&self) -> Result<Vec<Course>, SourceError> {
        self.get_collection(COURSES, &self.config.courses_path).await
    }

    async fn fetch_users(&self) -> Result<Vec<UserAccount>, SourceError> {
        self.get_collection(USERS, &self.config.users_path).await
    }
}
