//! Where user records come from.

use crate::error::FetchError;
use crate::types::{QueryKey, UserRecord};
use futures::future::BoxFuture;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Public endpoint serving sample user records
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// A fetch function for user records
///
/// Implementations return `'static` futures so the reducer can move them into
/// an effect without borrowing the environment.
pub trait UserSource: Send + Sync {
    /// Fetch the records for `key`
    fn fetch(&self, key: &QueryKey) -> BoxFuture<'static, Result<Vec<UserRecord>, FetchError>>;
}

/// Parse a JSON array of user records
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if `body` is not an array of user records.
pub fn parse_users(body: &str) -> Result<Vec<UserRecord>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Fetches user records over HTTP
#[derive(Clone)]
pub struct HttpUserSource {
    client: Client,
    url: String,
}

impl HttpUserSource {
    /// Create a source reading from `url`
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Create a source with a preconfigured client
    #[must_use]
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The endpoint this source reads from
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpUserSource {
    fn default() -> Self {
        Self::new(DEFAULT_USERS_URL)
    }
}

impl UserSource for HttpUserSource {
    fn fetch(&self, key: &QueryKey) -> BoxFuture<'static, Result<Vec<UserRecord>, FetchError>> {
        let client = self.client.clone();
        let url = self.url.clone();
        let key = key.clone();

        Box::pin(async move {
            tracing::debug!(%key, %url, "Fetching users");

            let response = client
                .get(&url)
                .header("accept", "application/json")
                .send()
                .await
                .map_err(|e| FetchError::Http(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| FetchError::Http(e.to_string()))?;

            if !status.is_success() {
                return Err(FetchError::Unavailable {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let users = parse_users(&body)?;
            tracing::debug!(%key, count = users.len(), "Users fetched");
            Ok(users)
        })
    }
}

/// In-memory source, optionally with a simulated latency
#[derive(Clone, Debug, Default)]
pub struct StaticUserSource {
    users: Arc<Vec<UserRecord>>,
    latency: Duration,
}

impl StaticUserSource {
    /// Create a source serving `users` immediately
    #[must_use]
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users: Arc::new(users),
            latency: Duration::ZERO,
        }
    }

    /// Delay every fetch by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// A small built-in set of records
    #[must_use]
    pub fn sample() -> Self {
        let record = |id: u64, name: &str, email: &str, phone: &str, website: &str| UserRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            website: website.to_string(),
        };

        Self::new(vec![
            record(1, "Ada Lovelace", "ada@example.org", "555-0101", "ada.example.org"),
            record(2, "Alan Turing", "alan@example.org", "555-0102", "alan.example.org"),
            record(3, "Grace Hopper", "grace@example.org", "555-0103", "grace.example.org"),
        ])
    }
}

impl UserSource for StaticUserSource {
    fn fetch(&self, key: &QueryKey) -> BoxFuture<'static, Result<Vec<UserRecord>, FetchError>> {
        let users = Arc::clone(&self.users);
        let latency = self.latency;
        let key = key.clone();

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            tracing::trace!(%key, count = users.len(), "Serving static users");
            Ok(users.as_ref().clone())
        })
    }
}
