//! reqwest-based client for the Coder REST API.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{BuildInfo, CoderError, GitSshKey, User, UsersPage, WorkspaceDirectory};
use crate::{
    constants::{CODER_SESSION_HEADER, CODER_USERS_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS},
    http::{build_client, endpoint, error_body},
};

/// Connection settings for a Coder deployment.
#[derive(Clone)]
pub struct CoderConfig {
    /// Base URL of the deployment, e.g. `https://coder.example.com`.
    pub base_url: Url,
    session_token: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Users requested per page when listing.
    pub page_size: usize,
}

impl CoderConfig {
    pub fn new(base_url: Url, session_token: impl Into<String>) -> Self {
        Self {
            base_url,
            session_token: session_token.into(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            page_size: CODER_USERS_PAGE_SIZE,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl fmt::Debug for CoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoderConfig")
            .field("base_url", &self.base_url.as_str())
            .field("session_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Client for the subset of the Coder API this tool needs.
///
/// Every request carries the session token header and asks for JSON.
/// The underlying reqwest client is shared and safe for concurrent use.
#[derive(Debug, Clone)]
pub struct CoderClient {
    config: CoderConfig,
    http: reqwest::Client,
}

impl CoderClient {
    /// Create a client for `config`, failing if the base URL cannot carry API paths.
    pub fn new(config: CoderConfig) -> Result<Self, CoderError> {
        endpoint(&config.base_url, &[]).map_err(|reason| CoderError::InvalidUrl {
            url: config.base_url.to_string(),
            reason,
        })?;
        let http = build_client(config.timeout).map_err(CoderError::ClientBuild)?;
        Ok(Self { config, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Fetch the deployment's build information.
    pub async fn build_info(&self) -> Result<BuildInfo, CoderError> {
        let url = self.url(&["api", "v2", "buildinfo"])?;
        self.get_json(url).await
    }

    /// Fetch one page of users.
    pub async fn users_page(&self, offset: usize, limit: usize) -> Result<UsersPage, CoderError> {
        let mut url = self.url(&["api", "v2", "users"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        self.get_json(url).await
    }

    /// Fetch a user's Git SSH key.
    pub async fn git_ssh_key(&self, user_id: &str) -> Result<GitSshKey, CoderError> {
        let url = self.url(&["api", "v2", "users", user_id, "gitsshkey"])?;
        self.get_json(url).await
    }

    /// List every user, following pages until a short page is returned.
    pub async fn list_users(&self) -> Result<Vec<User>, CoderError> {
        let limit = self.config.page_size.max(1);
        let mut users: Vec<User> = Vec::new();
        loop {
            let page = self.users_page(users.len(), limit).await?;
            let fetched = page.users.len();
            users.extend(page.users);

            let reached_count = page.count.is_some_and(|count| users.len() >= count);
            if fetched < limit || reached_count {
                break;
            }
        }
        debug!(count = users.len(), "Listed Coder users");
        Ok(users)
    }

    fn url(&self, segments: &[&str]) -> Result<Url, CoderError> {
        endpoint(&self.config.base_url, segments).map_err(|reason| CoderError::InvalidUrl {
            url: self.config.base_url.to_string(),
            reason,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CoderError> {
        debug!(url = %url, "Coder GET");
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .header(CODER_SESSION_HEADER, &self.config.session_token)
            .send()
            .await
            .map_err(|source| CoderError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| CoderError::Request {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|e| CoderError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl WorkspaceDirectory for CoderClient {
    async fn list_users(&self) -> Result<Vec<User>, CoderError> {
        CoderClient::list_users(self).await
    }

    async fn git_ssh_key(&self, user_id: &str) -> Result<GitSshKey, CoderError> {
        CoderClient::git_ssh_key(self, user_id).await
    }
}
