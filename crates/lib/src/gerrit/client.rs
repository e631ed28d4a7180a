//! reqwest-based client for the Gerrit REST API.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Method, RequestBuilder,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{AccountInfo, GerritError, ReviewAccounts, SshKeyInfo};
use crate::{
    constants::{DEFAULT_REQUEST_TIMEOUT_SECS, GERRIT_AUTH_PREFIX, GERRIT_XSSI_PREFIX},
    http::{build_client, endpoint, error_body},
};

/// HTTP basic auth credentials for Gerrit.
#[derive(Clone, PartialEq, Eq)]
pub struct GerritCredentials {
    pub username: String,
    password: String,
}

impl fmt::Debug for GerritCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GerritCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection settings for a Gerrit server.
#[derive(Debug, Clone)]
pub struct GerritConfig {
    /// Base URL of the server, e.g. `https://review.example.com`.
    pub base_url: Url,
    credentials: Option<GerritCredentials>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GerritConfig {
    /// Anonymous access to the server at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            credentials: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Use HTTP basic auth. Ignored unless both values are non-empty.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let password = password.into();
        self.credentials = (!username.is_empty() && !password.is_empty())
            .then_some(GerritCredentials { username, password });
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Client for the Gerrit account and SSH key endpoints.
///
/// When credentials are configured, requests go through the authenticated
/// `/a/` namespace. Responses have their XSSI guard stripped before decoding.
#[derive(Debug, Clone)]
pub struct GerritClient {
    config: GerritConfig,
    http: reqwest::Client,
}

impl GerritClient {
    /// Create a client for `config`, failing if the base URL cannot carry API paths.
    pub fn new(config: GerritConfig) -> Result<Self, GerritError> {
        endpoint(&config.base_url, &[]).map_err(|reason| GerritError::InvalidUrl {
            url: config.base_url.to_string(),
            reason,
        })?;
        let http = build_client(config.timeout).map_err(GerritError::ClientBuild)?;
        Ok(Self { config, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Fetch the server version string.
    pub async fn version(&self) -> Result<String, GerritError> {
        let url = self.url(&["config", "server", "version"])?;
        self.send_json(self.request(Method::GET, &url), &url).await
    }

    /// Run an account query such as `email:"dev@example.com"`.
    pub async fn query_accounts(&self, query: &str) -> Result<Vec<AccountInfo>, GerritError> {
        let mut url = self.url(&["accounts", ""])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("o", "DETAILS");
        self.send_json(self.request(Method::GET, &url), &url).await
    }

    /// List the SSH keys registered for an account.
    pub async fn list_ssh_keys(&self, account_id: i64) -> Result<Vec<SshKeyInfo>, GerritError> {
        let id = account_id.to_string();
        let url = self.url(&["accounts", &id, "sshkeys"])?;
        self.send_json(self.request(Method::GET, &url), &url).await
    }

    /// Add an SSH key to an account. The key line is sent as plain text.
    pub async fn add_ssh_key(&self, account_id: i64, key: &str) -> Result<SshKeyInfo, GerritError> {
        let id = account_id.to_string();
        let url = self.url(&["accounts", &id, "sshkeys"])?;
        let request = self
            .request(Method::POST, &url)
            .header(CONTENT_TYPE, "text/plain")
            .body(key.to_string());
        self.send_json(request, &url).await
    }

    fn url(&self, segments: &[&str]) -> Result<Url, GerritError> {
        let result = if self.config.is_authenticated() {
            let mut prefixed = Vec::with_capacity(segments.len() + 1);
            prefixed.push(GERRIT_AUTH_PREFIX);
            prefixed.extend_from_slice(segments);
            endpoint(&self.config.base_url, &prefixed)
        } else {
            endpoint(&self.config.base_url, segments)
        };
        result.map_err(|reason| GerritError::InvalidUrl {
            url: self.config.base_url.to_string(),
            reason,
        })
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url.clone())
            .header(ACCEPT, "application/json");
        match &self.config.credentials {
            Some(creds) => builder.basic_auth(&creds.username, Some(&creds.password)),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, GerritError> {
        debug!(url = %url, "Gerrit request");
        let response = request.send().await.map_err(|source| GerritError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GerritError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let body = response.text().await.map_err(|source| GerritError::Request {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(strip_xssi_prefix(&body)).map_err(|e| GerritError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ReviewAccounts for GerritClient {
    async fn query_accounts(&self, query: &str) -> Result<Vec<AccountInfo>, GerritError> {
        GerritClient::query_accounts(self, query).await
    }

    async fn list_ssh_keys(&self, account_id: i64) -> Result<Vec<SshKeyInfo>, GerritError> {
        GerritClient::list_ssh_keys(self, account_id).await
    }

    async fn add_ssh_key(&self, account_id: i64, key: &str) -> Result<SshKeyInfo, GerritError> {
        GerritClient::add_ssh_key(self, account_id, key).await
    }
}

/// Remove the `)]}'` line Gerrit puts in front of JSON bodies.
pub fn strip_xssi_prefix(body: &str) -> &str {
    body.strip_prefix(GERRIT_XSSI_PREFIX)
        .unwrap_or(body)
        .trim_start()
}
