//! Error types for the Gerrit REST client.

use thiserror::Error;

/// Errors that can occur while talking to the Gerrit REST API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GerritError {
    /// The configured base URL cannot be extended with an API path.
    #[error("Invalid Gerrit URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build Gerrit HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("Gerrit request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Gerrit answered with a non-success status.
    #[error("Gerrit HTTP status {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode Gerrit response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl GerritError {
    /// The HTTP status, if Gerrit answered with a non-success status.
    pub fn status(&self) -> Option<u16> {
        match self {
            GerritError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the request failed before a response arrived.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, GerritError::Request { .. })
    }

    /// Check if the response was a 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if the credentials were rejected or lack the required capability.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Check if Gerrit refused the request content (e.g. an unparseable key).
    pub fn is_rejected(&self) -> bool {
        matches!(self.status(), Some(400 | 409 | 422))
    }

    /// Check if this is a configuration problem rather than a remote failure.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            GerritError::InvalidUrl { .. } | GerritError::ClientBuild(_)
        )
    }
}

impl From<GerritError> for crate::Error {
    fn from(err: GerritError) -> Self {
        crate::Error::Gerrit(err)
    }
}
