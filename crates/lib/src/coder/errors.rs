//! Error types for the Coder API client.

use thiserror::Error;

/// Errors that can occur while talking to the Coder API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoderError {
    /// The configured base URL cannot be extended with an API path.
    #[error("Invalid Coder URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build Coder HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("Coder request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Coder answered with a non-success status.
    #[error("Coder HTTP status {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode Coder response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl CoderError {
    /// The HTTP status, if Coder answered with a non-success status.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the request failed before a response arrived.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, CoderError::Request { .. })
    }

    /// Check if the response was a 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if the session token was rejected.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Check if this is a configuration problem rather than a remote failure.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CoderError::InvalidUrl { .. } | CoderError::ClientBuild(_)
        )
    }

    /// Check if the response body could not be decoded.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, CoderError::Decode { .. })
    }
}

impl From<CoderError> for crate::Error {
    fn from(err: CoderError) -> Self {
        crate::Error::Coder(err)
    }
}
