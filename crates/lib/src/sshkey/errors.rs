//! Error types for SSH public key parsing.

use thiserror::Error;

/// Errors produced while parsing an OpenSSH public key line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum KeyError {
    /// The key line does not have at least an algorithm and key material.
    #[error("Invalid key format: {reason}")]
    InvalidKeyFormat { reason: String },
}

impl KeyError {
    /// Check if this error is a structural format problem.
    pub fn is_format_error(&self) -> bool {
        matches!(self, KeyError::InvalidKeyFormat { .. })
    }
}

impl From<KeyError> for crate::Error {
    fn from(err: KeyError) -> Self {
        crate::Error::Key(err)
    }
}
