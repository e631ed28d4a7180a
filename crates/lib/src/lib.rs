//!
//! coder-gerrit-sync: keep Gerrit accounts' SSH keys in step with Coder workspaces.
//! This library provides the clients and the reconciliation routine used by the
//! `coder-gerrit-ssh-sync` binary.
//!
//! ## Core Concepts
//!
//! * **Users (`coder::User`)**: Coder users, enumerated from the workspace directory. A user's
//!   email is the join key to Gerrit.
//! * **Accounts (`gerrit::AccountInfo`)**: Gerrit accounts. Zero, one or many may match a
//!   single email; accounts with a non-positive id are never touched.
//! * **Keys (`sshkey::SshPublicKey`)**: OpenSSH public keys. Two keys are equivalent when
//!   algorithm and key material match; the comment is ignored.
//! * **Syncer (`sync::Syncer`)**: composes the above. For one user it resolves matching
//!   accounts, fetches and normalizes the key once, then registers it on every account
//!   that does not carry it yet, collecting per-account failures instead of stopping.

pub mod bootstrap;
pub mod coder;
pub mod constants;
pub mod gerrit;
mod http;
pub mod sshkey;
pub mod sync;

pub use bootstrap::{PlatformVersions, check_platforms, clients, connect};
pub use sshkey::SshPublicKey;
pub use sync::{SyncConfig, Syncer};

/// Result type used throughout the coder-gerrit-sync library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the coder-gerrit-sync library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured key parsing errors from the sshkey module
    #[error(transparent)]
    Key(sshkey::KeyError),

    /// Structured Coder API errors from the coder module
    #[error(transparent)]
    Coder(coder::CoderError),

    /// Structured Gerrit API errors from the gerrit module
    #[error(transparent)]
    Gerrit(gerrit::GerritError),

    /// Structured sync errors from the sync module
    #[error(transparent)]
    Sync(sync::SyncError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Key(_) => "sshkey",
            Error::Coder(_) => "coder",
            Error::Gerrit(_) => "gerrit",
            Error::Sync(_) => "sync",
        }
    }

    /// Check if this error came from a failed network round trip (transport or HTTP status).
    pub fn is_remote_error(&self) -> bool {
        match self {
            Error::Coder(err) => err.is_transport_error() || err.status().is_some(),
            Error::Gerrit(err) => err.is_transport_error() || err.status().is_some(),
            _ => false,
        }
    }

    /// Check if this error indicates rejected credentials.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::Coder(err) => err.is_authentication_error(),
            Error::Gerrit(err) => err.is_authentication_error(),
            _ => false,
        }
    }

    /// Check if this error is caused by invalid configuration (URLs, client setup).
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Coder(err) => err.is_configuration_error(),
            Error::Gerrit(err) => err.is_configuration_error(),
            _ => false,
        }
    }

    /// Check if this error is a malformed SSH key.
    pub fn is_key_error(&self) -> bool {
        matches!(self, Error::Key(_))
    }
}
