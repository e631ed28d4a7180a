//! Error types for the synchronization module.

use std::fmt;

use thiserror::Error;

use super::report::SyncReport;
use crate::{coder::CoderError, gerrit::GerritError, sshkey::KeyError};

/// Why a single Gerrit account could not be brought up to date.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountError {
    /// Listing the account's existing keys failed.
    #[error("list SSH keys: {0}")]
    KeyListFailed(#[source] GerritError),

    /// Registering the key on the account failed.
    #[error("add SSH key: {0}")]
    KeyRegisterFailed(#[source] GerritError),
}

impl AccountError {
    /// The underlying Gerrit error.
    pub fn gerrit_error(&self) -> &GerritError {
        match self {
            AccountError::KeyListFailed(err) | AccountError::KeyRegisterFailed(err) => err,
        }
    }
}

/// A failure recorded against one account during a user's sync.
#[derive(Debug)]
pub struct AccountFailure {
    pub account_id: i64,
    pub error: AccountError,
}

impl fmt::Display for AccountFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gerrit account {}: {}", self.account_id, self.error)
    }
}

/// Errors that can occur while syncing users.
///
/// Everything except [`SyncError::AccountsFailed`] aborts the user's sync
/// before any account is touched. `AccountsFailed` is returned after every
/// matched account has been processed and keeps each account's cause.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    /// Listing Coder users failed; no user could be processed.
    #[error("list Coder users: {0}")]
    UserListFailed(#[source] CoderError),

    /// The user has no email to match Gerrit accounts against.
    #[error("Coder user {user} has no email address")]
    EmptyEmail { user: String },

    /// The Gerrit account query failed.
    #[error("query Gerrit accounts for {user}: {source}")]
    AccountQueryFailed {
        user: String,
        #[source]
        source: GerritError,
    },

    /// Fetching the user's key from Coder failed.
    #[error("get Coder Git SSH key for {user}: {source}")]
    KeyFetchFailed {
        user: String,
        #[source]
        source: CoderError,
    },

    /// Coder returned an empty key.
    #[error("Coder returned an empty Git SSH key for {user}")]
    MissingKey { user: String },

    /// Coder returned a key that is not `<algorithm> <material> [comment]`.
    #[error("Git SSH key for {user} is malformed: {source}")]
    InvalidKeyFormat {
        user: String,
        #[source]
        source: KeyError,
    },

    /// One or more matched accounts failed; the others were processed.
    #[error("{} Gerrit account(s) failed for {user}: {}", .failures.len(), join_failures(.failures))]
    AccountsFailed {
        user: String,
        failures: Vec<AccountFailure>,
        /// What happened on the accounts that did not fail.
        report: Box<SyncReport>,
    },
}

fn join_failures(failures: &[AccountFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SyncError {
    /// Check if this error stopped the user's sync before any account was touched.
    pub fn is_fatal_to_user(&self) -> bool {
        !matches!(self, SyncError::AccountsFailed { .. })
    }

    /// Check if some, but not necessarily all, accounts failed.
    pub fn is_partial_failure(&self) -> bool {
        matches!(self, SyncError::AccountsFailed { .. })
    }

    /// Per-account failures, empty for user-level errors.
    pub fn failures(&self) -> &[AccountFailure] {
        match self {
            SyncError::AccountsFailed { failures, .. } => failures,
            _ => &[],
        }
    }

    /// Ids of the accounts that failed, in processing order.
    pub fn failed_account_ids(&self) -> Vec<i64> {
        self.failures().iter().map(|f| f.account_id).collect()
    }

    /// The report of the accounts that were processed, for partial failures.
    pub fn report(&self) -> Option<&SyncReport> {
        match self {
            SyncError::AccountsFailed { report, .. } => Some(&**report),
            _ => None,
        }
    }

    /// Check if this is a Coder-side failure.
    pub fn is_coder_error(&self) -> bool {
        matches!(
            self,
            SyncError::UserListFailed(_)
                | SyncError::KeyFetchFailed { .. }
                | SyncError::MissingKey { .. }
                | SyncError::InvalidKeyFormat { .. }
        )
    }
}

impl From<SyncError> for crate::Error {
    fn from(err: SyncError) -> Self {
        crate::Error::Sync(err)
    }
}
