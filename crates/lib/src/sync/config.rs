//! Sync policy settings.

use serde::{Deserialize, Serialize};

use crate::{coder::UserStatus, constants::SYNC_COMMENT};

/// Which Coder users are synced, by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusPolicy {
    /// Only `active` users; dormant, suspended and unknown statuses are skipped
    /// before any API call.
    #[default]
    ActiveOnly,
    /// Every user regardless of status.
    All,
}

impl StatusPolicy {
    pub fn admits(&self, status: UserStatus) -> bool {
        match self {
            StatusPolicy::ActiveOnly => status.is_active(),
            StatusPolicy::All => true,
        }
    }
}

/// Immutable settings for a [`Syncer`](super::Syncer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Only sync the user with this email.
    pub only: Option<String>,
    pub status_policy: StatusPolicy,
    /// Register keys on accounts Gerrit marks inactive.
    pub include_inactive_accounts: bool,
    /// Compare keys but never register them.
    pub dry_run: bool,
    /// Comment given to keys that have none.
    pub key_comment: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            only: None,
            status_policy: StatusPolicy::default(),
            include_inactive_accounts: false,
            dry_run: false,
            key_comment: SYNC_COMMENT.to_string(),
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only(mut self, email: impl Into<String>) -> Self {
        self.only = Some(email.into()).filter(|e: &String| !e.is_empty());
        self
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    pub fn with_inactive_accounts(mut self, include: bool) -> Self {
        self.include_inactive_accounts = include;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_key_comment(mut self, comment: impl Into<String>) -> Self {
        self.key_comment = comment.into();
        self
    }

    /// Whether the `only` filter lets `email` through.
    pub fn selects(&self, email: &str) -> bool {
        self.only.as_deref().is_none_or(|only| only == email)
    }
}
