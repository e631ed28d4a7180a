//! What a sync did, per account and per pass.

use serde::Serialize;

use crate::coder::UserStatus;

/// What happened on one eligible Gerrit account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountAction {
    /// The key was added.
    Registered,
    /// An equivalent key was already there; nothing was written.
    AlreadyPresent,
    /// Dry run: the key is missing and would have been added.
    WouldRegister,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountOutcome {
    pub account_id: i64,
    pub action: AccountAction,
}

/// Why a matched account was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The account id is zero or negative.
    InvalidId,
    /// Gerrit marks the account inactive.
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAccount {
    pub account_id: i64,
    pub reason: SkipReason,
}

/// Result of syncing one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub user_id: String,
    /// Set when the user was not synced because of their Coder status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_status: Option<UserStatus>,
    pub accounts: Vec<AccountOutcome>,
    pub skipped: Vec<SkippedAccount>,
}

impl SyncReport {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    /// Number of accounts the key was added to.
    pub fn registered(&self) -> usize {
        self.count(AccountAction::Registered)
    }

    /// Number of accounts that already had the key.
    pub fn already_present(&self) -> usize {
        self.count(AccountAction::AlreadyPresent)
    }

    /// Number of accounts a dry run would have written to.
    pub fn would_register(&self) -> usize {
        self.count(AccountAction::WouldRegister)
    }

    /// Whether no eligible account was found for the user.
    pub fn is_unmatched(&self) -> bool {
        self.skipped_status.is_none() && self.accounts.is_empty()
    }

    fn count(&self, action: AccountAction) -> usize {
        self.accounts.iter().filter(|a| a.action == action).count()
    }
}

/// Totals for one pass over all Coder users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// Users returned by Coder.
    pub users: usize,
    /// Users excluded by the `only` filter.
    pub filtered: usize,
    /// Users skipped because of their Coder status.
    pub skipped_status: usize,
    /// Users with no eligible Gerrit account.
    pub unmatched: usize,
    /// Users whose sync finished without error.
    pub synced: usize,
    /// Users whose sync returned an error.
    pub failed: usize,
    pub keys_registered: usize,
    pub keys_present: usize,
    pub keys_would_register: usize,
    /// Display form of each user that failed.
    pub failed_users: Vec<String>,
}

impl PassSummary {
    /// Fold a successful user report into the totals.
    pub fn record(&mut self, report: &SyncReport) {
        if report.skipped_status.is_some() {
            self.skipped_status += 1;
            return;
        }
        if report.is_unmatched() {
            self.unmatched += 1;
        }
        self.synced += 1;
        self.add_keys(report);
    }

    /// Count a failed user, keeping whatever its partial report says was done.
    pub fn record_failure(&mut self, user: impl Into<String>, partial: Option<&SyncReport>) {
        self.failed += 1;
        self.failed_users.push(user.into());
        if let Some(report) = partial {
            self.add_keys(report);
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn add_keys(&mut self, report: &SyncReport) {
        self.keys_registered += report.registered();
        self.keys_present += report.already_present();
        self.keys_would_register += report.would_register();
    }
}
