//! Reconciliation of Coder users' SSH keys into Gerrit accounts.
//!
//! [`Syncer`] runs the per-user workflow:
//!
//! 1. resolve the Gerrit accounts registered with the user's email,
//! 2. fetch and normalize the user's Coder key, once,
//! 3. for each eligible account, in query order, list its keys and register
//!    the user's key unless an equivalent one is already there.
//!
//! Failures in steps 1 and 2 abort the user. Failures in step 3 are recorded
//! against the account and the loop moves on; they are returned together as
//! [`SyncError::AccountsFailed`]. Re-running with unchanged state writes
//! nothing.

use std::sync::Arc;

use tracing::{error, info, warn};

pub mod config;
pub mod error;
pub mod keys;
pub mod matcher;
pub mod report;


pub use config::{StatusPolicy, SyncConfig};
pub use error::{AccountError, AccountFailure, SyncError};
pub use report::{
    AccountAction, AccountOutcome, PassSummary, SkipReason, SkippedAccount, SyncReport,
};

use crate::{
    coder::{User, WorkspaceDirectory},
    gerrit::ReviewAccounts,
    sshkey::SshPublicKey,
};

/// Synchronizes keys from a workspace directory into review accounts.
///
/// Users and accounts are processed sequentially. The syncer holds no
/// mutable state, so a shared instance can run overlapping syncs provided
/// the injected clients allow concurrent use.
#[derive(Clone)]
pub struct Syncer {
    coder: Arc<dyn WorkspaceDirectory>,
    gerrit: Arc<dyn ReviewAccounts>,
    config: SyncConfig,
}

impl Syncer {
    pub fn new(
        coder: Arc<dyn WorkspaceDirectory>,
        gerrit: Arc<dyn ReviewAccounts>,
        config: SyncConfig,
    ) -> Self {
        Self {
            coder,
            gerrit,
            config,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Sync every Coder user selected by the configuration.
    ///
    /// Only a failure to list users is returned as an error. Per-user
    /// failures are logged and counted in the summary, and the pass carries
    /// on with the next user.
    pub async fn run_pass(&self) -> Result<PassSummary, SyncError> {
        let users = self
            .coder
            .list_users()
            .await
            .map_err(SyncError::UserListFailed)?;
        info!(count = users.len(), "Listed Coder users");

        let mut summary = PassSummary {
            users: users.len(),
            ..Default::default()
        };
        for user in &users {
            if !self.config.selects(&user.email) {
                summary.filtered += 1;
                continue;
            }

            match self.sync_user(user).await {
                Ok(report) => summary.record(&report),
                Err(err) => {
                    error!(user = %user, error = %err, "Error syncing user");
                    summary.record_failure(user.to_string(), err.report());
                }
            }
        }

        info!(
            users = summary.users,
            synced = summary.synced,
            failed = summary.failed,
            registered = summary.keys_registered,
            "Sync pass finished"
        );
        Ok(summary)
    }

    /// Sync one user's key into every matching Gerrit account.
    pub async fn sync_user(&self, user: &User) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::new(user.id.as_str());

        if !self.config.status_policy.admits(user.status) {
            info!(user = %user, status = %user.status, "Skipping Coder user by status");
            report.skipped_status = Some(user.status);
            return Ok(report);
        }

        info!(user = %user, "Syncing user");
        let matched =
            matcher::match_accounts(self.gerrit.as_ref(), user, self.config.include_inactive_accounts)
                .await?;
        report.skipped = matched.skipped;

        if matched.eligible.is_empty() {
            info!(email = %user.email, "No matching Gerrit account");
            return Ok(report);
        }

        let key = keys::fetch_key(self.coder.as_ref(), user, &self.config.key_comment).await?;

        let mut failures = Vec::new();
        for account in &matched.eligible {
            let account_id = account.account_id;
            match self.sync_account(account_id, &key).await {
                Ok(action) => report.accounts.push(AccountOutcome { account_id, action }),
                Err(error) => {
                    warn!(user = %user, account_id, error = %error, "Gerrit account failed");
                    failures.push(AccountFailure { account_id, error });
                }
            }
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(SyncError::AccountsFailed {
                user: user.to_string(),
                failures,
                report: Box::new(report),
            })
        }
    }

    /// Bring one account up to date with `key`.
    async fn sync_account(
        &self,
        account_id: i64,
        key: &SshPublicKey,
    ) -> Result<AccountAction, AccountError> {
        if keys::key_present(self.gerrit.as_ref(), account_id, key).await? {
            info!(account_id, "SSH key already present on Gerrit account");
            return Ok(AccountAction::AlreadyPresent);
        }

        if self.config.dry_run {
            info!(account_id, key = %key, "Dry run: would add SSH key to Gerrit account");
            return Ok(AccountAction::WouldRegister);
        }

        info!(account_id, key = %key, "Adding SSH key to Gerrit account");
        let added = self
            .gerrit
            .add_ssh_key(account_id, &key.to_string())
            .await
            .map_err(AccountError::KeyRegisterFailed)?;
        info!(account_id, seq = added.seq, valid = added.valid, "Added SSH key");
        Ok(AccountAction::Registered)
    }
}
