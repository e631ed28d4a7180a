//! Matching Coder users to Gerrit accounts by email.

use tracing::{info, warn};

use super::{
    error::SyncError,
    report::{SkipReason, SkippedAccount},
};
use crate::{
    coder::User,
    gerrit::{AccountInfo, ReviewAccounts, email_query},
};

/// Accounts returned for one email, split by whether they may receive keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedAccounts {
    /// Accounts to process, in query order.
    pub eligible: Vec<AccountInfo>,
    pub skipped: Vec<SkippedAccount>,
}

/// Query Gerrit for the accounts registered with `user`'s email.
///
/// A failed query is fatal for the user. Zero results is not an error.
pub async fn match_accounts(
    gerrit: &dyn ReviewAccounts,
    user: &User,
    include_inactive: bool,
) -> Result<MatchedAccounts, SyncError> {
    if user.email.trim().is_empty() {
        return Err(SyncError::EmptyEmail {
            user: user.to_string(),
        });
    }

    let accounts = gerrit
        .query_accounts(&email_query(&user.email))
        .await
        .map_err(|source| SyncError::AccountQueryFailed {
            user: user.to_string(),
            source,
        })?;

    for account in &accounts {
        info!(account_id = account.account_id, user = %user, "Got Gerrit account for Coder user");
    }
    Ok(partition_accounts(accounts, include_inactive))
}

/// Drop accounts with a non-positive id, and inactive ones unless `include_inactive`.
pub fn partition_accounts(accounts: Vec<AccountInfo>, include_inactive: bool) -> MatchedAccounts {
    let mut matched = MatchedAccounts::default();
    for account in accounts {
        let reason = if !account.has_valid_id() {
            Some(SkipReason::InvalidId)
        } else if account.inactive && !include_inactive {
            Some(SkipReason::Inactive)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                warn!(account_id = account.account_id, ?reason, "Skipping Gerrit account");
                matched.skipped.push(SkippedAccount {
                    account_id: account.account_id,
                    reason,
                });
            }
            None => matched.eligible.push(account),
        }
    }
    matched
}
