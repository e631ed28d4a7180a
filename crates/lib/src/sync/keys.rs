//! Fetching a user's key from Coder and checking it against Gerrit.

use tracing::{debug, info};

use super::error::{AccountError, SyncError};
use crate::{
    coder::{User, WorkspaceDirectory},
    gerrit::{ReviewAccounts, SshKeyInfo},
    sshkey::SshPublicKey,
};

/// Fetch `user`'s Git SSH key and normalize it with `default_comment`.
///
/// Every failure here is fatal for the user: a key that cannot be fetched,
/// is empty, or is malformed is never registered anywhere.
pub async fn fetch_key(
    coder: &dyn WorkspaceDirectory,
    user: &User,
    default_comment: &str,
) -> Result<SshPublicKey, SyncError> {
    let key = coder
        .git_ssh_key(&user.id)
        .await
        .map_err(|source| SyncError::KeyFetchFailed {
            user: user.to_string(),
            source,
        })?;

    if key.public_key.trim().is_empty() {
        return Err(SyncError::MissingKey {
            user: user.to_string(),
        });
    }

    let normalized = SshPublicKey::normalize_with_comment(&key.public_key, default_comment)
        .map_err(|source| SyncError::InvalidKeyFormat {
            user: user.to_string(),
            source,
        })?;
    info!(user = %user, key = %normalized, "Got Git SSH key");
    Ok(normalized)
}

/// Whether `account_id` already has a key equivalent to `key`.
pub async fn key_present(
    gerrit: &dyn ReviewAccounts,
    account_id: i64,
    key: &SshPublicKey,
) -> Result<bool, AccountError> {
    let existing = gerrit
        .list_ssh_keys(account_id)
        .await
        .map_err(AccountError::KeyListFailed)?;
    debug!(account_id, count = existing.len(), "Listed Gerrit SSH keys");
    Ok(contains_equivalent(&existing, key))
}

/// Whether any of `existing` matches `key` by algorithm and material.
pub fn contains_equivalent(existing: &[SshKeyInfo], key: &SshPublicKey) -> bool {
    existing
        .iter()
        .filter_map(SshKeyInfo::public_key)
        .any(|candidate| candidate.is_equivalent(key))
}
