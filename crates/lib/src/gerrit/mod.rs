//! Gerrit, the review platform whose accounts receive the SSH keys.
//!
//! [`ReviewAccounts`] is the narrow capability the sync routine depends on:
//! query accounts, list an account's SSH keys, add a key. [`GerritClient`]
//! implements it over the REST API.

use async_trait::async_trait;

pub mod client;
pub mod errors;
pub mod types;

pub use client::{GerritClient, GerritConfig, GerritCredentials, strip_xssi_prefix};
pub use errors::GerritError;
pub use types::{AccountInfo, SshKeyInfo};

/// Account and SSH key operations on a Gerrit server.
#[async_trait]
pub trait ReviewAccounts: Send + Sync {
    /// Run an account query, returning every matching account.
    async fn query_accounts(&self, query: &str) -> Result<Vec<AccountInfo>, GerritError>;

    /// List the SSH keys currently registered for `account_id`.
    async fn list_ssh_keys(&self, account_id: i64) -> Result<Vec<SshKeyInfo>, GerritError>;

    /// Register `key` (a full OpenSSH key line) for `account_id`.
    async fn add_ssh_key(&self, account_id: i64, key: &str) -> Result<SshKeyInfo, GerritError>;
}

/// Build an exact-match account query for `email`.
pub fn email_query(email: &str) -> String {
    let escaped = email.replace('\\', "\\\\").replace('"', "\\\"");
    format!("email:\"{escaped}\"")
}
