//! Gerrit REST payload types.

use serde::{Deserialize, Serialize};

use crate::sshkey::SshPublicKey;

/// `AccountInfo` entity as returned by the account query endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(rename = "_account_id", default)]
    pub account_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Gerrit only sets this when the account is inactive.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inactive: bool,
}

impl AccountInfo {
    pub fn new(account_id: i64) -> Self {
        Self {
            account_id,
            ..Default::default()
        }
    }

    pub fn inactive(mut self) -> Self {
        self.inactive = true;
        self
    }

    /// Gerrit never hands out non-positive account ids.
    pub fn has_valid_id(&self) -> bool {
        self.account_id > 0
    }
}

/// `SshKeyInfo` entity as returned by the SSH key endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyInfo {
    #[serde(default)]
    pub seq: i32,
    #[serde(default)]
    pub ssh_public_key: String,
    #[serde(default)]
    pub encoded_key: String,
    #[serde(default)]
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub valid: bool,
}

impl SshKeyInfo {
    /// The key this entry describes.
    ///
    /// Uses the separate `algorithm`/`encoded_key` fields when Gerrit filled
    /// them in, otherwise parses the full `ssh_public_key` line.
    pub fn public_key(&self) -> Option<SshPublicKey> {
        if !self.algorithm.is_empty() && !self.encoded_key.is_empty() {
            return Some(SshPublicKey::from_parts(
                self.algorithm.as_str(),
                self.encoded_key.as_str(),
                self.comment.clone(),
            ));
        }
        SshPublicKey::parse(&self.ssh_public_key).ok()
    }
}
