//! Coder, the workspace platform whose users own the SSH keys.
//!
//! The sync routine only needs two capabilities from Coder, captured by
//! [`WorkspaceDirectory`]: enumerate users and read one user's Git SSH key.
//! [`CoderClient`] implements them over the REST API.

use async_trait::async_trait;

pub mod client;
pub mod errors;
pub mod types;

pub use client::{CoderClient, CoderConfig};
pub use errors::CoderError;
pub use types::{BuildInfo, GitSshKey, User, UserStatus, UsersPage};

/// Read access to the Coder user directory.
#[async_trait]
pub trait WorkspaceDirectory: Send + Sync {
    /// List every user in the deployment.
    async fn list_users(&self) -> Result<Vec<User>, CoderError>;

    /// Fetch the Git SSH public key Coder generated for `user_id`.
    async fn git_ssh_key(&self, user_id: &str) -> Result<GitSshKey, CoderError>;
}
