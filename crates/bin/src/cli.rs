//! CLI argument definitions for the coder-gerrit-ssh-sync binary.

use clap::{Parser, Subcommand, ValueEnum};
use coder_gerrit_sync::{constants::DEFAULT_REQUEST_TIMEOUT_SECS, sync::StatusPolicy};
use url::Url;

/// Which Coder users a pass considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Only users whose Coder status is active (default)
    ActiveOnly,
    /// Every user regardless of status
    All,
}

impl From<StatusArg> for StatusPolicy {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::ActiveOnly => StatusPolicy::ActiveOnly,
            StatusArg::All => StatusPolicy::All,
        }
    }
}

/// Copy Coder users' Git SSH keys into their Gerrit accounts
#[derive(Parser, Debug)]
#[command(name = "coder-gerrit-ssh-sync")]
#[command(about = "Register Coder workspace SSH keys on matching Gerrit accounts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one sync pass over all Coder users
    Sync(SyncArgs),
    /// Check that both platforms are reachable with the configured credentials
    Check(CheckArgs),
}

/// Connection settings shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct PlatformArgs {
    /// Base URL of the Coder deployment
    #[arg(long = "coder", env = "CODER_URL")]
    pub coder_url: Url,

    /// Coder session token
    #[arg(long, env = "CODER_SESSION_TOKEN", hide_env_values = true)]
    pub coder_token: String,

    /// Base URL of the Gerrit server
    #[arg(long = "gerrit", env = "GERRIT_URL")]
    pub gerrit_url: Url,

    /// Gerrit HTTP username; basic auth is used only together with a password
    #[arg(long, env = "GERRIT_USERNAME")]
    pub gerrit_username: Option<String>,

    /// Gerrit HTTP password
    #[arg(long, env = "GERRIT_PASSWORD", hide_env_values = true)]
    pub gerrit_password: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,
}

/// Arguments for the sync command
#[derive(clap::Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub platforms: PlatformArgs,

    /// Only sync the Coder user with this email
    #[arg(long, value_name = "EMAIL")]
    pub only: Option<String>,

    /// Which Coder users to sync
    #[arg(long, value_enum, default_value = "active-only")]
    pub status_policy: StatusArg,

    /// Also register keys on Gerrit accounts marked inactive
    #[arg(long)]
    pub include_inactive_accounts: bool,

    /// Compare keys but never register any
    #[arg(long)]
    pub dry_run: bool,

    /// Print the pass summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check command
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub platforms: PlatformArgs,

    /// Print the platform versions as JSON
    #[arg(long)]
    pub json: bool,
}
