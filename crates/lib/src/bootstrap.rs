//! Startup helpers: build the real clients and confirm both platforms answer.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::{
    Result,
    coder::{CoderClient, CoderConfig},
    gerrit::{GerritClient, GerritConfig},
    sync::{SyncConfig, Syncer},
};

/// Versions reported by the two platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformVersions {
    pub coder: String,
    pub gerrit: String,
}

/// Build the REST clients for both platforms.
pub fn clients(coder: CoderConfig, gerrit: GerritConfig) -> Result<(CoderClient, GerritClient)> {
    Ok((CoderClient::new(coder)?, GerritClient::new(gerrit)?))
}

/// Build a [`Syncer`] backed by the real REST clients.
pub fn connect(coder: &CoderClient, gerrit: &GerritClient, config: SyncConfig) -> Syncer {
    Syncer::new(Arc::new(coder.clone()), Arc::new(gerrit.clone()), config)
}

/// Ask both platforms for their version.
///
/// Used at startup: if either platform cannot be reached with the configured
/// credentials there is no point starting a pass.
pub async fn check_platforms(coder: &CoderClient, gerrit: &GerritClient) -> Result<PlatformVersions> {
    let gerrit_version = gerrit.version().await?;
    info!(version = %gerrit_version, url = %gerrit.base_url(), "Gerrit version");

    let build = coder.build_info().await?;
    info!(version = %build.version, url = %coder.base_url(), "Coder version");

    Ok(PlatformVersions {
        coder: build.version,
        gerrit: gerrit_version,
    })
}
