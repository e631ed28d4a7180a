//! Client configuration built from the command line.

use std::time::Duration;

use coder_gerrit_sync::{
    coder::{CoderClient, CoderConfig},
    gerrit::{GerritClient, GerritConfig},
};
use url::Url;

use crate::cli::PlatformArgs;

/// Redact credentials embedded in a URL for safe logging
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    if !url.username().is_empty() {
        let _ = redacted.set_username("***");
    }
    if url.password().is_some() {
        let _ = redacted.set_password(Some("***"));
    }
    redacted.to_string()
}

pub fn coder_config(args: &PlatformArgs) -> Result<CoderConfig, Box<dyn std::error::Error>> {
    if args.coder_token.trim().is_empty() {
        return Err("Coder session token is empty; set CODER_SESSION_TOKEN".into());
    }
    Ok(CoderConfig::new(args.coder_url.clone(), args.coder_token.trim())
        .with_timeout(Duration::from_secs(args.timeout)))
}

pub fn gerrit_config(args: &PlatformArgs) -> GerritConfig {
    let mut config =
        GerritConfig::new(args.gerrit_url.clone()).with_timeout(Duration::from_secs(args.timeout));
    if let (Some(username), Some(password)) = (&args.gerrit_username, &args.gerrit_password) {
        config = config.with_basic_auth(username.as_str(), password.as_str());
    }
    if !config.is_authenticated() {
        tracing::warn!("No Gerrit credentials configured; using anonymous access");
    }
    config
}

/// Build both clients from the command line.
pub fn create_clients(
    args: &PlatformArgs,
) -> Result<(CoderClient, GerritClient), Box<dyn std::error::Error>> {
    tracing::info!(
        coder = %redact_url(&args.coder_url),
        gerrit = %redact_url(&args.gerrit_url),
        timeout_secs = args.timeout,
        "Configuring platform clients"
    );
    let (coder, gerrit) = coder_gerrit_sync::clients(coder_config(args)?, gerrit_config(args))?;
    Ok((coder, gerrit))
}
