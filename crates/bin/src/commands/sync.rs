//! Sync command - one pass over every Coder user.

use coder_gerrit_sync::{SyncConfig, check_platforms, connect};

use crate::cli::SyncArgs;
use crate::output::{OutputFormat, print_summary};
use crate::platforms::create_clients;

pub fn sync_config(args: &SyncArgs) -> SyncConfig {
    let mut config = SyncConfig::new()
        .with_status_policy(args.status_policy.into())
        .with_inactive_accounts(args.include_inactive_accounts)
        .with_dry_run(args.dry_run);
    if let Some(email) = &args.only {
        config = config.with_only(email.as_str());
    }
    config
}

/// Run the sync command
///
/// Failed users are logged and listed in the summary but do not change the
/// exit status. Only bootstrap and user-listing failures do.
pub async fn run(args: &SyncArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (coder, gerrit) = create_clients(&args.platforms)?;
    check_platforms(&coder, &gerrit).await?;

    let config = sync_config(args);
    if config.dry_run {
        tracing::info!("Dry run: no keys will be registered");
    }
    let syncer = connect(&coder, &gerrit, config);

    // Dropping the pass future abandons any in-flight request.
    let summary = tokio::select! {
        result = syncer.run_pass() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, abandoning sync pass");
            return Ok(());
        }
    };

    if !summary.is_clean() {
        tracing::error!(failed = summary.failed, "Some users could not be synced");
    }
    print_summary(&summary, args.dry_run, OutputFormat::from_flag(args.json))?;
    Ok(())
}
