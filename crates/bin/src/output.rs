//! Output formatting helpers for human-readable and JSON output.

use coder_gerrit_sync::{PlatformVersions, sync::PassSummary};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Print a two-column table of labels and values with aligned columns.
pub fn print_table(rows: &[(&str, String)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        println!("{label:<width$}  {value}");
    }
}

pub fn summary_rows(summary: &PassSummary, dry_run: bool) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Users", summary.users.to_string()),
        ("Filtered", summary.filtered.to_string()),
        ("Skipped (status)", summary.skipped_status.to_string()),
        ("Unmatched", summary.unmatched.to_string()),
        ("Synced", summary.synced.to_string()),
        ("Failed", summary.failed.to_string()),
        ("Keys present", summary.keys_present.to_string()),
    ];
    if dry_run {
        rows.push(("Keys to register", summary.keys_would_register.to_string()));
    } else {
        rows.push(("Keys registered", summary.keys_registered.to_string()));
    }
    rows
}

pub fn print_summary(
    summary: &PassSummary,
    dry_run: bool,
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human => {
            print_table(&summary_rows(summary, dry_run));
            for user in &summary.failed_users {
                println!("failed: {user}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(summary)?),
    }
    Ok(())
}

pub fn print_versions(
    versions: &PlatformVersions,
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human => print_table(&[
            ("Coder", versions.coder.clone()),
            ("Gerrit", versions.gerrit.clone()),
        ]),
        OutputFormat::Json => println!("{}", serde_json::to_string(versions)?),
    }
    Ok(())
}
