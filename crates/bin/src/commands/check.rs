//! Check command - confirms both platforms answer with the configured credentials.

use crate::cli::CheckArgs;
use crate::output::{OutputFormat, print_versions};
use crate::platforms::create_clients;

/// Run the check command
pub async fn run(args: &CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (coder, gerrit) = create_clients(&args.platforms)?;
    let versions = coder_gerrit_sync::check_platforms(&coder, &gerrit).await?;
    print_versions(&versions, OutputFormat::from_flag(args.json))?;
    Ok(())
}
