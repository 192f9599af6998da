//! `check_credentials` - verify provider credentials via the identity service

use dwhctl_core::provider::IdentityApi;
use dwhctl_core::workflows;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::print_output;

pub async fn handle_check_credentials(
    identity: &impl IdentityApi,
    output: OutputFormat,
) -> Result<()> {
    let caller = workflows::check_credentials(identity).await?;

    if output.is_structured() {
        print_output(&caller, output)?;
    } else {
        println!("Caller identity:");
        println!("  user_id: {}", caller.user_id);
        println!("  account: {}", caller.account);
        println!("  arn:     {}", caller.arn);
    }
    Ok(())
}
