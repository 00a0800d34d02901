//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use authgate::AuthClient;

use super::SessionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

pub async fn run(client: &AuthClient, args: LogoutArgs) -> Result<()> {
    args.session.establish(client).await?;

    // Best effort: the client swallows failures.
    client.logout().await;

    output::success("Logged out");
    Ok(())
}
