//! Demo page: fetch the protected resource.

use anyhow::Result;
use clap::Args;

use authgate::AuthClient;

use super::SessionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct DemoArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

pub async fn run(client: &AuthClient, args: DemoArgs) -> Result<()> {
    args.session.establish(client).await?;
    show(client).await
}

/// Fetch and print the demo resource, or "Not Authorized" on any failure.
pub async fn show(client: &AuthClient) -> Result<()> {
    output::heading("Demo Page");

    match client.fetch_demo().await {
        Ok(hello) => {
            println!("{}", hello);
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Demo resource unavailable");
            println!("Not Authorized");
            anyhow::bail!("not authorized: {}", e)
        }
    }
}
