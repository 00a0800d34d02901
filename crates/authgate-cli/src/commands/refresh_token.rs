//! Refresh token command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use authgate::AuthClient;

use super::SessionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Print the new access token
    #[arg(long)]
    pub show_token: bool,
}

pub async fn run(client: &AuthClient, args: RefreshTokenArgs) -> Result<()> {
    args.session.establish(client).await?;

    eprintln!("{}", "Refreshing session...".dimmed());

    client
        .refresh()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    output::field(
        "Generation",
        &client.session().generation().await.to_string(),
    );
    if args.show_token
        && let Some(token) = client.session().export_access_token().await
    {
        output::field("Access token", &token);
    }

    Ok(())
}
