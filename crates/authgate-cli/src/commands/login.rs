//! Login command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use authgate::{AuthClient, Credentials};

use super::demo;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(client: &AuthClient, args: LoginArgs) -> Result<()> {
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    if let Err(e) = client.authenticate(&credentials).await {
        tracing::debug!(error = %e, "Authentication failed");
        output::error("Login failed");
        anyhow::bail!(e);
    }

    output::success("Logged in successfully");
    output::field("Email", credentials.email());
    if let Some(at) = client.session().updated_at().await {
        output::field("Token issued", &at.to_rfc3339());
    }
    println!();

    // On to the demo page
    demo::show(client).await
}
