//! Register command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use authgate::{AuthClient, Registration};

use super::demo;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub firstname: String,

    #[arg(long)]
    pub lastname: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Continue to login and the demo page after registering
    #[arg(long)]
    pub login: bool,
}

pub async fn run(client: &AuthClient, args: RegisterArgs) -> Result<()> {
    let registration = Registration::new(
        &args.firstname,
        &args.lastname,
        &args.email,
        &args.password,
    );

    eprintln!("{}", "Registering...".dimmed());

    if let Err(e) = client.register(&registration).await {
        tracing::debug!(error = %e, "Registration failed");
        output::error("Registration failed");
        anyhow::bail!(e);
    }

    output::success("Registered successfully");
    output::field("Email", registration.email());

    if !args.login {
        return Ok(());
    }

    println!();
    eprintln!("{}", "Logging in...".dimmed());
    if let Err(e) = client.authenticate(&registration.credentials()).await {
        output::error("Login failed");
        anyhow::bail!(e);
    }
    output::success("Logged in successfully");
    println!();

    demo::show(client).await
}
