//! Subcommand implementations.

pub mod demo;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use authgate::{AccessToken, ApiUrl, AuthClient, ClientConfig, Credentials, ProxyRule};

use crate::cli::{ApiArgs, Commands};
use crate::observer::CliObserver;

/// How to establish a session before running a command.
///
/// Nothing is persisted between runs, so commands that need a session take
/// either a token or login credentials.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Log in with this email first
    #[arg(long, requires = "password")]
    pub email: Option<String>,

    /// Password for --email
    #[arg(long, requires = "email")]
    pub password: Option<String>,

    /// Use this access token instead of logging in
    #[arg(long, conflicts_with = "email")]
    pub token: Option<String>,
}

impl SessionArgs {
    /// Install a token or log in, if either was requested.
    pub async fn establish(&self, client: &AuthClient) -> Result<()> {
        if let Some(token) = &self.token {
            let token = AccessToken::new(token.clone()).context("Invalid access token")?;
            client.set_credential(token).await;
            return Ok(());
        }

        if let (Some(email), Some(password)) = (&self.email, &self.password) {
            client
                .authenticate(&Credentials::new(email.clone(), password.clone()))
                .await
                .context("Login failed")?;
        }

        Ok(())
    }
}

/// Build the client shared by every step of a command.
pub fn build_client(api: &ApiArgs) -> Result<AuthClient> {
    let base = ApiUrl::new(&api.api_url).context("Invalid API URL")?;
    let mut config = ClientConfig::new(base)
        .with_user_agent(concat!("authgate-cli/", env!("AUTHGATE_VERSION")))
        .with_observer(Arc::new(CliObserver));

    if let Some(proxy) = &api.api_proxy {
        let upstream = ApiUrl::new(proxy).context("Invalid proxy upstream URL")?;
        config = config.with_proxy(ProxyRule::api(upstream));
    }
    if let Some(secs) = api.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    AuthClient::with_config(config).context("Failed to create HTTP client")
}

pub async fn handle(api: ApiArgs, command: Commands) -> Result<()> {
    let client = build_client(&api)?;

    match command {
        Commands::Login(args) => login::run(&client, args).await,
        Commands::Register(args) => register::run(&client, args).await,
        Commands::Demo(args) => demo::run(&client, args).await,
        Commands::RefreshToken(args) => refresh_token::run(&client, args).await,
        Commands::Logout(args) => logout::run(&client, args).await,
    }
}
