//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::{demo, login, logout, refresh_token, register};

/// Command-line client for a token-based authentication service.
#[derive(Parser, Debug)]
#[command(name = "authgate")]
#[command(author, version = env!("AUTHGATE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the authentication service lives.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the authentication service
    #[arg(
        long,
        env = "AUTHGATE_API_URL",
        default_value = "http://localhost:8080/api/v1",
        global = true
    )]
    pub api_url: String,

    /// Forward `/api/*` paths to this upstream (development proxy)
    #[arg(long, env = "AUTHGATE_API_PROXY", global = true)]
    pub api_proxy: Option<String>,

    /// Per-request timeout in seconds (none by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, then open the demo page
    Login(login::LoginArgs),

    /// Register a new account
    Register(register::RegisterArgs),

    /// Fetch the protected demo resource
    Demo(demo::DemoArgs),

    /// Exchange the session cookie for a new access token
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// End the session (best effort)
    Logout(logout::LogoutArgs),
}
