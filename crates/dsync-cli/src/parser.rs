//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Download dataset repositories from a dataset hub.
#[derive(Parser, Debug)]
#[command(name = "dsync")]
#[command(about = "Download dataset repositories from a dataset hub")]
#[command(version)]
pub struct Cli {
    /// Base URL of the hub API
    #[arg(long = "api-url", env = "DSYNC_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token forwarded to the hub
    #[arg(long, env = "DSYNC_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
