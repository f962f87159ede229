//! CLI entry point.
//!
//! Loads `.env`, parses arguments, installs logging, bootstraps the context
//! and dispatches to a handler. Failures print one line and set the exit
//! code.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dsync_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CliConfig {
        api_url: cli.api_url,
        token: cli.token,
        ..CliConfig::default()
    };
    if let Commands::Get { target, .. } | Commands::Download { target, .. } = &cli.command {
        config.target.clone_from(&target.target);
        config.settings = target.settings();
    }

    let ctx = bootstrap(&config)?;

    match cli.command {
        Commands::Get { repo, .. } => handlers::download::get(&ctx, &repo).await?,
        Commands::Download { repo, source, .. } => {
            handlers::download::download(&ctx, &repo, &source).await?;
        }
        Commands::Query { repo } => handlers::query::execute(&ctx, &repo).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing, so .env values reach clap's env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(cli_err) = err.downcast_ref::<CliError>() {
                eprintln!("{}", cli_err.user_message());
                ExitCode::from(cli_err.exit_code())
            } else {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        }
    }
}
