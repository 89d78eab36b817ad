//! tripguard binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tripguard::cli::{session, Cli, Commands};
use tripguard::config::TripConfig;
use tripguard::orchestrator::Orchestrator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("TRIPGUARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(cli.global.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let config = cli
        .global
        .apply(TripConfig::load(cli.global.config.as_deref())?);
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Profile => {
            session::handle_profile(&config.profile, &mut stdout)?;
            Ok(session::EXIT_REPLY)
        }
        Commands::Ask(args) => {
            let orchestrator = Orchestrator::from_config(&config)?;
            Ok(session::handle_ask(&orchestrator, &args.text(), &mut stdout).await?)
        }
        Commands::Chat => {
            let orchestrator = Orchestrator::from_config(&config)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::handle_chat(&orchestrator, stdin, &mut stdout).await?;
            Ok(session::EXIT_REPLY)
        }
    }
}
