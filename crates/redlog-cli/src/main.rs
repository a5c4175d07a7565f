mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use redlog_config::Config;
use redlog_core::RecordFormatter;
use std::process::ExitCode;

use commands::Reported;

#[tokio::main]
async fn main() -> ExitCode {
    match run(cli::Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is::<Reported>() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: cli::Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Initialize tracing; every event is rendered and redacted by the formatter
    let formatter = RecordFormatter::from_config(&config.redaction, config.envelope.clone())?;
    redlog_core::logger::init(&config.logging.filter, formatter)?;

    match cli.command {
        cli::Commands::Redact(args) => commands::redact::handle(args, &config),
        cli::Commands::Log { input } => commands::log::handle(input.as_deref()),
        cli::Commands::Dump(args) => commands::dump::handle(args, &config).await,
        cli::Commands::Config => commands::config::handle(cli.config.as_deref(), &config),
    }
}
