use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redlog")]
#[command(about = "Redact PII from key=value log lines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redact lines from a file (or stdin) and print them
    Redact(RedactArgs),

    /// Emit lines through the redacting logger
    Log {
        /// Input file, stdin when omitted
        input: Option<PathBuf>,
    },

    /// Log every row of the user table
    Dump(DumpArgs),

    /// Show the effective configuration
    Config,
}

#[derive(Args)]
pub struct RedactArgs {
    /// Input file, stdin when omitted
    pub input: Option<PathBuf>,

    /// Comma-separated field names (default from config)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Replacement token
    #[arg(long)]
    pub token: Option<String>,

    /// Field separator
    #[arg(long)]
    pub separator: Option<String>,
}

#[derive(Args)]
pub struct DumpArgs {
    #[arg(long, env = "PERSONAL_DATA_DB_HOST")]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, env = "PERSONAL_DATA_DB_NAME")]
    pub database: Option<String>,

    #[arg(long, env = "PERSONAL_DATA_DB_USERNAME")]
    pub user: Option<String>,

    #[arg(long, env = "PERSONAL_DATA_DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
