use redlog_redact::RedactError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid redaction settings: {0}")]
    Redact(#[from] RedactError),

    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to install log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

pub type Result<T> = std::result::Result<T, Error>;
