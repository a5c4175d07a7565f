//! Error types for redlog-redact

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedactError>;

#[derive(Error, Debug)]
pub enum RedactError {
    #[error("Field separator must not be empty")]
    EmptySeparator,

    #[error("Redaction token {token:?} contains or runs into the field separator {separator:?}")]
    TokenContainsSeparator { token: String, separator: String },

    #[error("Invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),
}
