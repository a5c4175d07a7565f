//! PII redaction for delimiter-separated `field=value` log lines
//!
//! This crate contains:
//! - `FieldMatcher`: compiled, cached matcher for a set of field names
//! - `redact`: the one-shot transform
//! - `Redactor`: validated configuration used by formatters

pub mod error;
pub mod matcher;
pub mod redactor;

pub use error::{RedactError, Result};
pub use matcher::FieldMatcher;
pub use redactor::{
    DEFAULT_PII_FIELDS, DEFAULT_SEPARATOR, DEFAULT_TOKEN, RedactionSettings, Redactor,
    default_pii_fields, redact,
};
