//! Core logging pipeline for redlog
//!
//! This crate contains:
//! - Log events and the envelope template
//! - `RecordFormatter` (render, then redact)
//! - The `tracing` subscriber integration

pub mod error;
pub mod event;
pub mod logger;
pub mod render;

pub use error::{Error, Result};
pub use event::LogEvent;
pub use logger::{DEFAULT_FILTER, RedactingFormatter, USER_DATA};
pub use render::{Envelope, RecordFormatter, Render};
