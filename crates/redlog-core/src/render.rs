//! Record rendering - envelope formatting and redaction
//!
//! CRITICAL: every string `RecordFormatter::render` returns has already been
//! redacted. Re-running the redactor over it must change nothing.

use redlog_redact::{
    DEFAULT_SEPARATOR, DEFAULT_TOKEN, RedactionSettings, Redactor, default_pii_fields,
};
use serde::{Deserialize, Serialize};

use crate::{LogEvent, Result};

/// Anything that turns a log event into a line of text
pub trait Render {
    fn render(&self, event: &LogEvent) -> String;
}

/// The fixed `[prefix] name LEVEL timestamp: message` template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Envelope {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "APP".to_string()
}

impl Render for Envelope {
    fn render(&self, event: &LogEvent) -> String {
        format!(
            "[{}] {} {} {:<15}: {}",
            self.prefix,
            event.name,
            event.level,
            event.formatted_timestamp(),
            event.message
        )
    }
}

/// Renders the envelope, then redacts the whole line
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    envelope: Envelope,
    redactor: Redactor,
}

impl RecordFormatter {
    /// Redact `fields` with the fixed `***` token and `;` separator
    pub fn new(fields: &[String]) -> Result<Self> {
        Ok(Self {
            envelope: Envelope::default(),
            redactor: Redactor::new(fields, DEFAULT_TOKEN, DEFAULT_SEPARATOR)?,
        })
    }

    /// Formatter for the default PII fields
    pub fn pii() -> Result<Self> {
        Self::new(&default_pii_fields())
    }

    pub fn from_config(settings: &RedactionSettings, envelope: Envelope) -> Result<Self> {
        Ok(Self {
            envelope,
            redactor: Redactor::from_settings(settings)?,
        })
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }
}

impl Render for RecordFormatter {
    fn render(&self, event: &LogEvent) -> String {
        let rendered = self.envelope.render(event);
        self.redactor.redact(&rendered).into_owned()
    }
}
