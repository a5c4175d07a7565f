//! `tracing` integration
//!
//! Installs a subscriber whose event formatter routes every event through a
//! [`Render`] implementation, so nothing reaches the sink unredacted.

use std::fmt::{self, Write};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

use crate::{LogEvent, Render, Result};

/// Target for user-record events, rendered as the logger name
pub const USER_DATA: &str = "user_data";

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Install the global subscriber writing redacted lines to stderr.
///
/// `RUST_LOG` wins over `filter` when set.
pub fn init<R>(filter: &str, renderer: R) -> Result<()>
where
    R: Render + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(filter))?;

    tracing_subscriber::util::SubscriberInitExt::try_init(
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .event_format(RedactingFormatter::new(renderer))
            .finish(),
    )?;

    Ok(())
}

/// `FormatEvent` adapter around a [`Render`] implementation
#[derive(Debug, Clone)]
pub struct RedactingFormatter<R> {
    renderer: R,
}

impl<R: Render> RedactingFormatter<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }
}

impl<S, N, R> FormatEvent<S, N> for RedactingFormatter<R>
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
    R: Render,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let mut collector = EventFieldCollector::default();
        event.record(&mut collector);

        let record = LogEvent::new(metadata.target(), *metadata.level(), collector.into_message());
        writer.write_str(&self.renderer.render(&record))?;
        writer.write_char('\n')
    }
}

/// Gathers the event message plus any structured fields
#[derive(Default)]
struct EventFieldCollector {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl EventFieldCollector {
    fn record_value(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }

    /// Message first, then structured fields as `key=value` segments, so
    /// `info!(password = %pw, "login")` is redacted like any other segment.
    fn into_message(self) -> String {
        let mut parts = Vec::with_capacity(self.fields.len() + 1);
        if let Some(message) = self.message {
            parts.push(message);
        }
        parts.extend(self.fields.into_iter().map(|(k, v)| format!("{}={}", k, v)));
        parts.join("; ")
    }
}

impl Visit for EventFieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record_value(field, value.to_string());
    }
}
