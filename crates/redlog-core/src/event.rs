use time::OffsetDateTime;
use time::macros::format_description;
use tracing::Level;

/// One log call: who logged, how loud, when, and the raw message
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub name: String,
    pub level: Level,
    pub timestamp: OffsetDateTime,
    pub message: String,
}

impl LogEvent {
    /// Create an event stamped with the current UTC time
    pub fn new(name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            timestamp: OffsetDateTime::now_utc(),
            message: message.into(),
        }
    }

    pub fn at(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// `YYYY-MM-DD HH:MM:SS,mmm`
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]"
            ))
            .unwrap_or_else(|_| self.timestamp.unix_timestamp().to_string())
    }
}
