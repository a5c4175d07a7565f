//! Row ingestion for redlog
//!
//! Turns database rows into `field=value; ` log messages.

pub mod error;
pub mod handler;
pub mod mysql;
pub mod query;
pub mod record;
pub mod sqlite;

pub use error::{Result, SourceError};
pub use handler::RecordSource;
pub use mysql::{DbSettings, MySqlSource};
pub use query::{Dialect, SelectQuery};
pub use record::Record;
pub use sqlite::SqliteSource;
