use anyhow::Result;
use redlog_config::{Config, DatabaseConfig};
use redlog_core::USER_DATA;
use redlog_source::{DbSettings, MySqlSource, RecordSource, SelectQuery, SourceError};

use super::Reported;
use crate::cli::DumpArgs;

pub async fn handle(args: DumpArgs, config: &Config) -> Result<()> {
    let settings = db_settings(args, &config.database);
    let query = SelectQuery::new(&config.database.table, &config.database.columns)?;

    // Nothing is logged unless the connection was acquired
    let source = MySqlSource::connect(&settings, query)
        .await
        .map_err(report)?;

    let count = dump_source(&source, &config.redaction.separator).await?;
    tracing::debug!(rows = count, "dumped user records");
    Ok(())
}

/// Log every row of `source`, then release it
async fn dump_source(source: &dyn RecordSource, separator: &str) -> Result<usize> {
    let result = log_records(source, separator).await;
    source.close().await;
    result.map_err(report)
}

/// Send a database failure through the `user_data` logger
fn report(e: SourceError) -> anyhow::Error {
    tracing::error!(target: USER_DATA, "Error connecting to the database: {}", e);
    Reported.into()
}

/// Log every record as one `user_data` INFO event
async fn log_records(source: &dyn RecordSource, separator: &str) -> redlog_source::Result<usize> {
    let records = source.fetch().await?;
    for record in &records {
        tracing::info!(target: USER_DATA, "{}", record.to_message(separator));
    }
    Ok(records.len())
}

/// Flags and `PERSONAL_DATA_DB_*` variables override the config file
fn db_settings(args: DumpArgs, configured: &DatabaseConfig) -> DbSettings {
    DbSettings {
        host: args.host.unwrap_or_else(|| configured.host.clone()),
        port: args.port.unwrap_or(configured.port),
        database: args.database.unwrap_or_else(|| configured.name.clone()),
        user: args.user.unwrap_or_else(|| configured.user.clone()),
        password: args.password.unwrap_or_else(|| configured.password.clone()),
        ..DbSettings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redlog_core::{RecordFormatter, RedactingFormatter};
    use redlog_source::SqliteSource;
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
    use std::io;
    use std::sync::{Arc, Mutex};

    fn no_flags() -> DumpArgs {
        DumpArgs {
            host: None,
            port: None,
            database: None,
            user: None,
            password: None,
        }
    }

    #[test]
    fn test_db_settings_from_config() {
        let configured = DatabaseConfig {
            name: "holberton".to_string(),
            ..DatabaseConfig::default()
        };
        let settings = db_settings(no_flags(), &configured);

        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 3306);
        assert_eq!(settings.database, "holberton");
        assert_eq!(settings.user, "root");
        assert_eq!(settings.password, "");
    }

    #[test]
    fn test_db_settings_flags_win() {
        let args = DumpArgs {
            host: Some("db.internal".to_string()),
            password: Some("pw".to_string()),
            ..no_flags()
        };
        let settings = db_settings(args, &DatabaseConfig::default());

        assert_eq!(settings.host, "db.internal");
        assert_eq!(settings.password, "pw");
        assert_eq!(settings.user, "root");
    }

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_log_records_counts_rows() {
        let pool = memory_pool().await;
        sqlx::query("CREATE TABLE users (name TEXT, ip TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO users VALUES ('Ann', '10.0.0.1'), ('Ben', '10.0.0.2')")
            .execute(&pool)
            .await
            .unwrap();

        let columns = vec!["name".to_string(), "ip".to_string()];
        let source = SqliteSource::from_pool(pool, SelectQuery::new("users", &columns).unwrap());

        assert_eq!(log_records(&source, ";").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_goes_to_user_data() {
        let columns = vec!["name".to_string()];
        let source =
            SqliteSource::from_pool(memory_pool().await, SelectQuery::new("users", &columns).unwrap());

        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .event_format(RedactingFormatter::new(RecordFormatter::pii().unwrap()))
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let err = dump_source(&source, ";").await.unwrap_err();

        assert!(err.is::<Reported>());
        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(output.starts_with("[APP] user_data ERROR "));
        assert!(output.contains("Error connecting to the database: "));
        assert!(output.contains("users"));
    }
}
