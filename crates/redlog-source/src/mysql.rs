use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use crate::query::{Dialect, SelectQuery};
use crate::record::decode_record;
use crate::{Record, RecordSource, Result};

/// Connection settings for the user database
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub acquire_timeout: Duration,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            database: String::new(),
            user: "root".to_string(),
            password: String::new(),
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl DbSettings {
    fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password);

        if self.database.is_empty() {
            options
        } else {
            options.database(&self.database)
        }
    }
}

/// Reads records from a MySQL table
pub struct MySqlSource {
    pool: MySqlPool,
    query: SelectQuery,
}

impl MySqlSource {
    /// Open a single-connection pool; fails before any row can be read.
    pub async fn connect(settings: &DbSettings, query: SelectQuery) -> Result<Self> {
        tracing::debug!(host = %settings.host, port = settings.port, "connecting to MySQL");

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(settings.connect_options())
            .await?;

        Ok(Self { pool, query })
    }
}

#[async_trait]
impl RecordSource for MySqlSource {
    fn columns(&self) -> &[String] {
        self.query.columns()
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        let sql = self.query.to_sql(Dialect::MySql);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        tracing::debug!(table = self.query.table(), rows = rows.len(), "fetched records");

        rows.iter()
            .map(|row| decode_record(row, self.query.columns()))
            .collect()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
