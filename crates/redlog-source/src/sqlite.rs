use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::query::{Dialect, SelectQuery};
use crate::record::decode_record;
use crate::{Record, RecordSource, Result};

/// Reads records from a SQLite table
pub struct SqliteSource {
    pool: SqlitePool,
    query: SelectQuery,
}

impl SqliteSource {
    pub async fn connect(url: &str, query: SelectQuery) -> Result<Self> {
        tracing::debug!(url, "opening SQLite database");

        let pool = SqlitePoolOptions::new().max_connections(1).connect(url).await?;
        Ok(Self::from_pool(pool, query))
    }

    pub fn from_pool(pool: SqlitePool, query: SelectQuery) -> Self {
        Self { pool, query }
    }
}

#[async_trait]
impl RecordSource for SqliteSource {
    fn columns(&self) -> &[String] {
        self.query.columns()
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        let sql = self.query.to_sql(Dialect::Sqlite);
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
