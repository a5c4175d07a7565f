//! Record source trait

use async_trait::async_trait;

use crate::{Record, Result};

/// Anything that yields user records to be logged
///
/// A source only exists once its connection has been acquired, so callers
/// never reach `fetch` after a failed connect.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Column names, in record order
    fn columns(&self) -> &[String];

    /// Run the query and collect every row
    async fn fetch(&self) -> Result<Vec<Record>>;

    /// Release the underlying connections
    async fn close(&self);
}
