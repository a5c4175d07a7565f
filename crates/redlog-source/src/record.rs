use crate::Result;

/// Rendered in place of a SQL NULL
pub const NULL_VALUE: &str = "NULL";

/// One result row as ordered `(column, value)` pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new(values: Vec<(String, Option<String>)>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[(String, Option<String>)] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    /// `col1=v1<sep> col2=v2<sep>`
    ///
    /// Values are written verbatim; `separator` must be the one the
    /// formatter redacts with.
    pub fn to_message(&self, separator: &str) -> String {
        let mut message = self
            .values
            .iter()
            .map(|(column, value)| format!("{}={}", column, value.as_deref().unwrap_or(NULL_VALUE)))
            .collect::<Vec<_>>()
            .join(&format!("{} ", separator));
        message.push_str(separator);
        message
    }
}

/// Decode every selected column of `row` as optional text
pub(crate) fn decode_record<R>(row: &R, columns: &[String]) -> Result<Record>
where
    R: sqlx::Row,
    usize: sqlx::ColumnIndex<R>,
    for<'r> String: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
{
    let mut values = Vec::with_capacity(columns.len());
    for (idx, column) in columns.iter().enumerate() {
        let value: Option<String> = row.try_get(idx)?;
        values.push((column.clone(), value));
    }
    Ok(Record::new(values))
}
