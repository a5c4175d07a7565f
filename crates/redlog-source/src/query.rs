//! SELECT statement construction

use crate::{Result, SourceError};

/// SQL flavor, only as far as casting to text differs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    fn text_type(self) -> &'static str {
        match self {
            Dialect::MySql => "CHAR",
            Dialect::Sqlite => "TEXT",
        }
    }
}

/// `SELECT <columns> FROM <table>` with every column cast to text
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    columns: Vec<String>,
}

impl SelectQuery {
    /// Identifiers are interpolated into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` is accepted.
    pub fn new(table: &str, columns: &[String]) -> Result<Self> {
        if columns.is_empty() {
            return Err(SourceError::NoColumns);
        }
        validate_identifier(table)?;
        for column in columns {
            validate_identifier(column)?;
        }

        Ok(Self {
            table: table.to_string(),
            columns: columns.to_vec(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        let select = self
            .columns
            .iter()
            .map(|c| format!("CAST({c} AS {ty}) AS {c}", c = c, ty = dialect.text_type()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("SELECT {} FROM {};", select, self.table)
    }
}

fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(SourceError::InvalidIdentifier(name.to_string()))
    }
}
