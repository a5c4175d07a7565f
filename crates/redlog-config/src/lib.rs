use redlog_core::{DEFAULT_FILTER, Envelope};
use redlog_redact::RedactionSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Simple configuration for redlog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub redaction: RedactionSettings,

    #[serde(default)]
    pub envelope: Envelope,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

/// Where user rows are read from by `redlog dump`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub name: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_columns")]
    pub columns: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            name: String::new(),
            user: default_user(),
            password: String::new(),
            table: default_table(),
            columns: default_columns(),
        }
    }
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_user() -> String {
    "root".to_string()
}

fn default_table() -> String {
    "users".to_string()
}

fn default_columns() -> Vec<String> {
    vec![
        "name".to_string(),
        "email".to_string(),
        "phone".to_string(),
        "ssn".to_string(),
        "password".to_string(),
        "ip".to_string(),
        "last_login".to_string(),
        "user_agent".to_string(),
    ]
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "redlog", "redlog") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.redlog/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.redaction.token, "***");
        assert_eq!(config.redaction.separator, ";");
        assert_eq!(config.envelope.prefix, "APP");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.user, "root");
        assert_eq!(config.logging.filter, "info,sqlx=warn");
    }

    #[test]
    fn test_default_pii_fields() {
        let config = Config::default();
        for field in ["name", "email", "phone", "ssn", "password"] {
            assert!(config.redaction.fields.contains(&field.to_string()));
        }
        assert!(!config.redaction.fields.contains(&"ip".to_string()));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.redaction, config.redaction);
        assert_eq!(parsed.database.columns, config.database.columns);
    }

    #[test]
    fn test_partial_config_parse() {
        let toml_str = r#"
[redaction]
fields = ["email", "credit_card"]

[envelope]
prefix = "HOLBERTON"

[database]
host = "db.internal"
name = "my_db"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.redaction.fields, vec!["email", "credit_card"]);
        assert_eq!(config.redaction.token, "***");
        assert_eq!(config.envelope.prefix, "HOLBERTON");
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.name, "my_db");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.table, "users");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[redaction]\ntoken = \"[X]\"\nseparator = \"|\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.redaction.token, "[X]");
        assert_eq!(config.redaction.separator, "|");
        assert_eq!(config.redaction.fields.len(), 5);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }
}
