use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

use crate::matcher::FieldMatcher;
use crate::{RedactError, Result};

/// Replacement written in place of a sensitive value
pub const DEFAULT_TOKEN: &str = "***";

/// Delimiter between `field=value` segments
pub const DEFAULT_SEPARATOR: &str = ";";

/// Field names treated as PII unless the caller supplies its own list
pub const DEFAULT_PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

pub fn default_pii_fields() -> Vec<String> {
    DEFAULT_PII_FIELDS.iter().map(|f| f.to_string()).collect()
}

/// Which fields to redact and how
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSettings {
    #[serde(default = "default_pii_fields")]
    pub fields: Vec<String>,

    #[serde(default = "default_token")]
    pub token: String,

    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for RedactionSettings {
    fn default() -> Self {
        Self {
            fields: default_pii_fields(),
            token: default_token(),
            separator: default_separator(),
        }
    }
}

fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Redact `field=value` segments for every field in `fields`.
///
/// Never fails: input that does not look like `field=value` comes back
/// unchanged. The compiled pattern is shared across calls with the same
/// fields and separator and is kept for the life of the process, so callers
/// that build a fresh field list per message grow the cache without bound.
/// An empty separator makes every matched value run to the end of the
/// message. No token checks are made here: a token that contains or overlaps
/// the separator makes the output change again on a second pass. Use
/// `Redactor` when the result has to be stable.
pub fn redact(message: &str, fields: &[String], token: &str, separator: &str) -> String {
    if fields.is_empty() {
        return message.to_string();
    }

    match FieldMatcher::cached(fields, separator) {
        Ok(matcher) => matcher.replace(message, token).into_owned(),
        // Escaped literals always compile; only a size limit could get here.
        Err(_) => token.to_string(),
    }
}

/// Validated, precompiled redaction configuration
#[derive(Debug, Clone)]
pub struct Redactor {
    matcher: Arc<FieldMatcher>,
    token: String,
}

impl Redactor {
    pub fn new(fields: &[String], token: &str, separator: &str) -> Result<Self> {
        if separator.is_empty() {
            return Err(RedactError::EmptySeparator);
        }
        // The first separator after a token must be the one that followed it
        if format!("{token}{separator}").find(separator) != Some(token.len()) {
            return Err(RedactError::TokenContainsSeparator {
                token: token.to_string(),
                separator: separator.to_string(),
            });
        }

        Ok(Self {
            matcher: FieldMatcher::cached(fields, separator)?,
            token: token.to_string(),
        })
    }

    pub fn from_settings(settings: &RedactionSettings) -> Result<Self> {
        Self::new(&settings.fields, &settings.token, &settings.separator)
    }

    pub fn fields(&self) -> &[String] {
        self.matcher.fields()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn separator(&self) -> &str {
        self.matcher.separator()
    }

    /// Redact one message
    pub fn redact<'a>(&self, message: &'a str) -> Cow<'a, str> {
        self.matcher.replace(message, &self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pii() -> Vec<String> {
        default_pii_fields()
    }

    #[test]
    fn test_basic_redaction() {
        let message = "name=Bob;email=bob@x.com;phone=555;ssn=1;password=p";

        assert_eq!(
            redact(message, &pii(), "***", ";"),
            "name=***;email=***;phone=***;ssn=***;password=***"
        );
    }

    #[test]
    fn test_exact_name_matching() {
        let fields = vec!["name".to_string()];

        assert_eq!(redact("username=alice", &fields, "***", ";"), "username=alice");
    }

    #[test]
    fn test_match_extends_to_end_of_string() {
        let fields = vec!["password".to_string()];

        assert_eq!(redact("password=abc123", &fields, "***", ";"), "password=***");
    }

    #[test]
    fn test_empty_field_set_is_noop() {
        let message = "name=Bob; email=bob@x.com;";

        assert_eq!(redact(message, &[], "***", ";"), message);
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(redact("name=;ip=1", &pii(), "***", ";"), "name=***;ip=1");
    }

    #[test]
    fn test_idempotent() {
        let messages = [
            "name=Bob;email=bob@x.com;phone=555;ssn=1;password=p",
            "name=***; email=***; ip=10.0.0.1;",
            "username=alice;name=",
            "no fields here",
            "",
        ];
        for message in messages {
            let once = redact(message, &pii(), "***", ";");
            let twice = redact(&once, &pii(), "***", ";");
            assert_eq!(once, twice, "not idempotent for {:?}", message);
        }
    }

    #[test]
    fn test_token_verbatim_in_value() {
        assert_eq!(redact("name=***;ip=1", &pii(), "***", ";"), "name=***;ip=1");
    }

    #[test]
    fn test_whitespace_separated_segments() {
        let message = "name=John Doe; email=john@example.com; ip=127.0.0.1;";

        assert_eq!(
            redact(message, &pii(), "***", ";"),
            "name=***; email=***; ip=127.0.0.1;"
        );
    }

    #[test]
    fn test_custom_token_and_separator() {
        let fields = vec!["ssn".to_string()];

        assert_eq!(
            redact("ssn=1,2,3|ip=1", &fields, "[REDACTED]", "|"),
            "ssn=[REDACTED]|ip=1"
        );
    }

    #[test]
    fn test_redactor_rejects_empty_separator() {
        let err = Redactor::new(&pii(), "***", "").unwrap_err();
        assert!(matches!(err, RedactError::EmptySeparator));
    }

    #[test]
    fn test_redactor_rejects_token_with_separator() {
        let err = Redactor::new(&pii(), "x;y", ";").unwrap_err();
        assert!(matches!(err, RedactError::TokenContainsSeparator { .. }));
    }

    #[test]
    fn test_redactor_rejects_token_overlapping_separator() {
        let fields = vec!["f".to_string()];

        let err = Redactor::new(&fields, "xb", "bb").unwrap_err();
        assert!(matches!(err, RedactError::TokenContainsSeparator { .. }));
        assert!(Redactor::new(&fields, "xa", "bb").is_ok());
    }

    #[test]
    fn test_redactor_output_is_stable() {
        let fields = vec!["f".to_string()];
        let redactor = Redactor::new(&fields, "xa", "bb").unwrap();

        let once = redactor.redact("f=1bbip=2").into_owned();
        assert_eq!(once, "f=xabbip=2");
        assert_eq!(redactor.redact(&once), once);
    }

    #[test]
    fn test_concurrent_callers_share_cache() {
        let field_sets = [
            vec!["name".to_string(), "email".to_string()],
            vec!["email".to_string(), "ssn".to_string()],
            pii(),
        ];

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let fields = field_sets[i % field_sets.len()].clone();
                std::thread::spawn(move || {
                    (0..200)
                        .map(|_| redact("name=Bob;email=b@x.com;ssn=1;ip=2", &fields, "***", ";"))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let expected = match i % field_sets.len() {
                0 => "name=***;email=***;ssn=1;ip=2",
                1 => "name=Bob;email=***;ssn=***;ip=2",
                _ => "name=***;email=***;ssn=***;ip=2",
            };
            for out in handle.join().unwrap() {
                assert_eq!(out, expected);
            }
        }
    }

    #[test]
    fn test_redactor_matches_free_function() {
        let redactor = Redactor::from_settings(&RedactionSettings::default()).unwrap();
        let message = "name=Bob;ip=1;password=hunter2";

        assert_eq!(redactor.redact(message), redact(message, &pii(), "***", ";"));
        assert_eq!(redactor.token(), "***");
        assert_eq!(redactor.separator(), ";");
        assert_eq!(redactor.fields(), pii().as_slice());
    }
}
