//! Compiled `field=` matchers and the process-wide matcher cache

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::Result;

type CacheKey = (Vec<String>, String);

lazy_static! {
    static ref MATCHER_CACHE: RwLock<HashMap<CacheKey, Arc<FieldMatcher>>> =
        RwLock::new(HashMap::new());
}

/// Locates `<field>=<value>` segments for a fixed set of field names.
///
/// All names are folded into one alternation so a message is scanned once,
/// left to right; a value that has been replaced is never looked at again.
#[derive(Debug)]
pub struct FieldMatcher {
    fields: Vec<String>,
    separator: String,
    // None when the field set is empty
    pattern: Option<Regex>,
}

impl FieldMatcher {
    /// Compile a matcher for `fields`, escaping each name so it matches literally.
    pub fn compile(fields: &[String], separator: &str) -> Result<Self> {
        let pattern = if fields.is_empty() {
            None
        } else {
            let alternation = fields
                .iter()
                .map(|field| regex::escape(field))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!("(?P<field>{})=", alternation))?)
        };

        Ok(Self {
            fields: fields.to_vec(),
            separator: separator.to_string(),
            pattern,
        })
    }

    /// Fetch the matcher for `(fields, separator)` from the shared cache,
    /// compiling and inserting it on first use.
    pub fn cached(fields: &[String], separator: &str) -> Result<Arc<Self>> {
        let key: CacheKey = (fields.to_vec(), separator.to_string());

        {
            let cache = MATCHER_CACHE.read().unwrap_or_else(|e| e.into_inner());
            if let Some(matcher) = cache.get(&key) {
                return Ok(Arc::clone(matcher));
            }
        }

        let matcher = Arc::new(Self::compile(fields, separator)?);
        let mut cache = MATCHER_CACHE.write().unwrap_or_else(|e| e.into_inner());
        Ok(Arc::clone(cache.entry(key).or_insert(matcher)))
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Replace the value of every matched field with `token`.
    ///
    /// A value extends to the next occurrence of the separator, or to the end
    /// of the message. Borrows the input when nothing matched.
    pub fn replace<'a>(&self, message: &'a str, token: &str) -> Cow<'a, str> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(message);
        };

        let mut out = String::new();
        let mut copied = 0;
        let mut search = 0;
        let mut matched = false;

        while search <= message.len() {
            let Some(found) = pattern.find_at(message, search) else {
                break;
            };

            if !at_field_start(message, found.start()) {
                // "name" inside "username": resume one character further on
                search = next_char_boundary(message, found.start());
                continue;
            }

            let value_start = found.end();
            let value_end = self.value_end(message, value_start);

            out.push_str(&message[copied..value_start]);
            out.push_str(token);
            matched = true;
            copied = value_end;
            search = value_end;
        }

        if !matched {
            return Cow::Borrowed(message);
        }

        out.push_str(&message[copied..]);
        Cow::Owned(out)
    }

    fn value_end(&self, message: &str, value_start: usize) -> usize {
        if self.separator.is_empty() {
            return message.len();
        }
        message[value_start..]
            .find(self.separator.as_str())
            .map(|offset| value_start + offset)
            .unwrap_or(message.len())
    }
}

/// A field name only counts when it is not the tail of a longer word.
fn at_field_start(message: &str, start: usize) -> bool {
    match message[..start].chars().next_back() {
        None => true,
        Some(prev) => !(prev.is_alphanumeric() || prev == '_'),
    }
}

fn next_char_boundary(message: &str, from: usize) -> usize {
    message[from..]
        .chars()
        .next()
        .map(|c| from + c.len_utf8())
        .unwrap_or(message.len() + 1)
}
