//! Keyword substitution over raw YAML documents.
//!
//! A substitution pass reads the raw document by reference and builds a new
//! one, so the cached raw document is never altered and can be reused for
//! every keyword language. Fields that fail to format keep their raw text
//! and are reported as [`PlaceholderIssue`]s.

use serde_yaml::{Mapping, Value};
use tracing::warn;

use super::placeholder::{format_placeholders, PlaceholderError};
use crate::i18n::KeywordMap;

/// A field that could not be substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderIssue {
    /// Slash-separated path of the field inside the document
    pub location: String,
    pub keyword_language: String,
    /// The raw text that was kept
    pub text: String,
    pub error: PlaceholderError,
}

/// A keyword-substituted copy of a content document.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutedContent {
    pub keyword_language: String,
    pub document: Mapping,
    pub issues: Vec<PlaceholderIssue>,
}

impl SubstitutedContent {
    /// Whether the document has no levels.
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Entry for `level`, see [`lookup`].
    pub fn level(&self, level: &str) -> Option<&Value> {
        lookup(&self.document, level)
    }
}

/// Collects issues while formatting the text fields of one document.
pub struct Substituter<'a> {
    keywords: &'a KeywordMap,
    keyword_language: &'a str,
    issues: Vec<PlaceholderIssue>,
}

impl<'a> Substituter<'a> {
    pub fn new(keywords: &'a KeywordMap, keyword_language: &'a str) -> Self {
        Self {
            keywords,
            keyword_language,
            issues: Vec::new(),
        }
    }

    /// Substitute a single field. Non-string values are copied unchanged.
    pub fn text(&mut self, location: &str, value: &Value) -> Value {
        let Value::String(raw) = value else {
            return value.clone();
        };

        match format_placeholders(raw, self.keywords) {
            Ok(formatted) => Value::String(formatted),
            Err(error) => {
                warn!(
                    "Unresolved placeholder in {} ({}): {} in line: {}",
                    location, self.keyword_language, error, raw
                );
                self.issues.push(PlaceholderIssue {
                    location: location.to_string(),
                    keyword_language: self.keyword_language.to_string(),
                    text: raw.clone(),
                    error,
                });
                value.clone()
            }
        }
    }

    /// Substitute every value of a mapping, leaving keys alone.
    pub fn mapping_values(&mut self, location: &str, value: &Value) -> Value {
        match value {
            Value::Mapping(mapping) => Value::Mapping(
                mapping
                    .iter()
                    .map(|(k, v)| {
                        let field = format!("{}/{}", location, key_to_string(k));
                        (k.clone(), self.text(&field, v))
                    })
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Wrap the built document together with the collected issues.
    pub fn finish(self, document: Mapping) -> SubstitutedContent {
        SubstitutedContent {
            keyword_language: self.keyword_language.to_string(),
            document,
            issues: self.issues,
        }
    }
}

/// Look up `key` in a mapping. Keys that parse as integers match numeric
/// YAML keys first, then string keys.
pub fn lookup<'v>(mapping: &'v Mapping, key: &str) -> Option<&'v Value> {
    if let Ok(n) = key.trim().parse::<i64>() {
        if let Some(value) = mapping.get(Value::Number(n.into())) {
            return Some(value);
        }
    }
    mapping.get(key)
}

/// Render a YAML key for paths and listings.
pub fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "~".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Number of entries in a mapping or sequence; zero for anything else.
pub fn entry_count(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Mapping(m)) => m.len(),
        Some(Value::Sequence(s)) => s.len(),
        _ => 0,
    }
}
