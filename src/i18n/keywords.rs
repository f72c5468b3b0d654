//! Keyword vocabulary per keyword language.
//!
//! Each `content/keywords/{lang}.yaml` file maps placeholder names used in
//! lesson text (`print`, `ask`, `is`, ...) to the keyword spelled in that
//! language. Some keywords accept several spellings, stored as
//! `"draai|turn"`; lesson text always shows the first one.

use std::collections::HashMap;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, warn};

use crate::error::ContentError;

/// Placeholder name → keyword for one language.
pub type KeywordMap = HashMap<String, String>;

#[derive(Debug, Default, Clone)]
pub struct KeywordTable {
    languages: HashMap<String, KeywordMap>,
}

impl KeywordTable {
    /// Load `{dir}/{code}.yaml` for every code in `languages`.
    pub fn load<'a>(
        dir: &Path,
        languages: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ContentError> {
        let mut table = HashMap::new();

        for code in languages {
            let path = dir.join(format!("{}.yaml", code));
            let source = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;
            let keywords = parse_keyword_file(&source, &path)?;
            debug!("Loaded {} keywords for {}", keywords.len(), code);
            table.insert(code.to_string(), keywords);
        }

        Ok(Self { languages: table })
    }

    /// Build a table from already-resolved maps.
    pub fn from_maps(languages: impl IntoIterator<Item = (String, KeywordMap)>) -> Self {
        Self {
            languages: languages.into_iter().collect(),
        }
    }

    /// Placeholder → keyword map for `code`.
    pub fn for_language(&self, code: &str) -> Option<&KeywordMap> {
        self.languages.get(code)
    }

    /// Whether a keyword file was loaded for `code`.
    pub fn has_language(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Codes of every loaded keyword language, in no particular order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}

/// Keep only the first of several `|`-separated spellings.
pub fn resolve_alternatives(raw: &str) -> &str {
    raw.split('|').next().unwrap_or(raw)
}

pub(crate) fn parse_keyword_file(source: &str, path: &Path) -> Result<KeywordMap, ContentError> {
    let document: Value = serde_yaml::from_str(source).map_err(|source| ContentError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(KeywordMap::new()),
        _ => {
            return Err(ContentError::Shape {
                path: path.to_path_buf(),
                reason: "keyword file must be a mapping".to_string(),
            })
        }
    };

    let mut keywords = KeywordMap::with_capacity(mapping.len());
    for (key, value) in mapping {
        let Some(name) = scalar_to_string(&key) else {
            warn!("Ignoring non-scalar keyword name in {}", path.display());
            continue;
        };
        let resolved = match &value {
            Value::String(s) => resolve_alternatives(s).to_string(),
            other => match scalar_to_string(other) {
                Some(s) => s,
                None => {
                    warn!("Ignoring non-scalar value for keyword '{}' in {}", name, path.display());
                    continue;
                }
            },
        };
        keywords.insert(name, resolved);
    }

    Ok(keywords)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
