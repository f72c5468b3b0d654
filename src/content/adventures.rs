//! Adventures: named, multi-level lessons.
//!
//! Adventures are always listed in the curriculum order below, whatever
//! order a translation file happens to use.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use super::metrics::MetricsReport;
use super::store::{ContentKind, ContentStore};
use super::substitute::{key_to_string, Substituter};
use crate::i18n::CANONICAL_LANGUAGE;

/// Curriculum order. Adventures not listed here are not shown.
pub const ADVENTURE_ORDER: &[&str] = &[
    "default",
    "story",
    "parrot",
    "songs",
    "turtle",
    "dishes",
    "dice",
    "rock",
    "calculator",
    "fortune",
    "restaurant",
    "haunted",
    "piggybank",
    "quizmaster",
    "language",
    "secret",
    "tic",
    "blackjack",
    "next",
    "end",
];

pub struct AdventureKind;

impl ContentKind for AdventureKind {
    const DIRECTORY: &'static str = "adventures";
    const ROOT_KEY: Option<&'static str> = Some("adventures");

    fn prepare(raw: Mapping) -> Mapping {
        order_adventures(raw, ADVENTURE_ORDER)
    }

    fn substitute(raw: &Mapping, substituter: &mut Substituter<'_>) -> Mapping {
        raw.iter()
            .map(|(short_name, adventure)| {
                let name = key_to_string(short_name);
                (short_name.clone(), substitute_adventure(&name, adventure, substituter))
            })
            .collect()
    }
}

/// Reorder `adventures` to follow `order`, dropping anything not listed.
pub fn order_adventures(mut adventures: Mapping, order: &[&str]) -> Mapping {
    order
        .iter()
        .filter_map(|key| {
            let adventure = adventures.remove(*key)?;
            (!is_blank(&adventure)).then(|| (Value::String((*key).to_string()), adventure))
        })
        .collect()
}

/// Null, `false`, and empty strings, lists, or mappings count as absent.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Sequence(items) => items.is_empty(),
        Value::Mapping(fields) => fields.is_empty(),
        Value::Number(_) | Value::Tagged(_) => false,
    }
}

/// Only the per-level texts carry keywords; name and description are copied.
fn substitute_adventure(name: &str, adventure: &Value, substituter: &mut Substituter<'_>) -> Value {
    let Value::Mapping(fields) = adventure else {
        return adventure.clone();
    };

    let fields = fields
        .iter()
        .map(|(key, value)| match (key.as_str(), value) {
            (Some("levels"), Value::Mapping(levels)) => {
                let levels = levels
                    .iter()
                    .map(|(level, texts)| {
                        let location = format!("{}/levels/{}", name, key_to_string(level));
                        (level.clone(), substituter.mapping_values(&location, texts))
                    })
                    .collect();
                (key.clone(), Value::Mapping(levels))
            }
            _ => (key.clone(), value.clone()),
        })
        .collect();

    Value::Mapping(fields)
}

pub type Adventures = ContentStore<AdventureKind>;

/// Identifier, display name, and level list of one adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdventureSummary {
    pub key: String,
    pub name: String,
    pub levels: Vec<String>,
}

/// Read access to the adventures of one content language.
pub trait AdventureSource: Send + Sync {
    /// All adventures in curriculum order, keywords resolved.
    fn adventures(&self, keyword_language: &str) -> Mapping;

    /// Identifier, name, and available levels of every adventure.
    fn adventure_keyname_name_levels(&self) -> Vec<AdventureSummary>;

    /// Identifier → display name, in curriculum order.
    fn adventure_names(&self) -> Vec<(String, String)>;

    fn has_adventures(&self) -> bool;

    /// Cache counters, when the source has a cache.
    fn cache_report(&self) -> MetricsReport {
        MetricsReport::default()
    }
}

impl AdventureSource for Adventures {
    fn adventures(&self, keyword_language: &str) -> Mapping {
        self.substituted_or_log(keyword_language)
            .map(|c| c.document.clone())
            .unwrap_or_default()
    }

    fn adventure_keyname_name_levels(&self) -> Vec<AdventureSummary> {
        let Some(content) = self.substituted_or_log(CANONICAL_LANGUAGE) else {
            return Vec::new();
        };
        content
            .document
            .iter()
            .map(|(key, adventure)| AdventureSummary {
                key: key_to_string(key),
                name: adventure_name(adventure),
                levels: match adventure.get("levels") {
                    Some(Value::Mapping(levels)) => levels.keys().map(key_to_string).collect(),
                    _ => Vec::new(),
                },
            })
            .collect()
    }

    fn adventure_names(&self) -> Vec<(String, String)> {
        let Some(content) = self.substituted_or_log(CANONICAL_LANGUAGE) else {
            return Vec::new();
        };
        content
            .document
            .iter()
            .map(|(key, adventure)| (key_to_string(key), adventure_name(adventure)))
            .collect()
    }

    fn has_adventures(&self) -> bool {
        self.has_content()
    }

    fn cache_report(&self) -> MetricsReport {
        self.metrics().report()
    }
}

fn adventure_name(adventure: &Value) -> String {
    adventure
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
