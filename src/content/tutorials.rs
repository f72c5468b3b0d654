//! Guided tutorials: a numbered list of steps per level.

use serde_yaml::{Mapping, Value};

use super::metrics::MetricsReport;
use super::store::{ContentKind, ContentStore};
use super::substitute::{key_to_string, Substituter};

pub struct TutorialKind;

impl ContentKind for TutorialKind {
    const DIRECTORY: &'static str = "tutorials";

    /// Each level is replaced by its `steps`, with only the step `text`
    /// substituted.
    fn substitute(raw: &Mapping, substituter: &mut Substituter<'_>) -> Mapping {
        raw.iter()
            .map(|(level, tutorial)| {
                let level_name = key_to_string(level);
                let steps = match tutorial.get("steps") {
                    Some(Value::Mapping(steps)) => Value::Mapping(
                        steps
                            .iter()
                            .map(|(index, step)| {
                                let location =
                                    format!("{}/steps/{}/text", level_name, key_to_string(index));
                                (index.clone(), substitute_step(&location, step, substituter))
                            })
                            .collect(),
                    ),
                    Some(other) => other.clone(),
                    None => Value::Mapping(Mapping::new()),
                };
                (level.clone(), steps)
            })
            .collect()
    }
}

fn substitute_step(location: &str, step: &Value, substituter: &mut Substituter<'_>) -> Value {
    let Value::Mapping(fields) = step else {
        return step.clone();
    };
    Value::Mapping(
        fields
            .iter()
            .map(|(key, value)| match key.as_str() {
                Some("text") => (key.clone(), substituter.text(location, value)),
                _ => (key.clone(), value.clone()),
            })
            .collect(),
    )
}

pub type Tutorials = ContentStore<TutorialKind>;

/// Read access to the tutorials of one content language.
pub trait TutorialSource: Send + Sync {
    /// Step number → step for `level`.
    fn tutorial_for_level(&self, level: &str, keyword_language: &str) -> Mapping;

    fn tutorial_step(&self, level: &str, step: &str, keyword_language: &str) -> Option<Value>;

    /// Cache counters, when the source has a cache.
    fn cache_report(&self) -> MetricsReport {
        MetricsReport::default()
    }
}

impl TutorialSource for Tutorials {
    fn tutorial_for_level(&self, level: &str, keyword_language: &str) -> Mapping {
        match self.level(level, keyword_language) {
            Some(Value::Mapping(steps)) => steps,
            _ => Mapping::new(),
        }
    }

    fn tutorial_step(&self, level: &str, step: &str, keyword_language: &str) -> Option<Value> {
        self.item(level, step, keyword_language)
    }

    fn cache_report(&self) -> MetricsReport {
        self.metrics().report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheStrategy;
    use crate::i18n::{KeywordMap, KeywordTable};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    const TUTORIALS: &str = r#"
intro:
  steps:
    1:
      title: "Welcome to {print}"
      text: "Click {print} to run."
    2:
      title: "Editor"
      text: "Type here."
1:
  steps:
    1:
      title: "Level 1"
      text: "Use {ask} to ask."
"#;

    fn table() -> Arc<KeywordTable> {
        let de: KeywordMap = [("print", "drucke"), ("ask", "frage")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(KeywordTable::from_maps([("de".to_string(), de)]))
    }

    fn open() -> (TempDir, Tutorials) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("tutorials")).unwrap();
        fs::write(tmp.path().join("tutorials/de.yaml"), TUTORIALS).unwrap();
        let store = Tutorials::open("de", tmp.path(), CacheStrategy::LazyOnMiss, table()).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_only_step_text_is_substituted() {
        let (_tmp, store) = open();
        let step = store.tutorial_step("intro", "1", "de").unwrap();
        assert_eq!(step["text"].as_str(), Some("Click drucke to run."));
        assert_eq!(step["title"].as_str(), Some("Welcome to {print}"));
    }

    #[test]
    fn test_numeric_level() {
        let (_tmp, store) = open();
        let steps = store.tutorial_for_level("1", "de");
        assert_eq!(steps.len(), 1);
        let step = store.tutorial_step("1", "1", "de").unwrap();
        assert_eq!(step["text"].as_str(), Some("Use frage to ask."));
    }

    #[test]
    fn test_level_value_is_the_steps_mapping() {
        let (_tmp, store) = open();
        let steps = store.tutorial_for_level("intro", "de");
        assert_eq!(steps.len(), 2);
        assert!(steps.get("steps").is_none());
    }

    #[test]
    fn test_missing_step_and_level() {
        let (_tmp, store) = open();
        assert!(store.tutorial_step("intro", "9", "de").is_none());
        assert!(store.tutorial_for_level("teacher", "de").is_empty());
    }
}
