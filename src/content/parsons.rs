//! Parsons problems: reorder the shuffled lines of a program.

use serde_yaml::{Mapping, Value};

use super::metrics::MetricsReport;
use super::store::{ContentKind, ContentStore};
use super::substitute::{key_to_string, Substituter};

pub struct ParsonsKind;

impl ContentKind for ParsonsKind {
    const DIRECTORY: &'static str = "parsons";
    const ROOT_KEY: Option<&'static str> = Some("levels");

    fn substitute(raw: &Mapping, substituter: &mut Substituter<'_>) -> Mapping {
        raw.iter()
            .map(|(level, exercises)| {
                let level_name = key_to_string(level);
                let exercises = match exercises {
                    Value::Mapping(exercises) => Value::Mapping(
                        exercises
                            .iter()
                            .map(|(number, exercise)| {
                                let location =
                                    format!("{}/{}/code_lines", level_name, key_to_string(number));
                                (number.clone(), substitute_code_lines(&location, exercise, substituter))
                            })
                            .collect(),
                    ),
                    other => other.clone(),
                };
                (level.clone(), exercises)
            })
            .collect()
    }
}

fn substitute_code_lines(location: &str, exercise: &Value, substituter: &mut Substituter<'_>) -> Value {
    let Value::Mapping(fields) = exercise else {
        return exercise.clone();
    };
    Value::Mapping(
        fields
            .iter()
            .map(|(key, value)| {
                if key.as_str() == Some("code_lines") {
                    (key.clone(), substituter.mapping_values(location, value))
                } else {
                    (key.clone(), value.clone())
                }
            })
            .collect(),
    )
}

pub type ParsonsProblems = ContentStore<ParsonsKind>;

/// Read access to the Parsons exercises of one content language.
pub trait ParsonsSource: Send + Sync {
    /// Number of exercises at `level`.
    fn exercise_count(&self, level: &str) -> usize;

    /// Exercise number → exercise for `level`.
    fn parsons_for_level(&self, level: &str, keyword_language: &str) -> Mapping;

    fn parsons_exercise(&self, level: &str, exercise: &str, keyword_language: &str) -> Option<Value>;

    /// Cache counters, when the source has a cache.
    fn cache_report(&self) -> MetricsReport {
        MetricsReport::default()
    }
}

impl ParsonsSource for ParsonsProblems {
    fn exercise_count(&self, level: &str) -> usize {
        self.count_at_level(level)
    }

    fn parsons_for_level(&self, level: &str, keyword_language: &str) -> Mapping {
        match self.level(level, keyword_language) {
            Some(Value::Mapping(exercises)) => exercises,
            _ => Mapping::new(),
        }
    }

    fn parsons_exercise(&self, level: &str, exercise: &str, keyword_language: &str) -> Option<Value> {
        self.item(level, exercise, keyword_language)
    }

    fn cache_report(&self) -> MetricsReport {
        self.metrics().report()
    }
}
