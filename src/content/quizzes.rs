//! Multiple-choice quizzes, one set of questions per level.
//!
//! Quiz questions have not been rewritten for translated keywords yet, so
//! lookups use a configured keyword language (English by default) instead of
//! the caller's.

use std::path::Path;
use std::sync::Arc;

use serde_yaml::{Mapping, Value};

use super::metrics::MetricsReport;
use super::store::{ContentKind, ContentStore};
use super::substitute::{key_to_string, Substituter};
use crate::config::CacheStrategy;
use crate::error::ContentError;
use crate::i18n::KeywordTable;

pub struct QuizKind;

impl ContentKind for QuizKind {
    const DIRECTORY: &'static str = "quizzes";

    /// Files either wrap their levels in `levels:` or list them at the top.
    fn select(document: Value) -> Result<Mapping, String> {
        match document {
            Value::Mapping(mut mapping) => match mapping.remove("levels") {
                Some(Value::Mapping(levels)) => Ok(levels),
                Some(Value::Null) => Ok(Mapping::new()),
                Some(_) => Err("expected 'levels' to be a mapping".to_string()),
                None => Ok(mapping),
            },
            Value::Null => Ok(Mapping::new()),
            _ => Err("expected a mapping at the top level".to_string()),
        }
    }

    fn substitute(raw: &Mapping, substituter: &mut Substituter<'_>) -> Mapping {
        raw.iter()
            .map(|(level, questions)| {
                let level_name = key_to_string(level);
                let questions = match questions {
                    Value::Mapping(questions) => Value::Mapping(
                        questions
                            .iter()
                            .map(|(number, question)| {
                                let location = format!("{}/{}", level_name, key_to_string(number));
                                (number.clone(), substitute_question(&location, question, substituter))
                            })
                            .collect(),
                    ),
                    other => other.clone(),
                };
                (level.clone(), questions)
            })
            .collect()
    }
}

fn substitute_question(location: &str, question: &Value, substituter: &mut Substituter<'_>) -> Value {
    let Value::Mapping(fields) = question else {
        return question.clone();
    };

    Value::Mapping(
        fields
            .iter()
            .map(|(key, value)| {
                let field = format!("{}/{}", location, key_to_string(key));
                let value = match (key.as_str(), value) {
                    (Some("mp_choice_options"), Value::Sequence(options)) => Value::Sequence(
                        options
                            .iter()
                            .enumerate()
                            .map(|(i, option)| substituter.mapping_values(&format!("{}/{}", field, i), option))
                            .collect(),
                    ),
                    _ => substituter.text(&field, value),
                };
                (key.clone(), value)
            })
            .collect(),
    )
}

/// Quiz store with the keyword-language override applied to every lookup.
pub struct Quizzes {
    store: ContentStore<QuizKind>,
    keyword_override: Option<String>,
}

impl Quizzes {
    /// Open the quizzes for `language`. With `keyword_override` set, every
    /// lookup uses that keyword language.
    pub fn open(
        language: &str,
        content_dir: &Path,
        strategy: CacheStrategy,
        keywords: Arc<KeywordTable>,
        keyword_override: Option<String>,
    ) -> Result<Self, ContentError> {
        Ok(Self {
            store: ContentStore::open(language, content_dir, strategy, keywords)?,
            keyword_override,
        })
    }

    /// The keyword language actually used for a request in `requested`.
    pub fn effective_keyword_language<'a>(&'a self, requested: &'a str) -> &'a str {
        self.keyword_override.as_deref().unwrap_or(requested)
    }
}

/// Read access to the quizzes of one content language.
pub trait QuizSource: Send + Sync {
    /// Number of questions at `level`.
    fn question_count(&self, level: &str) -> usize;

    /// Question number → question for `level`.
    fn quiz_for_level(&self, level: &str, keyword_language: &str) -> Mapping;

    fn quiz_question(&self, level: &str, question: &str, keyword_language: &str) -> Option<Value>;

    /// Cache counters, when the source has a cache.
    fn cache_report(&self) -> MetricsReport {
        MetricsReport::default()
    }
}

impl QuizSource for Quizzes {
    fn question_count(&self, level: &str) -> usize {
        self.store.count_at_level(level)
    }

    fn quiz_for_level(&self, level: &str, keyword_language: &str) -> Mapping {
        let keyword_language = self.effective_keyword_language(keyword_language);
        match self.store.level(level, keyword_language) {
            Some(Value::Mapping(questions)) => questions,
            _ => Mapping::new(),
        }
    }

    fn quiz_question(&self, level: &str, question: &str, keyword_language: &str) -> Option<Value> {
        let keyword_language = self.effective_keyword_language(keyword_language);
        self.store.item(level, question, keyword_language)
    }

    fn cache_report(&self) -> MetricsReport {
        self.store.metrics().report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::KeywordMap;
    use std::fs;
    use tempfile::TempDir;

    const QUIZ: &str = r#"
levels:
  1:
    1:
      question_text: "Which command shows text?"
      code: "{print} Hello"
      mp_choice_options:
        - option: "{print}"
          feedback: "Yes, {print} shows text."
        - option: "{ask}"
          feedback: "No, {ask} asks a question."
      correct_answer: "A"
      question_score: 10
    2:
      question_text: "What does {echo} do?"
      mp_choice_options:
        - option: "Repeats the answer"
          feedback: "Great!"
      correct_answer: "A"
      question_score: 10
"#;

    fn table() -> Arc<KeywordTable> {
        let en: KeywordMap = ["print", "ask", "echo"]
            .iter()
            .map(|k| (k.to_string(), k.to_string()))
            .collect();
        let nl: KeywordMap = [("print", "print"), ("ask", "vraag"), ("echo", "herhaal")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(KeywordTable::from_maps([
            ("en".to_string(), en),
            ("nl".to_string(), nl),
        ]))
    }

    fn open(body: &str, keyword_override: Option<&str>) -> (TempDir, Quizzes) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("quizzes")).unwrap();
        fs::write(tmp.path().join("quizzes/nl.yaml"), body).unwrap();
        let quizzes = Quizzes::open(
            "nl",
            tmp.path(),
            CacheStrategy::EagerPreload,
            table(),
            keyword_override.map(str::to_string),
        )
        .unwrap();
        (tmp, quizzes)
    }

    #[test]
    fn test_keyword_language_is_forced_to_english() {
        let (_tmp, quizzes) = open(QUIZ, Some("en"));
        assert_eq!(quizzes.quiz_for_level("1", "nl"), quizzes.quiz_for_level("1", "en"));

        let question = quizzes.quiz_question("1", "1", "nl").unwrap();
        assert_eq!(question["mp_choice_options"][1]["option"].as_str(), Some("ask"));
    }

    #[test]
    fn test_override_can_be_disabled() {
        let (_tmp, quizzes) = open(QUIZ, None);
        let question = quizzes.quiz_question("1", "1", "nl").unwrap();
        assert_eq!(question["mp_choice_options"][1]["option"].as_str(), Some("vraag"));
        assert_eq!(
            question["mp_choice_options"][1]["feedback"].as_str(),
            Some("No, vraag asks a question.")
        );
    }

    #[test]
    fn test_every_question_field_is_substituted() {
        let (_tmp, quizzes) = open(QUIZ, Some("en"));
        let question = quizzes.quiz_question("1", "2", "en").unwrap();
        assert_eq!(question["question_text"].as_str(), Some("What does echo do?"));
        assert_eq!(question["question_score"].as_i64(), Some(10));
        assert_eq!(question["correct_answer"].as_str(), Some("A"));
    }

    #[test]
    fn test_question_count() {
        let (_tmp, quizzes) = open(QUIZ, Some("en"));
        assert_eq!(quizzes.question_count("1"), 2);
        assert_eq!(quizzes.question_count("5"), 0);
    }

    #[test]
    fn test_levels_at_top_level() {
        let (_tmp, quizzes) = open("1:\n  1:\n    question_text: '{print}?'\n", Some("en"));
        let question = quizzes.quiz_question("1", "1", "en").unwrap();
        assert_eq!(question["question_text"].as_str(), Some("print?"));
    }

    #[test]
    fn test_effective_keyword_language() {
        let (_tmp, forced) = open(QUIZ, Some("en"));
        assert_eq!(forced.effective_keyword_language("nl"), "en");
        let (_tmp, honoured) = open(QUIZ, None);
        assert_eq!(honoured.effective_keyword_language("nl"), "nl");
    }
}
