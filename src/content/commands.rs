//! Command cheat-sheet entries, one ordered list per level.

use serde_yaml::{Mapping, Value};

use super::metrics::MetricsReport;
use super::store::{ContentKind, ContentStore};
use super::substitute::{key_to_string, Substituter};

pub struct CommandKind;

impl ContentKind for CommandKind {
    const DIRECTORY: &'static str = "commands";

    fn substitute(raw: &Mapping, substituter: &mut Substituter<'_>) -> Mapping {
        raw.iter()
            .map(|(level, commands)| {
                let level_name = key_to_string(level);
                let commands = match commands {
                    Value::Sequence(list) => Value::Sequence(
                        list.iter()
                            .enumerate()
                            .map(|(i, command)| {
                                substituter.mapping_values(&format!("{}/{}", level_name, i), command)
                            })
                            .collect(),
                    ),
                    other => other.clone(),
                };
                (level.clone(), commands)
            })
            .collect()
    }
}

pub type Commands = ContentStore<CommandKind>;

/// Read access to the command lists of one content language.
pub trait CommandSource: Send + Sync {
    /// The commands shown for `level`, in file order.
    fn commands_for_level(&self, level: &str, keyword_language: &str) -> Vec<Value>;

    /// Cache counters, when the source has a cache.
    fn cache_report(&self) -> MetricsReport {
        MetricsReport::default()
    }
}

impl CommandSource for Commands {
    fn commands_for_level(&self, level: &str, keyword_language: &str) -> Vec<Value> {
        match self.level(level, keyword_language) {
            Some(Value::Sequence(commands)) => commands,
            _ => Vec::new(),
        }
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

    const COMMANDS: &str = r#"
1:
  - name: print
    explanation: "Print something with `{print}`."
    example: "{print} Hello welcome to Hedy!"
  - name: ask
    explanation: "Ask something with `{ask}`."
    example: "{ask} What is your favorite color?"
    demo_code: 3
2:
  - name: is
    explanation: "Name something with `{is}`."
    example: "name {is} Hedy"
"#;

    fn table() -> Arc<KeywordTable> {
        let en: KeywordMap = [
            ("print".to_string(), "print".to_string()),
            ("ask".to_string(), "ask".to_string()),
            ("is".to_string(), "is".to_string()),
        ]
        .into();
        let nl: KeywordMap = [
            ("print".to_string(), "print".to_string()),
            ("ask".to_string(), "vraag".to_string()),
            ("is".to_string(), "is".to_string()),
        ]
        .into();
        Arc::new(KeywordTable::from_maps([
            ("en".to_string(), en),
            ("nl".to_string(), nl),
        ]))
    }

    fn open(body: &str) -> (TempDir, Commands) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("commands")).unwrap();
        fs::write(tmp.path().join("commands/en.yaml"), body).unwrap();
        let store = Commands::open("en", tmp.path(), CacheStrategy::EagerPreload, table()).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_commands_for_level_substitutes_every_field() {
        let (_tmp, store) = open(COMMANDS);
        let commands = store.commands_for_level("1", "nl");

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1]["example"].as_str(), Some("vraag What is your favorite color?"));
        assert_eq!(commands[1]["explanation"].as_str(), Some("Ask something with `vraag`."));
        assert_eq!(commands[1]["demo_code"].as_i64(), Some(3));
    }

    #[test]
    fn test_command_order_is_preserved() {
        let (_tmp, store) = open(COMMANDS);
        let names: Vec<_> = store
            .commands_for_level("1", "en")
            .iter()
            .filter_map(|c| c["name"].as_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["print", "ask"]);
    }

    #[test]
    fn test_missing_level_is_empty() {
        let (_tmp, store) = open(COMMANDS);
        assert!(store.commands_for_level("18", "en").is_empty());
    }

    #[test]
    fn test_bad_field_does_not_abort_the_rest() {
        let (_tmp, store) = open("1:\n  - a: '{}'\n    b: '{print} ok'\n");
        let commands = store.commands_for_level("1", "en");
        assert_eq!(commands[0]["a"].as_str(), Some("{}"));
        assert_eq!(commands[0]["b"].as_str(), Some("print ok"));

        let issues = &store.get_substituted("en").unwrap().issues;
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, "1/0/a");
    }
}
