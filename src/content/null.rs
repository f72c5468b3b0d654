//! Stand-ins for content languages that have no file for a kind.
//!
//! Each one answers every lookup with an empty result, so callers never
//! have to tell "missing" apart from "present but empty".

use serde_yaml::{Mapping, Value};

use super::adventures::{AdventureSource, AdventureSummary};
use super::commands::CommandSource;
use super::parsons::ParsonsSource;
use super::quizzes::QuizSource;
use super::tutorials::TutorialSource;

#[derive(Debug, Default, Clone, Copy)]
pub struct NoSuchCommands;

impl CommandSource for NoSuchCommands {
    fn commands_for_level(&self, _level: &str, _keyword_language: &str) -> Vec<Value> {
        Vec::new()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoSuchAdventures;

impl AdventureSource for NoSuchAdventures {
    fn adventures(&self, _keyword_language: &str) -> Mapping {
        Mapping::new()
    }

    fn adventure_keyname_name_levels(&self) -> Vec<AdventureSummary> {
        Vec::new()
    }

    fn adventure_names(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn has_adventures(&self) -> bool {
        false
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoSuchParsons;

impl ParsonsSource for NoSuchParsons {
    fn exercise_count(&self, _level: &str) -> usize {
        0
    }

    fn parsons_for_level(&self, _level: &str, _keyword_language: &str) -> Mapping {
        Mapping::new()
    }

    fn parsons_exercise(&self, _level: &str, _exercise: &str, _keyword_language: &str) -> Option<Value> {
        None
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoSuchQuiz;

impl QuizSource for NoSuchQuiz {
    fn question_count(&self, _level: &str) -> usize {
        0
    }

    fn quiz_for_level(&self, _level: &str, _keyword_language: &str) -> Mapping {
        Mapping::new()
    }

    fn quiz_question(&self, _level: &str, _question: &str, _keyword_language: &str) -> Option<Value> {
        None
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoSuchTutorial;

impl TutorialSource for NoSuchTutorial {
    fn tutorial_for_level(&self, _level: &str, _keyword_language: &str) -> Mapping {
        Mapping::new()
    }

    fn tutorial_step(&self, _level: &str, _step: &str, _keyword_language: &str) -> Option<Value> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_objects_are_empty() {
        assert!(NoSuchCommands.commands_for_level("1", "en").is_empty());

        assert!(NoSuchAdventures.adventures("en").is_empty());
        assert!(NoSuchAdventures.adventure_names().is_empty());
        assert!(NoSuchAdventures.adventure_keyname_name_levels().is_empty());
        assert!(!NoSuchAdventures.has_adventures());

        assert_eq!(NoSuchParsons.exercise_count("1"), 0);
        assert!(NoSuchParsons.parsons_for_level("1", "en").is_empty());
        assert!(NoSuchParsons.parsons_exercise("1", "1", "en").is_none());

        assert_eq!(NoSuchQuiz.question_count("1"), 0);
        assert!(NoSuchQuiz.quiz_for_level("1", "en").is_empty());
        assert!(NoSuchQuiz.quiz_question("1", "1", "en").is_none());

        assert!(NoSuchTutorial.tutorial_for_level("1", "en").is_empty());
        assert!(NoSuchTutorial.tutorial_step("1", "1", "en").is_none());
    }

    #[test]
    fn test_null_objects_work_as_trait_objects() {
        let sources: Vec<Box<dyn CommandSource>> = vec![Box::new(NoSuchCommands)];
        assert!(sources[0].commands_for_level("3", "nl").is_empty());
    }
}
