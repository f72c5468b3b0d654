//! Localized lesson content.
//!
//! Every content kind (commands, adventures, Parsons problems, quizzes,
//! tutorials) is a [`ContentStore`] over one YAML file per content language.
//! A store loads its file once, then builds and caches one keyword-substituted
//! copy per keyword language on first request.
//!
//! Languages without a file for a kind get the matching `NoSuch*` stand-in,
//! which answers every lookup with an empty result.

mod adventures;
mod commands;
mod metrics;
mod null;
mod parsons;
mod placeholder;
mod quizzes;
mod store;
mod substitute;
mod tutorials;

pub use adventures::{
    order_adventures, AdventureKind, AdventureSource, AdventureSummary, Adventures, ADVENTURE_ORDER,
};
pub use commands::{CommandKind, CommandSource, Commands};
pub use metrics::{CacheMetrics, MetricsReport};
pub use null::{NoSuchAdventures, NoSuchCommands, NoSuchParsons, NoSuchQuiz, NoSuchTutorial};
pub use parsons::{ParsonsKind, ParsonsProblems, ParsonsSource};
pub use placeholder::{format_placeholders, PlaceholderError};
pub use quizzes::{QuizKind, QuizSource, Quizzes};
pub use store::{ContentKind, ContentStore};
pub use substitute::{
    entry_count, key_to_string, lookup, PlaceholderIssue, SubstitutedContent, Substituter,
};
pub use tutorials::{TutorialKind, TutorialSource, Tutorials};
