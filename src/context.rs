//! Application state shared by every request.
//!
//! Built once at startup in a fixed order: locale registry, keyword table,
//! then one store per (kind, supported language), then the research index.
//! Nothing here changes after [`AppContext::build`] returns.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::content::{
    AdventureSource, Adventures, CommandSource, Commands, MetricsReport, NoSuchAdventures,
    NoSuchCommands, NoSuchParsons, NoSuchQuiz, NoSuchTutorial, ParsonsProblems, ParsonsSource,
    QuizSource, Quizzes, TutorialSource, Tutorials,
};
use crate::error::ContentError;
use crate::i18n::{DisplayNameResolver, KeywordTable, LocaleRegistry, NativeNameResolver};
use crate::research::list_research_papers;

/// One source per content language for a single content kind.
struct Shelf<S: ?Sized> {
    sources: HashMap<String, Arc<S>>,
    missing: Arc<S>,
}

impl<S: ?Sized> Shelf<S> {
    fn new(missing: Arc<S>) -> Self {
        Self {
            sources: HashMap::new(),
            missing,
        }
    }

    /// Store `opened` for `language`, or remember that the language has no
    /// file for this kind. Other errors abort startup.
    fn insert(
        &mut self,
        kind: &str,
        language: &str,
        opened: Result<Arc<S>, ContentError>,
    ) -> Result<()> {
        match opened {
            Ok(source) => {
                self.sources.insert(language.to_string(), source);
                Ok(())
            }
            Err(e) if e.is_missing() => {
                debug!("No {} for {}, using empty stand-in", kind, language);
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to load {} for {}", kind, language)),
        }
    }

    fn get(&self, language: &str) -> Arc<S> {
        self.sources
            .get(language)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.missing))
    }

    fn len(&self) -> usize {
        self.sources.len()
    }
}

pub struct AppContext {
    pub config: Config,
    pub registry: LocaleRegistry,
    pub keywords: Arc<KeywordTable>,
    pub research: BTreeMap<String, String>,
    commands: Shelf<dyn CommandSource>,
    adventures: Shelf<dyn AdventureSource>,
    parsons: Shelf<dyn ParsonsSource>,
    quizzes: Shelf<dyn QuizSource>,
    tutorials: Shelf<dyn TutorialSource>,
}

impl AppContext {
    /// Build the context with the built-in display-name resolver.
    pub fn build(config: Config) -> Result<Self> {
        Self::build_with_resolver(config, &NativeNameResolver)
    }

    pub fn build_with_resolver(config: Config, resolver: &dyn DisplayNameResolver) -> Result<Self> {
        let registry = LocaleRegistry::scan(&config.translations_dir, &config.grammars_dir, resolver);
        info!(
            "Registered {} locales ({} with keywords)",
            registry.list_all().len(),
            registry.list_keyword_languages().len()
        );

        let keyword_languages = registry.list_keyword_languages();
        let keywords = Arc::new(
            KeywordTable::load(&config.keywords_dir(), keyword_languages.keys().map(String::as_str))
                .context("Failed to load keyword tables")?,
        );

        let dir = config.content_dir.as_path();
        let strategy = config.cache_strategy;

        let mut commands = Shelf::<dyn CommandSource>::new(Arc::new(NoSuchCommands));
        let mut adventures = Shelf::<dyn AdventureSource>::new(Arc::new(NoSuchAdventures));
        let mut parsons = Shelf::<dyn ParsonsSource>::new(Arc::new(NoSuchParsons));
        let mut quizzes = Shelf::<dyn QuizSource>::new(Arc::new(NoSuchQuiz));
        let mut tutorials = Shelf::<dyn TutorialSource>::new(Arc::new(NoSuchTutorial));

        for locale in registry.list_all() {
            let lang = locale.code.as_str();
            let kw = Arc::clone(&keywords);

            commands.insert(
                "commands",
                lang,
                Commands::open(lang, dir, strategy, Arc::clone(&kw))
                    .map(|s| Arc::new(s) as Arc<dyn CommandSource>),
            )?;
            adventures.insert(
                "adventures",
                lang,
                Adventures::open(lang, dir, strategy, Arc::clone(&kw))
                    .map(|s| Arc::new(s) as Arc<dyn AdventureSource>),
            )?;
            parsons.insert(
                "parsons",
                lang,
                ParsonsProblems::open(lang, dir, strategy, Arc::clone(&kw))
                    .map(|s| Arc::new(s) as Arc<dyn ParsonsSource>),
            )?;
            quizzes.insert(
                "quizzes",
                lang,
                Quizzes::open(lang, dir, strategy, Arc::clone(&kw), config.quiz_keyword_language.clone())
                    .map(|s| Arc::new(s) as Arc<dyn QuizSource>),
            )?;
            tutorials.insert(
                "tutorials",
                lang,
                Tutorials::open(lang, dir, strategy, kw).map(|s| Arc::new(s) as Arc<dyn TutorialSource>),
            )?;
        }

        info!(
            "Content ready ({}): {} commands, {} adventures, {} parsons, {} quizzes, {} tutorials",
            strategy,
            commands.len(),
            adventures.len(),
            parsons.len(),
            quizzes.len(),
            tutorials.len()
        );

        let research = list_research_papers(&config.research_dir());

        Ok(Self {
            config,
            registry,
            keywords,
            research,
            commands,
            adventures,
            parsons,
            quizzes,
            tutorials,
        })
    }

    pub fn commands(&self, language: &str) -> Arc<dyn CommandSource> {
        self.commands.get(language)
    }

    pub fn adventures(&self, language: &str) -> Arc<dyn AdventureSource> {
        self.adventures.get(language)
    }

    pub fn parsons(&self, language: &str) -> Arc<dyn ParsonsSource> {
        self.parsons.get(language)
    }

    pub fn quizzes(&self, language: &str) -> Arc<dyn QuizSource> {
        self.quizzes.get(language)
    }

    pub fn tutorials(&self, language: &str) -> Arc<dyn TutorialSource> {
        self.tutorials.get(language)
    }

    /// Cache counters summed over every store.
    pub fn cache_report(&self) -> MetricsReport {
        let mut report = MetricsReport::default();
        for source in self.commands.sources.values() {
            report.merge(&source.cache_report());
        }
        for source in self.adventures.sources.values() {
            report.merge(&source.cache_report());
        }
        for source in self.parsons.sources.values() {
            report.merge(&source.cache_report());
        }
        for source in self.quizzes.sources.values() {
            report.merge(&source.cache_report());
        }
        for source in self.tutorials.sources.values() {
            report.merge(&source.cache_report());
        }
        report
    }
}
