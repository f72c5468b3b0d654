use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// How content stores populate their substitution caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStrategy {
    /// Load and substitute English plus the store's own language at
    /// construction; never touch disk again.
    EagerPreload,
    /// Load nothing up front and re-read the file on every cache miss, so
    /// content edits show up without a restart.
    LazyOnMiss,
}

impl FromStr for CacheStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" | "eager-preload" => Ok(CacheStrategy::EagerPreload),
            "lazy" | "lazy-on-miss" => Ok(CacheStrategy::LazyOnMiss),
            other => bail!("Unknown cache strategy '{}'. Expected 'eager' or 'lazy'", other),
        }
    }
}

impl fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheStrategy::EagerPreload => write!(f, "eager-preload"),
            CacheStrategy::LazyOnMiss => write!(f, "lazy-on-miss"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Directories
    pub content_dir: PathBuf,
    pub translations_dir: PathBuf,
    pub grammars_dir: PathBuf,

    // Caching
    pub cache_strategy: CacheStrategy,

    /// Keyword language forced onto every quiz lookup. `None` honours the
    /// caller's keyword language.
    pub quiz_keyword_language: Option<String>,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let cache_strategy = match std::env::var("CACHE_STRATEGY") {
            Ok(value) => value.parse().context("Invalid CACHE_STRATEGY")?,
            // Legacy toggle: production deployments set NO_DEBUG_MODE
            Err(_) if std::env::var("NO_DEBUG_MODE").is_ok() => CacheStrategy::EagerPreload,
            Err(_) => CacheStrategy::LazyOnMiss,
        };

        let quiz_keyword_language = match std::env::var("QUIZ_KEYWORD_LANGUAGE") {
            Ok(value) if value.trim().eq_ignore_ascii_case("request") => None,
            Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => Some("en".to_string()),
        };

        Ok(Self {
            content_dir: env_path("CONTENT_DIR", "content"),
            translations_dir: env_path("TRANSLATIONS_DIR", "translations"),
            grammars_dir: env_path("GRAMMARS_DIR", "grammars"),

            cache_strategy,
            quiz_keyword_language,

            port: match std::env::var("PORT") {
                Ok(value) => value
                    .parse()
                    .with_context(|| format!("Invalid PORT '{}'", value))?,
                Err(_) => 8080,
            },
        })
    }

    /// Config rooted at `base`, with the default directory names beneath it.
    pub fn rooted_at(base: impl Into<PathBuf>, cache_strategy: CacheStrategy) -> Self {
        let base = base.into();
        Self {
            content_dir: base.join("content"),
            translations_dir: base.join("translations"),
            grammars_dir: base.join("grammars"),
            cache_strategy,
            quiz_keyword_language: Some("en".to_string()),
            port: 8080,
        }
    }

    pub fn keywords_dir(&self) -> PathBuf {
        self.content_dir.join("keywords")
    }

    pub fn research_dir(&self) -> PathBuf {
        self.content_dir.join("research")
    }
}

fn env_path(name: &str, default: &str) -> PathBuf {
    std::env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "CONTENT_DIR",
        "TRANSLATIONS_DIR",
        "GRAMMARS_DIR",
        "CACHE_STRATEGY",
        "NO_DEBUG_MODE",
        "QUIZ_KEYWORD_LANGUAGE",
        "PORT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().expect("defaults should load");

        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.translations_dir, PathBuf::from("translations"));
        assert_eq!(config.grammars_dir, PathBuf::from("grammars"));
        assert_eq!(config.cache_strategy, CacheStrategy::LazyOnMiss);
        assert_eq!(config.quiz_keyword_language.as_deref(), Some("en"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    #[serial]
    fn test_no_debug_mode_selects_eager() {
        clear_env();
        std::env::set_var("NO_DEBUG_MODE", "1");
        let config = Config::from_env().unwrap();
        assert_eq!(config.cache_strategy, CacheStrategy::EagerPreload);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_explicit_strategy_wins_over_legacy_toggle() {
        clear_env();
        std::env::set_var("NO_DEBUG_MODE", "1");
        std::env::set_var("CACHE_STRATEGY", "lazy");
        let config = Config::from_env().unwrap();
        assert_eq!(config.cache_strategy, CacheStrategy::LazyOnMiss);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_strategy_is_an_error() {
        clear_env();
        std::env::set_var("CACHE_STRATEGY", "sometimes");
        let result = Config::from_env();
        assert!(result.is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_quiz_keyword_language_request_disables_override() {
        clear_env();
        std::env::set_var("QUIZ_KEYWORD_LANGUAGE", "request");
        let config = Config::from_env().unwrap();
        assert_eq!(config.quiz_keyword_language, None);

        std::env::set_var("QUIZ_KEYWORD_LANGUAGE", "nl");
        let config = Config::from_env().unwrap();
        assert_eq!(config.quiz_keyword_language.as_deref(), Some("nl"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_an_error() {
        clear_env();
        std::env::set_var("PORT", "eighty");
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_cache_strategy_parse_and_display() {
        assert_eq!(
            "eager".parse::<CacheStrategy>().unwrap(),
            CacheStrategy::EagerPreload
        );
        assert_eq!(
            "Lazy-On-Miss".parse::<CacheStrategy>().unwrap(),
            CacheStrategy::LazyOnMiss
        );
        assert_eq!(CacheStrategy::EagerPreload.to_string(), "eager-preload");
    }

    #[test]
    fn test_rooted_at_joins_directories() {
        let config = Config::rooted_at("/srv/hedy", CacheStrategy::EagerPreload);
        assert_eq!(config.content_dir, PathBuf::from("/srv/hedy/content"));
        assert_eq!(config.keywords_dir(), PathBuf::from("/srv/hedy/content/keywords"));
        assert_eq!(config.research_dir(), PathBuf::from("/srv/hedy/content/research"));
    }
}
