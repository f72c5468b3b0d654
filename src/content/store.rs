//! The per-language content cache shared by every content kind.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde_yaml::{Mapping, Value};
use tracing::{debug, error};

use super::metrics::CacheMetrics;
use super::substitute::{entry_count, lookup, SubstitutedContent, Substituter};
use crate::config::CacheStrategy;
use crate::error::ContentError;
use crate::i18n::{KeywordMap, KeywordTable, CANONICAL_LANGUAGE};

/// What differs between commands, adventures, quizzes, and the rest: where
/// the files live, which part of the file is cached, and which fields get
/// keywords substituted.
pub trait ContentKind: Send + Sync + 'static {
    /// Directory under the content root, also used in error messages.
    const DIRECTORY: &'static str;

    /// Top-level key holding the levels, or `None` for the whole document.
    const ROOT_KEY: Option<&'static str> = None;

    /// Narrow a parsed file to the mapping the store caches.
    fn select(document: Value) -> Result<Mapping, String> {
        let root = match Self::ROOT_KEY {
            Some(key) => match document {
                Value::Mapping(mut mapping) => mapping.remove(key).unwrap_or(Value::Null),
                Value::Null => Value::Null,
                _ => return Err("expected a mapping at the top level".to_string()),
            },
            None => document,
        };
        match root {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(Mapping::new()),
            _ => Err(match Self::ROOT_KEY {
                Some(key) => format!("expected '{}' to be a mapping", key),
                None => "expected a mapping at the top level".to_string(),
            }),
        }
    }

    /// Adjust the raw document once, right after loading.
    fn prepare(raw: Mapping) -> Mapping {
        raw
    }

    /// Build the substituted document from the raw one.
    fn substitute(raw: &Mapping, substituter: &mut Substituter<'_>) -> Mapping;
}

/// Lazily loaded, keyword-substituted content for one content language.
pub struct ContentStore<K: ContentKind> {
    language: String,
    path: PathBuf,
    strategy: CacheStrategy,
    keywords: Arc<KeywordTable>,
    raw: RwLock<Option<Arc<Mapping>>>,
    cache: RwLock<HashMap<String, Arc<SubstitutedContent>>>,
    metrics: CacheMetrics,
    _kind: PhantomData<K>,
}

impl<K: ContentKind> ContentStore<K> {
    /// Open the store for `language`.
    ///
    /// Fails with [`ContentError::Missing`] when there is no file for the
    /// language. With [`CacheStrategy::EagerPreload`] the English and
    /// own-language substitutions are computed here.
    pub fn open(
        language: &str,
        content_dir: &Path,
        strategy: CacheStrategy,
        keywords: Arc<KeywordTable>,
    ) -> Result<Self, ContentError> {
        let path = content_dir
            .join(K::DIRECTORY)
            .join(format!("{}.yaml", language));

        if !path.is_file() {
            return Err(ContentError::Missing {
                kind: K::DIRECTORY,
                language: language.to_string(),
                path,
            });
        }

        let store = Self {
            language: language.to_string(),
            path,
            strategy,
            keywords,
            raw: RwLock::new(None),
            cache: RwLock::new(HashMap::new()),
            metrics: CacheMetrics::new(),
            _kind: PhantomData,
        };

        if strategy == CacheStrategy::EagerPreload {
            store.get_substituted(CANONICAL_LANGUAGE)?;
            if language != CANONICAL_LANGUAGE && store.keywords.has_language(language) {
                store.get_substituted(language)?;
            }
        }

        Ok(store)
    }

    /// Counters for this store's cache.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// The raw document, loaded on first call.
    pub fn get_raw(&self) -> Result<Arc<Mapping>, ContentError> {
        if let Some(raw) = self.raw.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(raw));
        }
        self.reload_raw()
    }

    /// The document with placeholders resolved for `keyword_language`.
    ///
    /// Only keyword languages with a keyword table are cached. Any other
    /// language is substituted against an empty table on every call and
    /// never stored.
    pub fn get_substituted(
        &self,
        keyword_language: &str,
    ) -> Result<Arc<SubstitutedContent>, ContentError> {
        if let Some(cached) = self.cached(keyword_language) {
            self.metrics.record_cache_hit();
            return Ok(cached);
        }
        self.metrics.record_cache_miss();

        let raw = match self.strategy {
            CacheStrategy::EagerPreload => self.get_raw()?,
            CacheStrategy::LazyOnMiss => self.reload_raw()?,
        };

        let empty = KeywordMap::new();
        let known = self.keywords.for_language(keyword_language);
        let keywords = known.unwrap_or_else(|| {
            debug!("No keyword table for {}, placeholders stay unresolved", keyword_language);
            &empty
        });

        let mut substituter = Substituter::new(keywords, keyword_language);
        let document = K::substitute(&raw, &mut substituter);
        let substituted = Arc::new(substituter.finish(document));
        self.metrics.record_substitution(substituted.issues.len());

        if known.is_none() {
            return Ok(substituted);
        }
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(keyword_language.to_string(), Arc::clone(&substituted));

        Ok(substituted)
    }

    /// Like [`get_substituted`](Self::get_substituted), but logs failures and
    /// returns `None`.
    pub fn substituted_or_log(&self, keyword_language: &str) -> Option<Arc<SubstitutedContent>> {
        match self.get_substituted(keyword_language) {
            Ok(content) => Some(content),
            Err(e) => {
                error!("Failed to load {} for {}: {}", K::DIRECTORY, self.language, e);
                None
            }
        }
    }

    /// Whether the English substitution has any entries.
    pub fn has_content(&self) -> bool {
        self.substituted_or_log(CANONICAL_LANGUAGE)
            .map(|c| !c.is_empty())
            .unwrap_or(false)
    }

    /// Number of items at `level` in the English substitution.
    pub fn count_at_level(&self, level: &str) -> usize {
        self.substituted_or_log(CANONICAL_LANGUAGE)
            .map(|c| entry_count(c.level(level)))
            .unwrap_or(0)
    }

    /// The substituted entry for `level`.
    pub fn level(&self, level: &str, keyword_language: &str) -> Option<Value> {
        self.substituted_or_log(keyword_language)
            .and_then(|c| c.level(level).cloned())
    }

    /// The substituted item `key` inside `level`. Sequence levels are indexed
    /// by position.
    pub fn item(&self, level: &str, key: &str, keyword_language: &str) -> Option<Value> {
        let content = self.substituted_or_log(keyword_language)?;
        match content.level(level)? {
            Value::Mapping(items) => lookup(items, key).cloned(),
            Value::Sequence(items) => key
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i).cloned()),
            _ => None,
        }
    }

    fn cached(&self, keyword_language: &str) -> Option<Arc<SubstitutedContent>> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        let entry = cache.get(keyword_language)?;
        // Lazy stores treat an empty result as a miss so a fixed file is picked up
        if self.strategy == CacheStrategy::LazyOnMiss && entry.is_empty() {
            return None;
        }
        Some(Arc::clone(entry))
    }

    fn reload_raw(&self) -> Result<Arc<Mapping>, ContentError> {
        let raw = Arc::new(self.read_file()?);
        *self.raw.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&raw));
        Ok(raw)
    }

    fn read_file(&self) -> Result<Mapping, ContentError> {
        let source = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ContentError::Missing {
                    kind: K::DIRECTORY,
                    language: self.language.clone(),
                    path: self.path.clone(),
                }
            } else {
                ContentError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        self.metrics.record_disk_load();
        debug!("Loaded {}", self.path.display());

        let document: Value = serde_yaml::from_str(&source).map_err(|source| ContentError::Yaml {
            path: self.path.clone(),
            source,
        })?;
        let selected = K::select(document).map_err(|reason| ContentError::Shape {
            path: self.path.clone(),
            reason,
        })?;

        Ok(K::prepare(selected))
    }
}
