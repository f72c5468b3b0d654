//! Locale registry: the set of languages the site can be shown in.
//!
//! Built once at startup by scanning the compiled translation catalogs and
//! the keyword grammars, then shared read-only through the application
//! context.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use super::display::{title_case, DisplayNameResolver};

/// Codes the display-name resolver cannot handle. Their catalogs are
/// registered as English until the resolver learns them.
pub const NON_RESOLVABLE_LOCALES: &[&str] = &["tn"];

/// Languages rendered in a non-Latin script.
pub const NON_LATIN_LANGUAGES: &[&str] = &["ar", "bg", "bn", "el", "fa", "hi", "he", "ru", "zh_Hans"];

/// The language every store caches and every lookup falls back to.
pub const CANONICAL_LANGUAGE: &str = "en";

/// Metadata for one supported locale.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LocaleConfig {
    /// Directory code (e.g. "nl", "pt_BR", "zh_Hans")
    pub code: String,

    /// Title-cased native name (e.g. "Nederlands")
    pub display_name: String,

    /// Short vocabulary tag (e.g. "NL") when a keyword grammar exists
    pub keyword_tag: Option<String>,

    /// Whether the language is written in a non-Latin script
    pub non_latin: bool,
}

pub struct LocaleRegistry {
    locales: BTreeMap<String, LocaleConfig>,
}

impl LocaleRegistry {
    /// Scan `translations_dir` for compiled catalogs and `grammars_dir` for
    /// keyword grammars.
    ///
    /// Enumeration is best-effort: directories without catalogs are skipped
    /// and codes the resolver rejects are left out.
    pub fn scan(
        translations_dir: &Path,
        grammars_dir: &Path,
        resolver: &dyn DisplayNameResolver,
    ) -> Self {
        let mut names: BTreeMap<String, String> = BTreeMap::new();

        match std::fs::read_dir(translations_dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let Some(folder) = entry.file_name().to_str().map(str::to_string) else {
                        continue;
                    };
                    let code = if NON_RESOLVABLE_LOCALES.contains(&folder.as_str()) {
                        CANONICAL_LANGUAGE.to_string()
                    } else {
                        folder
                    };

                    let catalog_dir = translations_dir.join(&code).join("LC_MESSAGES");
                    if !catalog_dir.is_dir() {
                        continue;
                    }
                    if !has_compiled_catalog(&catalog_dir) {
                        debug!("Skipping locale {}: no compiled catalogs", code);
                        continue;
                    }

                    match resolver.resolve_display_name(&code) {
                        Ok(name) => {
                            names.insert(code, title_case(&name));
                        }
                        Err(e) => debug!("Skipping locale {}: {}", code, e),
                    }
                }
            }
            Err(e) => {
                debug!(
                    "Translations directory {} unavailable ({}), registering English only",
                    translations_dir.display(),
                    e
                );
                let mut locales = BTreeMap::new();
                locales.insert(
                    CANONICAL_LANGUAGE.to_string(),
                    LocaleConfig {
                        code: CANONICAL_LANGUAGE.to_string(),
                        display_name: "English".to_string(),
                        keyword_tag: Some(keyword_tag(CANONICAL_LANGUAGE)),
                        non_latin: false,
                    },
                );
                return Self { locales };
            }
        }

        let locales = names
            .into_iter()
            .map(|(code, display_name)| {
                let grammar = grammars_dir.join(format!("keywords-{}.lark", code));
                let config = LocaleConfig {
                    keyword_tag: grammar.exists().then(|| keyword_tag(&code)),
                    non_latin: NON_LATIN_LANGUAGES.contains(&code.as_str()),
                    display_name,
                    code: code.clone(),
                };
                (code, config)
            })
            .collect();

        Self { locales }
    }

    /// Build a registry from ready-made entries.
    pub fn from_locales(locales: impl IntoIterator<Item = LocaleConfig>) -> Self {
        Self {
            locales: locales
                .into_iter()
                .map(|locale| (locale.code.clone(), locale))
                .collect(),
        }
    }

    /// Get a locale by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.get(code)
    }

    /// All locales, sorted by code.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.values().collect()
    }

    /// Code → display name for every supported locale.
    pub fn list_supported_locales(&self) -> BTreeMap<String, String> {
        self.locales
            .values()
            .map(|l| (l.code.clone(), l.display_name.clone()))
            .collect()
    }

    /// Code → short tag for every locale with a keyword grammar.
    pub fn list_keyword_languages(&self) -> BTreeMap<String, String> {
        self.locales
            .values()
            .filter_map(|l| l.keyword_tag.clone().map(|tag| (l.code.clone(), tag)))
            .collect()
    }

    /// Check if a locale code was registered.
    pub fn is_supported(&self, code: &str) -> bool {
        self.locales.contains_key(code)
    }

    /// Check if a locale has a keyword grammar.
    pub fn is_keyword_language(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|l| l.keyword_tag.is_some())
            .unwrap_or(false)
    }

    /// Check if a locale is written in a non-Latin script.
    pub fn is_non_latin(&self, code: &str) -> bool {
        self.get_by_code(code).map(|l| l.non_latin).unwrap_or(false)
    }
}

/// First two characters, uppercased.
fn keyword_tag(code: &str) -> String {
    code.chars().take(2).collect::<String>().to_uppercase()
}

fn has_compiled_catalog(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .any(|e| e.path().extension().is_some_and(|ext| ext == "mo"))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::display::{LocaleError, NativeNameResolver};
    use std::fs;
    use tempfile::TempDir;

    fn add_catalog(root: &Path, code: &str) {
        let dir = root.join("translations").join(code).join("LC_MESSAGES");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("messages.mo"), b"").unwrap();
    }

    fn add_grammar(root: &Path, code: &str) {
        let dir = root.join("grammars");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("keywords-{}.lark", code)), "").unwrap();
    }

    fn scan(root: &Path) -> LocaleRegistry {
        LocaleRegistry::scan(
            &root.join("translations"),
            &root.join("grammars"),
            &NativeNameResolver,
        )
    }

    #[test]
    fn test_scan_registers_locales_with_catalogs() {
        let tmp = TempDir::new().unwrap();
        add_catalog(tmp.path(), "en");
        add_catalog(tmp.path(), "nl");
        add_catalog(tmp.path(), "es");

        let registry = scan(tmp.path());
        let locales = registry.list_supported_locales();

        assert_eq!(locales.len(), 3);
        assert_eq!(locales["nl"], "Nederlands");
        assert_eq!(locales["es"], "Español");
        assert_eq!(locales["en"], "English");
    }

    #[test]
    fn test_scan_skips_directories_without_catalogs() {
        let tmp = TempDir::new().unwrap();
        add_catalog(tmp.path(), "en");
        // No LC_MESSAGES at all
        fs::create_dir_all(tmp.path().join("translations/fr")).unwrap();
        // LC_MESSAGES with only a source catalog
        let de = tmp.path().join("translations/de/LC_MESSAGES");
        fs::create_dir_all(&de).unwrap();
        fs::write(de.join("messages.po"), "").unwrap();

        let registry = scan(tmp.path());
        assert!(registry.is_supported("en"));
        assert!(!registry.is_supported("fr"));
        assert!(!registry.is_supported("de"));
    }

    #[test]
    fn test_scan_excludes_unresolvable_codes() {
        let tmp = TempDir::new().unwrap();
        add_catalog(tmp.path(), "en");
        add_catalog(tmp.path(), "qq");

        let registry = scan(tmp.path());
        assert!(registry.is_supported("en"));
        assert!(!registry.is_supported("qq"));
    }

    #[test]
    fn test_non_resolvable_locale_maps_to_english() {
        let tmp = TempDir::new().unwrap();
        add_catalog(tmp.path(), "en");
        add_catalog(tmp.path(), "tn");

        let registry = scan(tmp.path());
        assert_eq!(registry.list_all().len(), 1);
        assert!(!registry.is_supported("tn"));
        assert!(registry.is_supported("en"));
    }

    #[test]
    fn test_keyword_languages_need_a_grammar() {
        let tmp = TempDir::new().unwrap();
        for code in ["en", "nl", "zh_Hans", "de"] {
            add_catalog(tmp.path(), code);
        }
        for code in ["en", "nl", "zh_Hans"] {
            add_grammar(tmp.path(), code);
        }

        let registry = scan(tmp.path());
        let keyword_languages = registry.list_keyword_languages();

        assert_eq!(keyword_languages.len(), 3);
        assert_eq!(keyword_languages["en"], "EN");
        assert_eq!(keyword_languages["nl"], "NL");
        assert_eq!(keyword_languages["zh_Hans"], "ZH");
        assert!(!registry.is_keyword_language("de"));
        assert!(registry.is_supported("de"));
    }

    #[test]
    fn test_non_latin_flag() {
        let tmp = TempDir::new().unwrap();
        add_catalog(tmp.path(), "ar");
        add_catalog(tmp.path(), "nl");

        let registry = scan(tmp.path());
        assert!(registry.is_non_latin("ar"));
        assert!(!registry.is_non_latin("nl"));
        assert!(!registry.is_non_latin("missing"));
    }

    #[test]
    fn test_missing_translations_dir_registers_english() {
        let tmp = TempDir::new().unwrap();
        let registry = scan(tmp.path());

        assert_eq!(registry.list_supported_locales().len(), 1);
        assert_eq!(registry.list_supported_locales()["en"], "English");
        assert_eq!(registry.list_keyword_languages()["en"], "EN");
    }

    #[test]
    fn test_custom_resolver_failures_are_silent() {
        struct OnlyEnglish;
        impl DisplayNameResolver for OnlyEnglish {
            fn resolve_display_name(&self, code: &str) -> Result<String, LocaleError> {
                match code {
                    "en" => Ok("english".to_string()),
                    other => Err(LocaleError::UnknownLanguage(other.to_string())),
                }
            }
        }

        let tmp = TempDir::new().unwrap();
        add_catalog(tmp.path(), "en");
        add_catalog(tmp.path(), "nl");

        let registry = LocaleRegistry::scan(
            &tmp.path().join("translations"),
            &tmp.path().join("grammars"),
            &OnlyEnglish,
        );
        assert_eq!(registry.list_supported_locales()["en"], "English");
        assert!(!registry.is_supported("nl"));
    }

    #[test]
    fn test_from_locales() {
        let registry = LocaleRegistry::from_locales(vec![LocaleConfig {
            code: "nl".to_string(),
            display_name: "Nederlands".to_string(),
            keyword_tag: Some("NL".to_string()),
            non_latin: false,
        }]);
        assert!(registry.is_keyword_language("nl"));
        assert_eq!(registry.get_by_code("nl").unwrap().display_name, "Nederlands");
        assert!(registry.get_by_code("en").is_none());
    }

    #[test]
    fn test_keyword_tag() {
        assert_eq!(keyword_tag("pt_BR"), "PT");
        assert_eq!(keyword_tag("en"), "EN");
    }
}
