//! Display names for locale codes.
//!
//! Locale directories are named with POSIX-style codes (`nl`, `pt_BR`,
//! `zh_Hans`). The registry shows each one by its native name, the way the
//! language selector on the website lists them.

use thiserror::Error;
use unic_langid::LanguageIdentifier;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Cannot parse locale code '{0}'")]
    Unparsable(String),

    #[error("No display name known for language '{0}'")]
    UnknownLanguage(String),
}

/// Resolves a locale code to a human-readable name.
pub trait DisplayNameResolver: Send + Sync {
    fn resolve_display_name(&self, code: &str) -> Result<String, LocaleError>;
}

/// Native names for the languages the platform ships catalogs for.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ar", "العربية"),
    ("bg", "български"),
    ("bn", "বাংলা"),
    ("ca", "català"),
    ("cs", "čeština"),
    ("cy", "Cymraeg"),
    ("da", "dansk"),
    ("de", "Deutsch"),
    ("el", "Ελληνικά"),
    ("en", "English"),
    ("eo", "esperanto"),
    ("es", "español"),
    ("et", "eesti"),
    ("fa", "فارسی"),
    ("fi", "suomi"),
    ("fr", "français"),
    ("fy", "Frysk"),
    ("he", "עברית"),
    ("hi", "हिन्दी"),
    ("hu", "magyar"),
    ("id", "Indonesia"),
    ("it", "italiano"),
    ("ja", "日本語"),
    ("kmr", "kurmancî"),
    ("ko", "한국어"),
    ("mi", "Māori"),
    ("nb", "norsk bokmål"),
    ("nl", "Nederlands"),
    ("pa", "ਪੰਜਾਬੀ"),
    ("pap", "Papiamentu"),
    ("pl", "polski"),
    ("pt", "português"),
    ("ro", "română"),
    ("ru", "русский"),
    ("sq", "shqip"),
    ("sr", "српски"),
    ("sv", "svenska"),
    ("sw", "Kiswahili"),
    ("te", "తెలుగు"),
    ("th", "ไทย"),
    ("tl", "Tagalog"),
    ("tr", "Türkçe"),
    ("uk", "українська"),
    ("ur", "اردو"),
    ("vi", "Tiếng Việt"),
    ("zh", "中文"),
];

/// Script- and region-qualified names, keyed by normalized BCP 47 tag.
const QUALIFIED_NAMES: &[(&str, &str)] = &[
    ("nb-NO", "norsk bokmål (Norge)"),
    ("pa-PK", "پنجابی (پاکستان)"),
    ("pt-BR", "português (Brasil)"),
    ("pt-PT", "português (Portugal)"),
    ("zh-Hans", "中文 (简体)"),
    ("zh-Hant", "中文 (繁體)"),
];

/// Built-in resolver backed by static name tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeNameResolver;

impl DisplayNameResolver for NativeNameResolver {
    fn resolve_display_name(&self, code: &str) -> Result<String, LocaleError> {
        let langid: LanguageIdentifier = code
            .parse()
            .map_err(|_| LocaleError::Unparsable(code.to_string()))?;

        let tag = langid.to_string();
        if let Some((_, name)) = QUALIFIED_NAMES.iter().find(|(t, _)| *t == tag) {
            return Ok((*name).to_string());
        }

        let language = langid.language.as_str();
        let base = LANGUAGE_NAMES
            .iter()
            .find(|(c, _)| *c == language)
            .map(|(_, name)| *name)
            .ok_or_else(|| LocaleError::UnknownLanguage(code.to_string()))?;

        let qualifier = langid
            .script
            .map(|s| s.as_str().to_string())
            .or_else(|| langid.region.map(|r| r.as_str().to_string()));

        Ok(match qualifier {
            Some(q) => format!("{} ({})", base, q),
            None => base.to_string(),
        })
    }
}

/// Title-case a display name: a cased letter is uppercased when it follows
/// an uncased character and lowercased otherwise.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut previous_cased = false;

    for c in name.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && !previous_cased {
            out.extend(c.to_uppercase());
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }

    out
}
