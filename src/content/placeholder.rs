//! `{name}` placeholder formatting.
//!
//! Lesson text uses brace placeholders for keywords: `{print} Hello` becomes
//! `print Hello` in English and `drucke Hello` in German. `{{` and `}}`
//! produce literal braces.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("empty placeholder")]
    EmptyPlaceholder,

    #[error("malformed placeholder: {0}")]
    MalformedPlaceholder(String),

    #[error("unknown placeholder '{0}'")]
    UnknownPlaceholder(String),
}

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
static NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    // Alternation order matters: escapes win over fields, fields over stray braces.
    TOKEN_REGEX.get_or_init(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|\{|\}").unwrap())
}

fn name_regex() -> &'static Regex {
    NAME_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
}

/// Replace every placeholder in `template` with its value from `keywords`.
///
/// Fails on the first problem found; the caller decides what to keep.
pub fn format_placeholders(
    template: &str,
    keywords: &HashMap<String, String>,
) -> Result<String, PlaceholderError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in token_regex().captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        match (whole.as_str(), caps.get(1)) {
            ("{{", _) => out.push('{'),
            ("}}", _) => out.push('}'),
            (_, Some(field)) => out.push_str(resolve_field(field.as_str(), keywords)?),
            (stray, None) => {
                return Err(PlaceholderError::MalformedPlaceholder(format!(
                    "single '{}' at byte {}",
                    stray,
                    whole.start()
                )))
            }
        }
    }

    out.push_str(&template[last..]);
    Ok(out)
}

fn resolve_field<'a>(
    field: &str,
    keywords: &'a HashMap<String, String>,
) -> Result<&'a str, PlaceholderError> {
    let name = field.trim();
    if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
        // `{}` and `{0}` ask for positional arguments, which lesson text never supplies
        return Err(PlaceholderError::EmptyPlaceholder);
    }
    if name != field || !name_regex().is_match(name) {
        return Err(PlaceholderError::MalformedPlaceholder(format!("{{{}}}", field)));
    }

    keywords
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| PlaceholderError::UnknownPlaceholder(name.to_string()))
}
