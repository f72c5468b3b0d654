//! Languages and keyword vocabularies.
//!
//! # Architecture
//!
//! - `registry`: the locales the site supports and which of them have a
//!   keyword vocabulary
//! - `display`: native display names for locale codes
//! - `keywords`: placeholder → keyword tables, one per keyword language
//!
//! Both tables are built once by [`crate::context::AppContext`] before any
//! content store is opened, and never change afterward.

mod display;
mod keywords;
mod registry;

pub use display::{title_case, DisplayNameResolver, LocaleError, NativeNameResolver};
pub use keywords::{resolve_alternatives, KeywordMap, KeywordTable};
pub use registry::{
    LocaleConfig, LocaleRegistry, CANONICAL_LANGUAGE, NON_LATIN_LANGUAGES,
    NON_RESOLVABLE_LOCALES,
};
