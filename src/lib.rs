//! Localized lesson content for the Hedy site: locale discovery, keyword
//! vocabularies, and per-language content stores with keyword substitution.

pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod i18n;
pub mod research;
pub mod server;

pub use config::{CacheStrategy, Config};
pub use context::AppContext;
pub use error::ContentError;
