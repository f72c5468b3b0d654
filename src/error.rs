use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a content or keyword file.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("No {kind} content for language '{language}' ({})", .path.display())]
    Missing {
        kind: &'static str,
        language: String,
        path: PathBuf,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unexpected document shape in {}: {reason}", .path.display())]
    Shape { path: PathBuf, reason: String },
}

impl ContentError {
    /// True when the backing file simply does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, ContentError::Missing { .. })
    }
}
