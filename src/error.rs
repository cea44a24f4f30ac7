//! Error types shared by the loading, sync and switching layers.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while preparing or switching translation tables.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Storage location could not be read or written.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A language file is not a flat key/value JSON document.
    #[error("Failed to parse translation file '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A switch was requested to a language that is not loaded.
    #[error("Language not found: {0}")]
    UnknownLanguage(String),

    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl I18nError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub(crate) fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse { path: path.to_path_buf(), message: message.into() }
    }

    /// File the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => Some(path),
            _ => None,
        }
    }
}
