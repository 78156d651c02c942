//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A source could not be downloaded.
    #[error("Failed to fetch '{source_name}': {reason}")]
    FetchFailed { source_name: String, reason: String },

    /// A source was downloaded but its body could not be parsed.
    #[error("Failed to parse '{source_name}': {reason}")]
    ParseFailed { source_name: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A content file exists but is not a valid item list.
    #[error("Corrupt content file {path}: {reason}")]
    ContentCorrupt { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Store lock error")]
    StoreLockError,

    /// Items could not be serialized.
    #[error("Serialization failed: {reason}")]
    SerializationFailed { reason: String },

    /// A site template could not be loaded or parsed.
    #[error("Failed to load template '{name}': {reason}")]
    TemplateLoad { name: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FetchFailed { source_name, .. } => vec![
                format!("Could not reach source '{}'", source_name),
                "Check your network connection".into(),
                "Raise [collector] timeout_secs if the site is slow".into(),
            ],
            Self::ParseFailed { source_name, .. } => vec![
                format!("Source '{}' returned unexpected content", source_name),
                "Check that RSS sources point at a feed, not a web page".into(),
                "Scrape sources may need an updated CSS selector".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ContentCorrupt { path, .. } => vec![
                format!("Fix or remove {}", path.display()),
                "Content files hold a JSON array of news items".into(),
            ],
            Self::StoreLockError => vec![
                "The store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::TemplateLoad { name, .. } => vec![
                format!("Check the template file '{}'", name),
                "Remove it to fall back to the built-in template".into(),
            ],
            Self::SerializationFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FetchFailed { .. } => ErrorCategory::Network,
            Self::ParseFailed { .. } | Self::ContentCorrupt { .. } | Self::TemplateLoad { .. } => {
                ErrorCategory::Validation
            }
            Self::FilesystemError { .. }
            | Self::StoreLockError
            | Self::SerializationFailed { .. } => ErrorCategory::Internal,
        }
    }
}
