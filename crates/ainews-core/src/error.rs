//! Unified error handling for ainews Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for ainews Core operations.
#[derive(Debug, Error, Clone)]
pub enum NewsError {
    /// Errors from the domain layer (template syntax, invalid sources).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (fetching, storage, filesystem).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl NewsError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in ainews".into(),
                "Please report this issue at: https://github.com/cosecruz/ainews/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::StoreLockError)
                | Self::Application(ApplicationError::FetchFailed { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Network,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type NewsResult<T> = Result<T, NewsError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> NewsResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> NewsResult<T> {
        self.map_err(|e| NewsError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failures_are_retryable() {
        let err: NewsError = ApplicationError::FetchFailed {
            source_name: "HN".into(),
            reason: "timeout".into(),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn template_syntax_is_validation() {
        let err: NewsError = DomainError::TemplateSyntax {
            line: 3,
            message: "unclosed {{#each}}".into(),
        }
        .into();
        assert!(!err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let parsed: Result<u32, std::num::ParseIntError> = "x".parse();
        let err = parsed.context("parsing limit").unwrap_err();
        assert!(matches!(err, NewsError::Internal { .. }));
        assert!(err.to_string().contains("parsing limit"));
    }
}
