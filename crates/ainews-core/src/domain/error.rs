// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Template syntax error at line {line}: {message}")]
    TemplateSyntax { line: usize, message: String },

    #[error("Invalid feed source '{name}': {reason}")]
    InvalidSource { name: String, reason: String },

    #[error("Invalid render context: {0}")]
    InvalidContext(String),

    #[error("Keyword list is empty")]
    EmptyKeywords,

    #[error("Invalid day '{0}': expected YYYY-MM-DD")]
    InvalidDay(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateSyntax { line, .. } => vec![
                format!("Check the template markers around line {}", line),
                "Every {{#each}} needs a {{/each}} and every {{#if}} a {{/if}}".into(),
                "Try: ainews render <template> --context ctx.json --strict".into(),
            ],
            Self::InvalidSource { name, reason } => vec![
                format!("Source '{}' is misconfigured: {}", name, reason),
                "Scrape sources need a CSS selector and a base URL".into(),
                "Try: ainews sources to inspect the configured list".into(),
            ],
            Self::InvalidContext(msg) => vec![
                "The render context must be a JSON object".into(),
                format!("Details: {}", msg),
            ],
            Self::EmptyKeywords => vec![
                "Configure at least one keyword under [collector] keywords".into(),
            ],
            Self::InvalidDay(day) => vec![
                format!("'{}' is not a calendar date", day),
                "Use the form 2024-01-05".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateSyntax { .. }
            | Self::InvalidSource { .. }
            | Self::InvalidContext(_)
            | Self::EmptyKeywords
            | Self::InvalidDay(_) => ErrorCategory::Validation,
        }
    }
}
