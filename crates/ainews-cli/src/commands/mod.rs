//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments and config into adapters and core services,
//! then report results through the [`OutputManager`](crate::output::OutputManager).
//! No business logic lives here.

pub mod collect;
pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod render;
pub mod sources;

use chrono::Utc;

use ainews_core::{
    domain::{DAY_FORMAT, validate_day},
    error::NewsError,
};

use crate::error::CliResult;

/// `--date` when given (validated), else today's UTC day key.
pub fn resolve_day(date: Option<&str>) -> CliResult<String> {
    match date {
        Some(day) => {
            validate_day(day).map_err(NewsError::from)?;
            Ok(day.to_owned())
        }
        None => Ok(Utc::now().format(DAY_FORMAT).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn explicit_day_is_kept() {
        assert_eq!(resolve_day(Some("2024-01-05")).unwrap(), "2024-01-05");
    }

    #[test]
    fn malformed_day_is_a_user_error() {
        let err = resolve_day(Some("05/01/2024")).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn today_is_a_valid_day_key() {
        let today = resolve_day(None).unwrap();
        assert!(validate_day(&today).is_ok());
    }
}
