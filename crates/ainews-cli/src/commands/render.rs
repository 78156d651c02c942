//! Implementation of the `ainews render` command.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use ainews_core::{
    domain::{RenderContext, RenderOptions, Template},
    error::NewsError,
};

use crate::{
    cli::RenderArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Render one template file to stdout.
#[instrument(skip_all, fields(template = %args.template.display(), strict = args.strict))]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let source = read_file(&args.template)?;
    let context = match &args.context {
        Some(path) => load_context(path)?,
        None => RenderContext::new(),
    };
    debug!(bindings = context.len(), "Context loaded");

    let template = if args.strict {
        Template::parse(&source).map_err(NewsError::from)?
    } else {
        Template::parse_lenient(&source)
    };

    let options = if args.legacy_truncate || config.site.legacy_truncate {
        RenderOptions::legacy()
    } else {
        RenderOptions::default()
    };

    output.data(&template.render_with(&context, options))?;
    Ok(())
}

fn read_file(path: &Path) -> CliResult<String> {
    if !path.is_file() {
        return Err(CliError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).with_cli_context(|| format!("Failed to read '{}'", path.display()))
}

/// Parse a JSON file into a render context. The document must be an object.
fn load_context(path: &Path) -> CliResult<RenderContext> {
    let raw = read_file(path)?;
    let json: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| CliError::InvalidInput {
            message: format!("'{}' is not valid JSON: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;
    Ok(RenderContext::try_from(json).map_err(NewsError::from)?)
}
