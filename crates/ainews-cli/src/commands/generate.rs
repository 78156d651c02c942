//! Implementation of the `ainews generate` command.
//!
//! Responsibility: resolve directories from flags and config, load the
//! templates, confirm the output wipe, call the site service and display
//! results.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use ainews_adapters::{
    JsonContentStore, LocalFilesystem, TemplateLoader,
    builtin_templates::STYLE_CSS,
    template_loader::{LoadedTemplates, TemplateOrigin},
};
use ainews_core::{
    application::{SiteOptions, SiteReport, SiteService},
    domain::{RenderOptions, SiteLayout},
};

use crate::{
    cli::{GenerateArgs, GlobalArgs, OutputFormat},
    commands::resolve_day,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Directories a generation run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SitePaths {
    output: PathBuf,
    content: PathBuf,
    templates: Option<PathBuf>,
    static_dir: Option<PathBuf>,
}

/// Execute the `ainews generate` command.
#[instrument(skip_all)]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let today = resolve_day(args.date.as_deref())?;
    let paths = resolve_paths(&args, &config)?;
    debug!(?paths, "Site paths resolved");

    let loader = match &paths.templates {
        Some(dir) => TemplateLoader::new(dir),
        None => TemplateLoader::builtin(),
    };
    let LoadedTemplates { templates, origins } = loader.load()?;

    if paths.output.exists() && !args.yes && should_prompt(&global, &output) {
        let question = format!(
            "Replace everything in '{}' with the generated site?",
            paths.output.display()
        );
        if !output.confirm(&question)? {
            return Err(CliError::Cancelled);
        }
    }

    let service = SiteService::new(
        Box::new(JsonContentStore::new(
            paths.content.clone(),
            Box::new(LocalFilesystem),
        )),
        Box::new(LocalFilesystem),
        templates,
        layout(&paths, &config),
    )
    .with_options(SiteOptions {
        render: render_options(&config),
    });

    let spinner = output.spinner("Generating site...");
    let result = service.generate(&today);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let report = result?;
    info!(pages = report.pages_written, "Generation finished");

    if output.format() == OutputFormat::Json {
        return output.json(&report);
    }
    show_report(&report, &origins, &output)
}

/// Flags win over config. Directories named explicitly must exist; a
/// configured static directory that is missing falls back to the built-in
/// stylesheet.
fn resolve_paths(args: &GenerateArgs, config: &AppConfig) -> CliResult<SitePaths> {
    for dir in [&args.templates, &args.static_dir].into_iter().flatten() {
        require_dir(dir)?;
    }

    let static_dir = args
        .static_dir
        .clone()
        .or_else(|| config.site.static_dir.clone())
        .filter(|dir| {
            let present = dir.is_dir();
            if !present {
                debug!(dir = %dir.display(), "Static directory missing, using built-in stylesheet");
            }
            present
        });

    Ok(SitePaths {
        output: args
            .out
            .clone()
            .unwrap_or_else(|| config.site.output_dir.clone()),
        content: args
            .content
            .clone()
            .unwrap_or_else(|| config.content_dir.clone()),
        templates: args
            .templates
            .clone()
            .or_else(|| config.site.templates_dir.clone()),
        static_dir,
    })
}

fn require_dir(dir: &Path) -> CliResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(CliError::FileNotFound {
            path: dir.to_path_buf(),
        })
    }
}

fn layout(paths: &SitePaths, config: &AppConfig) -> SiteLayout {
    let layout = SiteLayout::new(&paths.output)
        .with_extra_files(config.site.extra_files.clone())
        .with_default_stylesheet(STYLE_CSS);
    match &paths.static_dir {
        Some(dir) => layout.with_static_dir(dir),
        None => layout,
    }
}

fn render_options(config: &AppConfig) -> RenderOptions {
    if config.site.legacy_truncate {
        RenderOptions::legacy()
    } else {
        RenderOptions::default()
    }
}

/// Only a human at a terminal is asked before the output directory goes.
fn should_prompt(global: &GlobalArgs, output: &OutputManager) -> bool {
    !global.quiet && output.format() == OutputFormat::Human && io::stdin().is_terminal()
}

/// `index <origin>, archive <origin>`.
fn describe_templates([index, archive]: &[TemplateOrigin; 2]) -> String {
    format!("index {index}, archive {archive}")
}

fn show_report(
    report: &SiteReport,
    origins: &[TemplateOrigin; 2],
    output: &OutputManager,
) -> CliResult<()> {
    output.success(&format!(
        "Site generated in {}",
        report.output_dir.display()
    ))?;
    match &report.index_day {
        Some(day) => output.print(&format!("  Front page:   {day}"))?,
        None => output.warning("No content found; the front page is empty")?,
    }
    output.print(&format!("  Templates:    {}", describe_templates(origins)))?;
    output.print(&format!("  Daily pages:  {}", report.daily_pages))?;
    output.print(&format!("  Static files: {}", report.static_files))?;
    if report.extra_files > 0 {
        output.print(&format!("  Extra files:  {}", report.extra_files))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ainews_core::domain::TruncateMode;
    use tempfile::TempDir;

    fn args() -> GenerateArgs {
        GenerateArgs {
            out: None,
            content: None,
            templates: None,
            static_dir: None,
            yes: true,
            date: None,
        }
    }

    #[test]
    fn config_paths_apply_without_flags() {
        let mut config = AppConfig::default();
        config.site.static_dir = None;
        let paths = resolve_paths(&args(), &config).unwrap();

        assert_eq!(
            paths,
            SitePaths {
                output: PathBuf::from("docs"),
                content: PathBuf::from("content"),
                templates: Some(PathBuf::from("templates")),
                static_dir: None,
            }
        );
    }

    #[test]
    fn flags_override_config() {
        let temp = TempDir::new().unwrap();
        let mut args = args();
        args.out = Some(temp.path().join("public"));
        args.templates = Some(temp.path().to_path_buf());
        args.static_dir = Some(temp.path().to_path_buf());

        let paths = resolve_paths(&args, &AppConfig::default()).unwrap();
        assert_eq!(paths.output, temp.path().join("public"));
        assert_eq!(paths.templates.as_deref(), Some(temp.path()));
        assert_eq!(paths.static_dir.as_deref(), Some(temp.path()));
    }

    #[test]
    fn missing_explicit_templates_dir_is_not_found() {
        let temp = TempDir::new().unwrap();
        let mut args = args();
        args.templates = Some(temp.path().join("missing"));

        let err = resolve_paths(&args, &AppConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_configured_static_dir_is_dropped() {
        let temp = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.site.static_dir = Some(temp.path().join("static"));

        let paths = resolve_paths(&args(), &config).unwrap();
        assert_eq!(paths.static_dir, None);
    }

    #[test]
    fn layout_carries_builtin_stylesheet_and_extras() {
        let paths = SitePaths {
            output: PathBuf::from("out"),
            content: PathBuf::from("content"),
            templates: None,
            static_dir: None,
        };
        let layout = layout(&paths, &AppConfig::default());
        assert_eq!(layout.default_stylesheet, STYLE_CSS);
        assert_eq!(layout.extra_files.len(), 2);
        assert!(layout.static_dir.is_none());
    }

    #[test]
    fn template_origins_are_described_in_page_order() {
        let origins = [
            TemplateOrigin::File(PathBuf::from("tpl/index.html")),
            TemplateOrigin::Builtin,
        ];
        assert_eq!(
            describe_templates(&origins),
            "index tpl/index.html, archive built-in"
        );
    }

    #[test]
    fn legacy_truncate_switches_render_mode() {
        let mut config = AppConfig::default();
        assert_eq!(render_options(&config).truncate_mode, TruncateMode::PerMarker);
        config.site.legacy_truncate = true;
        assert_eq!(render_options(&config), RenderOptions::legacy());
    }
}
