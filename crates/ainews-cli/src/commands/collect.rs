//! Implementation of the `ainews collect` command.
//!
//! Builds the HTTP fetcher and JSON content store from config, runs the
//! collect service and reports what was kept.

use tracing::{info, instrument};

use ainews_adapters::{HttpFetcher, JsonContentStore, LocalFilesystem};
use ainews_core::{
    application::{CollectReport, CollectService},
    error::NewsError,
};

use crate::{
    cli::{CollectArgs, OutputFormat},
    commands::resolve_day,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `ainews collect` command.
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: CollectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let day = resolve_day(args.date.as_deref())?;
    let service = build_service(&config)?;

    let spinner = output.spinner(&format!(
        "Collecting from {} sources...",
        service.sources().len()
    ));
    let result = if args.dry_run {
        Ok(service.gather(&day))
    } else {
        service.collect(&day)
    };
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let report = result?;
    info!(day = %report.day, kept = report.kept(), "Collection finished");

    if output.format() == OutputFormat::Json {
        return output.json(&report);
    }
    show_report(&report, args.dry_run, &output)
}

fn build_service(config: &AppConfig) -> CliResult<CollectService> {
    let collector = &config.collector;
    let filter = collector.keyword_filter().map_err(NewsError::from)?;
    let fetcher = HttpFetcher::new(collector.timeout(), &collector.user_agent)?;
    let store = JsonContentStore::new(config.content_dir.clone(), Box::new(LocalFilesystem));

    Ok(CollectService::new(
        collector.feed_sources(),
        filter,
        Box::new(fetcher),
        Box::new(store),
    ))
}

fn show_report(report: &CollectReport, dry_run: bool, output: &OutputManager) -> CliResult<()> {
    for source in &report.failed_sources {
        output.warning(&format!("Skipped source '{source}' (run with -v for details)"))?;
    }

    if dry_run {
        output.header(&format!("Stories for {}:", report.day))?;
        for item in &report.items {
            output.print(&format!("  \u{2022} {} ({})", item.title, item.source))?;
            output.print(&format!("    {}", item.link))?;
        }
        output.info(&format!(
            "Dry run: {} of {} stories kept, nothing saved",
            report.kept(),
            report.fetched
        ))?;
        return Ok(());
    }

    let summary = format!(
        "Kept {} of {} stories for {}",
        report.kept(),
        report.fetched,
        report.day
    );
    match &report.path {
        Some(path) => output.success(&format!("{summary} \u{2192} {}", path.display()))?,
        None => output.success(&summary)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;

    #[test]
    fn service_uses_configured_sources_in_order() {
        let mut config = AppConfig::default();
        config.collector.feeds = vec!["https://extra.example/rss".into()];
        config.collector.sources = vec![SourceConfig {
            name: "Blog".into(),
            url: "https://blog.example/feed".into(),
            kind: Default::default(),
            selector: None,
            base_url: None,
            limit: None,
        }];

        let service = build_service(&config).unwrap();
        let names: Vec<_> = service.sources().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["https://extra.example/rss", "Blog"]);
    }

    #[test]
    fn empty_keywords_fail_before_fetching() {
        let mut config = AppConfig::default();
        config.collector.keywords.clear();
        let err = build_service(&config).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }
}
