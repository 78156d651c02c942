//! Implementation of the `ainews sources` command.

use ainews_core::domain::{FeedSource, SourceKind};

use crate::{
    cli::{OutputFormat, SourcesArgs, SourcesFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: SourcesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let sources = config.collector.feed_sources();
    let format = if output.format() == OutputFormat::Json {
        SourcesFormat::Json
    } else {
        args.format
    };

    match format {
        SourcesFormat::Table => {
            output.header("Configured sources:")?;
            for source in &sources {
                output.print(&table_row(source))?;
            }
            output.print("")?;
            output.print(&format!(
                "Keywords: {}",
                config.collector.keywords.join(", ")
            ))?;
        }
        SourcesFormat::List => {
            // Plain URLs are the command's result, so they bypass quiet mode.
            let urls: String = sources.iter().map(|s| format!("{}\n", s.url)).collect();
            output.data(&urls)?;
        }
        SourcesFormat::Json => output.json(&sources)?,
    }

    Ok(())
}

fn table_row(source: &FeedSource) -> String {
    let kind = match &source.kind {
        SourceKind::Rss => "rss".to_owned(),
        SourceKind::Scrape { limit, .. } => format!("scrape/{limit}"),
    };
    format!("  {:<28} {:<10} {}", source.name, kind, source.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_show_kind_and_limit() {
        let rss = table_row(&FeedSource::rss("AI News", "https://ai.example/feed"));
        assert!(rss.contains("AI News"));
        assert!(rss.contains(" rss "));

        let scrape = table_row(
            &FeedSource::scrape("HN", "https://hn.example", "a", "https://hn.example")
                .with_limit(5),
        );
        assert!(scrape.contains("scrape/5"));
        assert!(scrape.ends_with("https://hn.example"));
    }
}
