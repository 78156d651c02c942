//! Collect Service - gathers the day's news.
//!
//! Workflow:
//! 1. Fetch every source in order (failures are logged and skipped)
//! 2. Keyword filter, dedupe by title, sort newest first
//! 3. Save the result as the day's content file

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{ContentStore, NewsFetcher},
    domain::{FeedSource, KeywordFilter, NewsItem, curate},
    error::NewsResult,
};

/// Outcome of one collection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectReport {
    pub day: String,
    /// Items returned by all sources before filtering.
    pub fetched: usize,
    /// Names of the sources that failed.
    pub failed_sources: Vec<String>,
    /// Curated items, in saved order.
    pub items: Vec<NewsItem>,
    /// Content file written, `None` for a dry run.
    pub path: Option<PathBuf>,
}

impl CollectReport {
    pub fn kept(&self) -> usize {
        self.items.len()
    }
}

/// News collection service.
pub struct CollectService {
    sources: Vec<FeedSource>,
    filter: KeywordFilter,
    fetcher: Box<dyn NewsFetcher>,
    store: Box<dyn ContentStore>,
}

impl CollectService {
    pub fn new(
        sources: Vec<FeedSource>,
        filter: KeywordFilter,
        fetcher: Box<dyn NewsFetcher>,
        store: Box<dyn ContentStore>,
    ) -> Self {
        Self {
            sources,
            filter,
            fetcher,
            store,
        }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Fetch and curate without saving.
    #[instrument(skip_all, fields(day = %day, sources = self.sources.len()))]
    pub fn gather(&self, day: &str) -> CollectReport {
        let mut fetched = Vec::new();
        let mut failed_sources = Vec::new();

        for source in &self.sources {
            let result = source
                .validate()
                .map_err(Into::into)
                .and_then(|()| self.fetcher.fetch(source));

            match result {
                Ok(items) => {
                    debug!(source = %source.name, count = items.len(), "Source fetched");
                    fetched.extend(items);
                }
                Err(e) => {
                    warn!(source = %source.name, error = %e, "Skipping source");
                    failed_sources.push(source.name.clone());
                }
            }
        }

        let total = fetched.len();
        let items = curate(&self.filter, fetched);
        info!(fetched = total, kept = items.len(), "Items curated");

        CollectReport {
            day: day.to_owned(),
            fetched: total,
            failed_sources,
            items,
            path: None,
        }
    }

    /// Fetch, curate and save the day's content file.
    ///
    /// The file is written even when nothing survives the filter, so a
    /// quiet day still replaces stale content.
    #[instrument(skip_all, fields(day = %day))]
    pub fn collect(&self, day: &str) -> NewsResult<CollectReport> {
        let mut report = self.gather(day);
        let path = self.store.save_day(day, &report.items)?;
        info!(path = %path.display(), count = report.kept(), "Content saved");
        report.path = Some(path);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::output::{MockContentStore, MockNewsFetcher},
    };

    fn item(title: &str, date: &str) -> NewsItem {
        NewsItem::new(title, "https://example.com", "test").with_pub_date(date)
    }

    fn sources() -> Vec<FeedSource> {
        vec![
            FeedSource::rss("One", "https://one.example/rss"),
            FeedSource::rss("Two", "https://two.example/rss"),
        ]
    }

    #[test]
    fn collects_from_all_sources_and_saves() {
        let mut fetcher = MockNewsFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|s| s.name == "One")
            .returning(|_| Ok(vec![item("AI older", "2024-01-01"), item("Knitting", "2024-01-02")]));
        fetcher
            .expect_fetch()
            .withf(|s| s.name == "Two")
            .returning(|_| Ok(vec![item("LLM newer", "2024-01-03"), item("AI older", "2024-01-04")]));

        let mut store = MockContentStore::new();
        store
            .expect_save_day()
            .withf(|day, _| day == "2024-01-05")
            .times(1)
            .returning(|_, items| {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].title, "LLM newer");
                Ok(PathBuf::from("content/2024-01-05.json"))
            });

        let service = CollectService::new(
            sources(),
            KeywordFilter::default(),
            Box::new(fetcher),
            Box::new(store),
        );
        let report = service.collect("2024-01-05").unwrap();

        assert_eq!(report.fetched, 4);
        assert_eq!(report.kept(), 2);
        assert!(report.failed_sources.is_empty());
        assert_eq!(report.path, Some(PathBuf::from("content/2024-01-05.json")));
    }

    #[test]
    fn failing_source_is_skipped() {
        let mut fetcher = MockNewsFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|s| s.name == "One")
            .returning(|s| {
                Err(ApplicationError::FetchFailed {
                    source_name: s.name.clone(),
                    reason: "timeout".into(),
                }
                .into())
            });
        fetcher
            .expect_fetch()
            .withf(|s| s.name == "Two")
            .returning(|_| Ok(vec![item("GPT news", "2024-01-03")]));

        let service = CollectService::new(
            sources(),
            KeywordFilter::default(),
            Box::new(fetcher),
            Box::new(MockContentStore::new()),
        );
        let report = service.gather("2024-01-05");

        assert_eq!(report.failed_sources, vec!["One".to_string()]);
        assert_eq!(report.kept(), 1);
        assert_eq!(report.path, None);
    }

    #[test]
    fn invalid_source_is_never_fetched() {
        let mut fetcher = MockNewsFetcher::new();
        fetcher.expect_fetch().never();

        let service = CollectService::new(
            vec![FeedSource::rss("Broken", "ftp://nowhere")],
            KeywordFilter::default(),
            Box::new(fetcher),
            Box::new(MockContentStore::new()),
        );
        let report = service.gather("2024-01-05");
        assert_eq!(report.failed_sources, vec!["Broken".to_string()]);
    }

    #[test]
    fn empty_day_is_still_saved() {
        let mut store = MockContentStore::new();
        store
            .expect_save_day()
            .withf(|_, items| items.is_empty())
            .times(1)
            .returning(|day, _| Ok(PathBuf::from(format!("content/{day}.json"))));

        let service = CollectService::new(
            Vec::new(),
            KeywordFilter::default(),
            Box::new(MockNewsFetcher::new()),
            Box::new(store),
        );
        assert_eq!(service.collect("2024-01-05").unwrap().kept(), 0);
    }

    #[test]
    fn store_failure_propagates() {
        let mut store = MockContentStore::new();
        store.expect_save_day().returning(|_, _| {
            Err(ApplicationError::FilesystemError {
                path: PathBuf::from("content"),
                reason: "read-only".into(),
            }
            .into())
        });

        let service = CollectService::new(
            Vec::new(),
            KeywordFilter::default(),
            Box::new(MockNewsFetcher::new()),
            Box::new(store),
        );
        assert!(service.collect("2024-01-05").is_err());
    }
}
