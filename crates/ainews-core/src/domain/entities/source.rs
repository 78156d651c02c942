use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Default number of items kept per scraped page.
pub const DEFAULT_SCRAPE_LIMIT: usize = 10;

/// Where news comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
    pub kind: SourceKind,
}

/// How a source is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// An RSS 2.0 feed; every `<item>` becomes a news item.
    Rss,
    /// An HTML page; every element matching `selector` becomes a news item.
    Scrape {
        selector: String,
        /// Prefix for relative links.
        base_url: String,
        limit: usize,
    },
}

impl FeedSource {
    pub fn rss(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            kind: SourceKind::Rss,
        }
    }

    pub fn scrape(
        name: impl Into<String>,
        url: impl Into<String>,
        selector: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            kind: SourceKind::Scrape {
                selector: selector.into(),
                base_url: base_url.into(),
                limit: DEFAULT_SCRAPE_LIMIT,
            },
        }
    }

    /// An extra feed given only by URL; the URL doubles as its name.
    pub fn feed_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::rss(url.clone(), url)
    }

    pub fn with_limit(mut self, new_limit: usize) -> Self {
        if let SourceKind::Scrape { limit, .. } = &mut self.kind {
            *limit = new_limit;
        }
        self
    }

    pub fn is_rss(&self) -> bool {
        matches!(self.kind, SourceKind::Rss)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidSource {
            name: self.name.clone(),
            reason: reason.into(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(invalid("url must start with http:// or https://"));
        }
        if let SourceKind::Scrape {
            selector, limit, ..
        } = &self.kind
        {
            if selector.trim().is_empty() {
                return Err(invalid("scrape sources need a CSS selector"));
            }
            if *limit == 0 {
                return Err(invalid("scrape limit must be at least 1"));
            }
        }
        Ok(())
    }

    /// The built-in source list.
    pub fn defaults() -> Vec<FeedSource> {
        vec![
            FeedSource::scrape(
                "Hacker News",
                "https://news.ycombinator.com",
                ".titleline > a",
                "https://news.ycombinator.com",
            ),
            FeedSource::rss(
                "Reddit r/MachineLearning",
                "https://www.reddit.com/r/MachineLearning/.rss",
            ),
            FeedSource::rss("AI News", "https://www.artificialintelligence-news.com/feed/"),
        ]
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SourceKind::Rss => write!(f, "{} (rss: {})", self.name, self.url),
            SourceKind::Scrape { selector, .. } => {
                write!(f, "{} (scrape '{}': {})", self.name, selector, self.url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        for source in FeedSource::defaults() {
            assert!(source.validate().is_ok(), "invalid default: {source}");
        }
    }

    #[test]
    fn feed_url_uses_url_as_name() {
        let s = FeedSource::feed_url("https://example.com/rss");
        assert_eq!(s.name, "https://example.com/rss");
        assert!(s.is_rss());
    }

    #[test]
    fn rejects_non_http_url() {
        let s = FeedSource::rss("x", "ftp://example.com");
        assert!(matches!(s.validate(), Err(DomainError::InvalidSource { .. })));
    }

    #[test]
    fn rejects_empty_selector_and_zero_limit() {
        let s = FeedSource::scrape("x", "https://a", " ", "https://a");
        assert!(s.validate().is_err());

        let s = FeedSource::scrape("x", "https://a", "a", "https://a").with_limit(0);
        assert!(s.validate().is_err());
    }

    #[test]
    fn with_limit_ignores_rss() {
        let s = FeedSource::rss("x", "https://a").with_limit(3);
        assert_eq!(s.kind, SourceKind::Rss);
    }
}
