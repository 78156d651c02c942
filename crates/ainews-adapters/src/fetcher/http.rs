//! HTTP fetcher: RSS feeds and CSS-selector scraping over a blocking client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};

use ainews_core::{
    application::{ApplicationError, ports::NewsFetcher},
    domain::{FeedSource, NewsItem, SourceKind},
    error::{NewsError, NewsResult},
};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("ainews/", env!("CARGO_PKG_VERSION"));

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const ACCEPT_FEEDS: &str =
    "application/rss+xml,application/xml;q=0.9,text/html;q=0.8,*/*;q=0.5";

/// Failures below the port boundary, before they are attributed to a source.
#[derive(Debug, Error)]
enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Feed(#[from] rss::Error),

    #[error("invalid CSS selector '{0}'")]
    Selector(String),
}

impl FetchError {
    fn for_source(self, source: &FeedSource) -> NewsError {
        let source_name = source.name.clone();
        let reason = self.to_string();
        match self {
            Self::Http(_) | Self::Status(_) => {
                ApplicationError::FetchFailed { source_name, reason }.into()
            }
            Self::Feed(_) | Self::Selector(_) => {
                ApplicationError::ParseFailed { source_name, reason }.into()
            }
        }
    }
}

/// Production [`NewsFetcher`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> NewsResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| NewsError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_FEEDS)
            .send()?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }
        Ok(resp.text()?)
    }
}

impl NewsFetcher for HttpFetcher {
    #[instrument(skip_all, fields(source = %source.name, url = %source.url))]
    fn fetch(&self, source: &FeedSource) -> NewsResult<Vec<NewsItem>> {
        let body = self
            .get_text(&source.url)
            .map_err(|e| e.for_source(source))?;
        debug!(bytes = body.len(), "Body received");

        match &source.kind {
            SourceKind::Rss => parse_rss(&body, source),
            SourceKind::Scrape { .. } => scrape_links(&body, source),
        }
    }
}

/// Items of an RSS 2.0 document, attributed to `source`.
///
/// Descriptions are reduced to their text content so pages can truncate
/// them without cutting through markup.
pub fn parse_rss(body: &str, source: &FeedSource) -> NewsResult<Vec<NewsItem>> {
    let channel = rss::Channel::read_from(body.as_bytes())
        .map_err(|e| FetchError::from(e).for_source(source))?;

    Ok(channel
        .items()
        .iter()
        .map(|item| NewsItem {
            title: item.title().unwrap_or_default().to_owned(),
            link: item.link().unwrap_or_default().to_owned(),
            description: item.description().and_then(plain_text),
            pub_date: item.pub_date().map(str::to_owned),
            source: source.name.clone(),
        })
        .collect())
}

/// Text content of an HTML fragment with whitespace collapsed, or `None`
/// when nothing but markup remains. Angle brackets that survive as text are
/// escaped.
fn plain_text(html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    let raw = fragment.root_element().text().collect::<String>();
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    (!text.is_empty()).then(|| text.replace('<', "&lt;").replace('>', "&gt;"))
}

/// Links matching the source's CSS selector.
///
/// Elements with blank text or no `href` are skipped; relative links are
/// resolved against the source's base URL. Non-scrape sources yield nothing.
pub fn scrape_links(body: &str, source: &FeedSource) -> NewsResult<Vec<NewsItem>> {
    let SourceKind::Scrape {
        selector,
        base_url,
        limit,
    } = &source.kind
    else {
        return Ok(Vec::new());
    };

    let sel = Selector::parse(selector)
        .map_err(|_| FetchError::Selector(selector.clone()).for_source(source))?;
    let document = Html::parse_document(body);

    Ok(document
        .select(&sel)
        .filter_map(|element| {
            let title = element.text().collect::<String>().trim().to_owned();
            let href = element.value().attr("href")?;
            if title.is_empty() || href.is_empty() {
                return None;
            }
            Some(NewsItem::new(title, absolute_link(base_url, href), &source.name))
        })
        .take(*limit)
        .collect())
}

/// `href` unchanged when it is already absolute, else appended to `base`
/// with exactly one `/` between them.
fn absolute_link(base: &str, href: &str) -> String {
    if href.starts_with("http") {
        return href.to_owned();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}
