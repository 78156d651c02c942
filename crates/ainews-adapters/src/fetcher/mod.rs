//! News fetcher adapters.

mod http;

pub use http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpFetcher, parse_rss, scrape_links};
