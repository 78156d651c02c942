// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for ainews.
//!
//! Pure logic only: the news item model, the template engine, keyword
//! curation and page contexts. Fetching, persistence and file output are
//! reached through the ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Small dependency set**: std, thiserror, chrono, serde
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
pub mod curation;
pub mod entities;
pub mod error;
pub mod pages;
pub mod template;

pub use curation::{DEFAULT_KEYWORDS, KeywordFilter, curate, dedupe_by_title, sort_newest_first};

pub use entities::{
    ContentArchive, DAY_FORMAT, DEFAULT_SCRAPE_LIMIT, FeedSource, ItemField, NewsItem, RenderContext,
    SiteLayout, SiteTemplates, SourceKind, Value, validate_day,
};

pub use error::DomainError;

pub use pages::{archive_context, day_context};

pub use template::{RenderOptions, Template, TruncateMode, render};
