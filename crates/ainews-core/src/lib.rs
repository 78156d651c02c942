//! ainews Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the ainews
//! collector and static site generator, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            ainews-cli (CLI)             │
//! │     (collect / generate / render)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (CollectService, SiteService)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  (NewsFetcher, ContentStore, Filesystem)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     ainews-adapters (Infrastructure)    │
//! │ (HttpFetcher, JsonContentStore, ...)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (NewsItem, Template, KeywordFilter, ...)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use ainews_core::domain::{NewsItem, RenderContext, Template};
//!
//! let template = Template::parse("{{#each news}}<li>{{this.title}}</li>{{/each}}").unwrap();
//! let context = RenderContext::new()
//!     .with("news", vec![NewsItem::new("GPT-5 ships", "https://example.com", "HN")]);
//!
//! assert_eq!(template.render(&context), "<li>GPT-5 ships</li>");
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CollectService, SiteService,
        ports::{ContentStore, Filesystem, NewsFetcher},
    };
    pub use crate::domain::{
        ContentArchive, FeedSource, KeywordFilter, NewsItem, RenderContext, RenderOptions,
        SiteLayout, SiteTemplates, SourceKind, Template, TruncateMode, Value, render,
    };
    pub use crate::error::{NewsError, NewsResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
