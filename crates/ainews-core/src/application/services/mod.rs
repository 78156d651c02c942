//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "collect today's news" or "build the site".

pub mod collect_service;
pub mod site_service;

pub use collect_service::{CollectReport, CollectService};
pub use site_service::{DEFAULT_STYLESHEET_NAME, SiteOptions, SiteReport, SiteService};
