//! Infrastructure adapters for ainews.
//!
//! This crate implements the ports defined in `ainews-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod content_store;
pub mod fetcher;
pub mod filesystem;
pub mod template_loader;

// Re-export commonly used adapters
pub use content_store::JsonContentStore;
pub use fetcher::HttpFetcher;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_loader::TemplateLoader;
