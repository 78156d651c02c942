//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `ainews-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{ContentArchive, FeedSource, NewsItem};
use crate::error::NewsResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `ainews_adapters::filesystem::LocalFilesystem` (production)
/// - `ainews_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> NewsResult<()>;

    /// Write content to a file, replacing it if it exists.
    fn write_file(&self, path: &Path, content: &str) -> NewsResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> NewsResult<String>;

    /// Regular files directly inside `dir`, sorted by path.
    fn list_files(&self, dir: &Path) -> NewsResult<Vec<PathBuf>>;

    /// Copy a file, creating nothing but the target file itself.
    fn copy_file(&self, from: &Path, to: &Path) -> NewsResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> NewsResult<()>;
}

/// Port for downloading one source and turning it into items.
///
/// Implemented by:
/// - `ainews_adapters::fetcher::HttpFetcher` (RSS and CSS-selector scraping)
#[cfg_attr(test, mockall::automock)]
pub trait NewsFetcher: Send + Sync {
    fn fetch(&self, source: &FeedSource) -> NewsResult<Vec<NewsItem>>;
}

/// Port for the dated content files.
///
/// Implemented by:
/// - `ainews_adapters::content_store::JsonContentStore`
#[cfg_attr(test, mockall::automock)]
pub trait ContentStore: Send + Sync {
    /// Persist one day's items, replacing earlier content for that day.
    /// Returns where the items were written.
    fn save_day(&self, day: &str, items: &[NewsItem]) -> NewsResult<PathBuf>;

    /// Every stored day.
    fn load_all(&self) -> NewsResult<ContentArchive>;
}
