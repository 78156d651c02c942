//! Content store keeping one pretty-printed JSON file per day.
//!
//! ```text
//! content/
//! ├── 2024-01-04.json
//! └── 2024-01-05.json   ← [{"title": ..., "link": ..., "pubDate": ...}, ...]
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use ainews_core::{
    application::{ApplicationError, ports::ContentStore, ports::Filesystem},
    domain::{ContentArchive, NewsItem, validate_day},
    error::NewsResult,
};

const EXTENSION: &str = "json";

/// [`ContentStore`] over any [`Filesystem`].
pub struct JsonContentStore {
    dir: PathBuf,
    filesystem: Box<dyn Filesystem>,
}

impl JsonContentStore {
    pub fn new(dir: impl Into<PathBuf>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            dir: dir.into(),
            filesystem,
        }
    }

    pub fn day_path(&self, day: &str) -> PathBuf {
        self.dir.join(format!("{day}.{EXTENSION}"))
    }

    fn read_day(&self, path: &Path) -> NewsResult<Vec<NewsItem>> {
        let raw = self.filesystem.read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::ContentCorrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl ContentStore for JsonContentStore {
    #[instrument(skip(self, items), fields(dir = %self.dir.display(), count = items.len()))]
    fn save_day(&self, day: &str, items: &[NewsItem]) -> NewsResult<PathBuf> {
        validate_day(day)?;

        let json = serde_json::to_string_pretty(items).map_err(|e| {
            ApplicationError::SerializationFailed {
                reason: e.to_string(),
            }
        })?;

        self.filesystem.create_dir_all(&self.dir)?;
        let path = self.day_path(day);
        self.filesystem.write_file(&path, &json)?;
        debug!(path = %path.display(), "Day saved");
        Ok(path)
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn load_all(&self) -> NewsResult<ContentArchive> {
        let mut archive = ContentArchive::new();
        if !self.filesystem.exists(&self.dir) {
            warn!("Content directory does not exist, nothing to load");
            return Ok(archive);
        }

        for path in self.filesystem.list_files(&self.dir)? {
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(day) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_day(day).is_err() {
                warn!(path = %path.display(), "Skipping content file without a date name");
                continue;
            }

            let items = self.read_day(&path)?;
            debug!(day, count = items.len(), "Day loaded");
            archive.insert(day, items);
        }

        Ok(archive)
    }
}
