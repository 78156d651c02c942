//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use ainews_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{NewsError, NewsResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> NewsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> NewsResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> NewsResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn list_files(&self, dir: &Path) -> NewsResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| map_io_error(dir, e, "read directory"))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| map_io_error(dir, e, "read directory entry"))?
                .path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> NewsResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, &format!("copy to {}", to.display())))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> NewsResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> NewsError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_read_and_list() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = temp.path().join("a/b");

        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&dir.join("2.json"), "[]").unwrap();
        fs.write_file(&dir.join("1.json"), "[1]").unwrap();
        fs.create_dir_all(&dir.join("nested")).unwrap();

        assert_eq!(fs.read_to_string(&dir.join("1.json")).unwrap(), "[1]");
        assert_eq!(
            fs.list_files(&dir).unwrap(),
            vec![dir.join("1.json"), dir.join("2.json")]
        );
    }

    #[test]
    fn copy_and_remove() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let src = temp.path().join("CNAME");
        let out = temp.path().join("docs");

        fs.write_file(&src, "news.example.com").unwrap();
        fs.create_dir_all(&out).unwrap();
        fs.copy_file(&src, &out.join("CNAME")).unwrap();
        assert_eq!(
            fs.read_to_string(&out.join("CNAME")).unwrap(),
            "news.example.com"
        );

        fs.remove_dir_all(&out).unwrap();
        assert!(!fs.exists(&out));
    }

    #[test]
    fn missing_paths_map_to_filesystem_errors() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let missing = temp.path().join("nope");

        let err = fs.read_to_string(&missing).unwrap_err();
        assert!(matches!(
            err,
            NewsError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(fs.list_files(&missing).is_err());
    }
}
