use std::path::{Path, PathBuf};

use crate::domain::template::Template;

/// The two page templates a site is built from, already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteTemplates {
    /// Front page and daily pages: `{ date, newsCount, news }`.
    pub index: Template,
    /// Archive page: `{ dates, counts }`.
    pub archive: Template,
}

impl SiteTemplates {
    pub fn new(index: Template, archive: Template) -> Self {
        Self { index, archive }
    }
}

/// Where the generated site goes and what gets copied next to the pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub output_dir: PathBuf,
    /// Files copied verbatim into `static/`. `None` writes the default stylesheet.
    pub static_dir: Option<PathBuf>,
    /// Root-level files copied when present (`.nojekyll`, `CNAME`).
    pub extra_files: Vec<PathBuf>,
    pub default_stylesheet: String,
}

impl SiteLayout {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            static_dir: None,
            extra_files: vec![PathBuf::from(".nojekyll"), PathBuf::from("CNAME")],
            default_stylesheet: String::new(),
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn with_extra_files(mut self, files: Vec<PathBuf>) -> Self {
        self.extra_files = files;
        self
    }

    pub fn with_default_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.default_stylesheet = css.into();
        self
    }

    pub fn index_page(&self) -> PathBuf {
        self.output_dir.join("index.html")
    }

    pub fn daily_page(&self, day: &str) -> PathBuf {
        self.output_dir.join(day).join("index.html")
    }

    pub fn archive_page(&self) -> PathBuf {
        self.output_dir.join("archive").join("index.html")
    }

    pub fn static_target(&self) -> PathBuf {
        self.output_dir.join("static")
    }

    /// Destination of a root-level extra file.
    pub fn extra_target(&self, file: &Path) -> Option<PathBuf> {
        file.file_name().map(|name| self.output_dir.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_paths() {
        let layout = SiteLayout::new("docs");
        assert_eq!(layout.index_page(), PathBuf::from("docs/index.html"));
        assert_eq!(
            layout.daily_page("2024-01-05"),
            PathBuf::from("docs/2024-01-05/index.html")
        );
        assert_eq!(layout.archive_page(), PathBuf::from("docs/archive/index.html"));
        assert_eq!(layout.static_target(), PathBuf::from("docs/static"));
    }

    #[test]
    fn extra_files_land_in_output_root() {
        let layout = SiteLayout::new("docs");
        assert_eq!(
            layout.extra_target(Path::new("site/CNAME")),
            Some(PathBuf::from("docs/CNAME"))
        );
        assert_eq!(layout.extra_files.len(), 2);
    }
}
