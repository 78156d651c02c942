//! Page template loading.
//!
//! Looks for `index.html` and `archive.html` in a templates directory and
//! falls back to the built-in pages for any file that is missing. Every
//! template is parsed strictly, so markup errors surface before the site
//! generator touches the output directory.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── index.html     ← front page and daily pages
//! └── archive.html   ← archive page
//! ```

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};

use ainews_core::{
    application::ApplicationError,
    domain::{SiteTemplates, Template},
    error::NewsResult,
};

use crate::builtin_templates::{ARCHIVE_HTML, INDEX_HTML};

pub const INDEX_TEMPLATE: &str = "index.html";
pub const ARCHIVE_TEMPLATE: &str = "archive.html";

/// Where a loaded template came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    File(PathBuf),
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loaded templates plus their origins, in `[index, archive]` order.
#[derive(Debug, Clone)]
pub struct LoadedTemplates {
    pub templates: SiteTemplates,
    pub origins: [TemplateOrigin; 2],
}

/// Loads site templates from an optional directory.
#[derive(Debug, Clone, Default)]
pub struct TemplateLoader {
    dir: Option<PathBuf>,
}

impl TemplateLoader {
    /// A loader that only uses the built-in templates.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// A loader that prefers files in `dir`. The directory does not need to
    /// exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    #[instrument(skip(self), fields(dir = ?self.dir))]
    pub fn load(&self) -> NewsResult<LoadedTemplates> {
        let (index, index_origin) = self.load_one(INDEX_TEMPLATE, INDEX_HTML)?;
        let (archive, archive_origin) = self.load_one(ARCHIVE_TEMPLATE, ARCHIVE_HTML)?;

        info!(index = %index_origin, archive = %archive_origin, "Templates loaded");
        Ok(LoadedTemplates {
            templates: SiteTemplates::new(index, archive),
            origins: [index_origin, archive_origin],
        })
    }

    fn load_one(&self, name: &str, builtin: &str) -> NewsResult<(Template, TemplateOrigin)> {
        let candidate = self
            .dir
            .as_deref()
            .map(|dir| dir.join(name))
            .filter(|path| path.is_file());

        let Some(path) = candidate else {
            debug!(name, "Using built-in template");
            return Ok((parse(name, builtin)?, TemplateOrigin::Builtin));
        };

        let source = fs::read_to_string(&path).map_err(|e| ApplicationError::TemplateLoad {
            name: display_name(&path),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "Using template file");
        Ok((parse(&display_name(&path), &source)?, TemplateOrigin::File(path)))
    }
}

fn parse(name: &str, source: &str) -> NewsResult<Template> {
    Template::parse(source).map_err(|e| {
        ApplicationError::TemplateLoad {
            name: name.to_owned(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ainews_core::{domain::RenderContext, error::NewsError};
    use tempfile::TempDir;

    #[test]
    fn builtin_loader_uses_builtins() {
        let loaded = TemplateLoader::builtin().load().unwrap();
        assert_eq!(
            loaded.origins,
            [TemplateOrigin::Builtin, TemplateOrigin::Builtin]
        );
    }

    #[test]
    fn missing_directory_falls_back() {
        let temp = TempDir::new().unwrap();
        let loaded = TemplateLoader::new(temp.path().join("nope")).load().unwrap();
        assert_eq!(loaded.origins[0], TemplateOrigin::Builtin);
    }

    #[test]
    fn files_override_builtins_individually() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(INDEX_TEMPLATE), "<h1>{{date}}</h1>").unwrap();

        let loaded = TemplateLoader::new(temp.path()).load().unwrap();
        assert_eq!(
            loaded.origins,
            [
                TemplateOrigin::File(temp.path().join(INDEX_TEMPLATE)),
                TemplateOrigin::Builtin
            ]
        );
        let ctx = RenderContext::new().with("date", "today");
        assert_eq!(loaded.templates.index.render(&ctx), "<h1>today</h1>");
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(ARCHIVE_TEMPLATE),
            "<ul>\n{{#each dates}}<li>{{this}}</li>\n</ul>",
        )
        .unwrap();

        let err = TemplateLoader::new(temp.path()).load().unwrap_err();
        match err {
            NewsError::Application(ApplicationError::TemplateLoad { name, reason }) => {
                assert!(name.ends_with(ARCHIVE_TEMPLATE));
                assert!(reason.contains("line 2"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
