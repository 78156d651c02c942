//! Site Service - renders the static site from stored content.
//!
//! Workflow:
//! 1. Load every stored day
//! 2. Clear the output directory
//! 3. Render front page, daily pages and archive page
//! 4. Copy static assets and root-level extras
//!
//! A failure after the output directory was cleared removes the partial
//! output.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{ContentStore, Filesystem},
    domain::{
        ContentArchive, RenderContext, RenderOptions, SiteLayout, SiteTemplates, Template,
        archive_context, day_context,
    },
    error::NewsResult,
};

/// File name of the stylesheet written when no static directory is set.
pub const DEFAULT_STYLESHEET_NAME: &str = "style.css";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteOptions {
    pub render: RenderOptions,
}

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteReport {
    pub output_dir: PathBuf,
    /// Day shown on the front page, `None` without content.
    pub index_day: Option<String>,
    pub daily_pages: usize,
    /// HTML pages written, front and archive pages included.
    pub pages_written: usize,
    /// Files placed under `static/`.
    pub static_files: usize,
    /// Root-level extras copied (`.nojekyll`, `CNAME`).
    pub extra_files: usize,
}

/// Static site generation service.
pub struct SiteService {
    store: Box<dyn ContentStore>,
    filesystem: Box<dyn Filesystem>,
    templates: SiteTemplates,
    layout: SiteLayout,
    options: SiteOptions,
}

impl SiteService {
    pub fn new(
        store: Box<dyn ContentStore>,
        filesystem: Box<dyn Filesystem>,
        templates: SiteTemplates,
        layout: SiteLayout,
    ) -> Self {
        Self {
            store,
            filesystem,
            templates,
            layout,
            options: SiteOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SiteOptions) -> Self {
        self.options = options;
        self
    }

    /// Generate the whole site. `today` is the `YYYY-MM-DD` key preferred
    /// for the front page.
    #[instrument(
        skip_all,
        fields(today = %today, output = %self.layout.output_dir.display())
    )]
    pub fn generate(&self, today: &str) -> NewsResult<SiteReport> {
        // Content is loaded first so unreadable content leaves the old site alone.
        let archive = self.store.load_all()?;
        info!(days = archive.len(), "Content loaded");

        let root = &self.layout.output_dir;
        if self.filesystem.exists(root) {
            debug!("Removing previous output");
            self.filesystem.remove_dir_all(root)?;
        }

        match self.write_site(&archive, today) {
            Ok(report) => {
                info!(
                    pages = report.pages_written,
                    static_files = report.static_files,
                    "Site generated"
                );
                Ok(report)
            }
            Err(e) => {
                warn!("Generation failed, attempting rollback");
                self.rollback(root);
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_site(&self, archive: &ContentArchive, today: &str) -> NewsResult<SiteReport> {
        let layout = &self.layout;
        self.filesystem.create_dir_all(&layout.output_dir)?;

        let index_day = archive.front_page_day(today);
        let index_items = index_day.and_then(|d| archive.get(d)).unwrap_or_default();
        self.write_page(
            &layout.index_page(),
            &self.templates.index,
            &day_context(index_day, index_items),
        )?;
        info!(day = index_day.unwrap_or("none"), "Front page written");

        for (day, items) in archive.iter() {
            self.write_page(
                &layout.daily_page(day),
                &self.templates.index,
                &day_context(Some(day), items),
            )?;
        }
        info!(count = archive.len(), "Daily pages written");

        self.write_page(
            &layout.archive_page(),
            &self.templates.archive,
            &archive_context(archive),
        )?;

        let static_files = self.copy_static()?;
        let extra_files = self.copy_extras()?;

        Ok(SiteReport {
            output_dir: layout.output_dir.clone(),
            index_day: index_day.map(str::to_owned),
            daily_pages: archive.len(),
            pages_written: archive.len() + 2,
            static_files,
            extra_files,
        })
    }

    fn write_page(&self, path: &Path, template: &Template, ctx: &RenderContext) -> NewsResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        let html = template.render_with(ctx, self.options.render);
        self.filesystem.write_file(path, &html)?;
        debug!(path = %path.display(), bytes = html.len(), "Page written");
        Ok(())
    }

    fn copy_static(&self) -> NewsResult<usize> {
        let target = self.layout.static_target();
        self.filesystem.create_dir_all(&target)?;

        let Some(source_dir) = &self.layout.static_dir else {
            self.filesystem.write_file(
                &target.join(DEFAULT_STYLESHEET_NAME),
                &self.layout.default_stylesheet,
            )?;
            return Ok(1);
        };

        let files = self.filesystem.list_files(source_dir)?;
        for file in &files {
            if let Some(name) = file.file_name() {
                self.filesystem.copy_file(file, &target.join(name))?;
            }
        }
        info!(count = files.len(), from = %source_dir.display(), "Static files copied");
        Ok(files.len())
    }

    fn copy_extras(&self) -> NewsResult<usize> {
        let mut copied = 0;
        for file in &self.layout.extra_files {
            if !self.filesystem.exists(file) {
                continue;
            }
            if let Some(target) = self.layout.extra_target(file) {
                self.filesystem.copy_file(file, &target)?;
                copied += 1;
            }
        }
        Ok(copied)
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
