//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `RSS_FEEDS`, a comma-separated list replacing `collector.feeds`
//! 3. Environment variables `AINEWS__SECTION__KEY`
//! 4. Config file: `--config`, else `./.ainews.toml`, else the platform
//!    config directory
//! 5. Built-in defaults (`#[serde(default)]` on every section)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use ainews_adapters::fetcher::DEFAULT_USER_AGENT;
use ainews_core::domain::{
    DEFAULT_KEYWORDS, DEFAULT_SCRAPE_LIMIT, DomainError, FeedSource, KeywordFilter, SourceKind,
};

use crate::cli::OutputFormat;

/// File name of the per-directory config.
pub const LOCAL_CONFIG_FILE: &str = ".ainews.toml";

const ENV_PREFIX: &str = "AINEWS";
const ENV_SEPARATOR: &str = "__";
const RSS_FEEDS_VAR: &str = "RSS_FEEDS";
const LIST_KEYS: [&str; 3] = ["collector.feeds", "collector.keywords", "site.extra_files"];

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding one `YYYY-MM-DD.json` file per day.
    pub content_dir: PathBuf,
    pub collector: CollectorConfig,
    pub site: SiteConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Extra RSS feed URLs, fetched before the named sources.
    pub feeds: Vec<String>,
    pub sources: Vec<SourceConfig>,
    pub keywords: Vec<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Limit for scrape sources that do not set their own.
    pub scrape_limit: usize,
}

/// One named source as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub kind: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Rss,
    Scrape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub output_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    pub extra_files: Vec<PathBuf>,
    /// Render every description with the first truncate limit in the template.
    pub legacy_truncate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            collector: CollectorConfig::default(),
            site: SiteConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            feeds: Vec::new(),
            sources: FeedSource::defaults().iter().map(SourceConfig::from).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| (*k).to_owned()).collect(),
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            scrape_limit: DEFAULT_SCRAPE_LIMIT,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs"),
            templates_dir: Some(PathBuf::from("templates")),
            static_dir: Some(PathBuf::from("static")),
            extra_files: vec![PathBuf::from(".nojekyll"), PathBuf::from("CNAME")],
            legacy_truncate: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: OutputFormat::Auto,
        }
    }
}

impl From<&FeedSource> for SourceConfig {
    fn from(source: &FeedSource) -> Self {
        match &source.kind {
            SourceKind::Rss => Self {
                name: source.name.clone(),
                url: source.url.clone(),
                kind: SourceType::Rss,
                selector: None,
                base_url: None,
                limit: None,
            },
            SourceKind::Scrape {
                selector,
                base_url,
                limit,
            } => Self {
                name: source.name.clone(),
                url: source.url.clone(),
                kind: SourceType::Scrape,
                selector: Some(selector.clone()),
                base_url: Some(base_url.clone()),
                limit: Some(*limit),
            },
        }
    }
}

impl SourceConfig {
    /// Scrape sources without a `base_url` resolve links against their `url`.
    pub fn to_feed_source(&self, default_limit: usize) -> FeedSource {
        match self.kind {
            SourceType::Rss => FeedSource::rss(&self.name, &self.url),
            SourceType::Scrape => FeedSource::scrape(
                &self.name,
                &self.url,
                self.selector.clone().unwrap_or_default(),
                self.base_url.clone().unwrap_or_else(|| self.url.clone()),
            )
            .with_limit(self.limit.unwrap_or(default_limit)),
        }
    }
}

impl CollectorConfig {
    /// Extra feeds first, then the named sources, in configured order.
    pub fn feed_sources(&self) -> Vec<FeedSource> {
        self.feeds
            .iter()
            .map(|url| FeedSource::feed_url(url.trim()))
            .chain(
                self.sources
                    .iter()
                    .map(|s| s.to_feed_source(self.scrape_limit)),
            )
            .collect()
    }

    pub fn keyword_filter(&self) -> Result<KeywordFilter, DomainError> {
        KeywordFilter::new(&self.keywords)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with(config_file.map(PathBuf::as_path), None)
    }

    /// Like [`Self::load`], reading variables from `env` instead of the
    /// process environment when given.
    fn load_with(
        config_file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        // Defaults come from the serde `Default` impls; file lists replace them.
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            anyhow::ensure!(
                path.is_file(),
                "Config file '{}' does not exist",
                path.display()
            );
        }
        if let Some(path) = config_file.map(Path::to_path_buf).or_else(Self::discover) {
            debug!(path = %path.display(), "Reading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let rss_feeds = match &env {
            Some(vars) => vars.get(RSS_FEEDS_VAR).cloned(),
            None => std::env::var(RSS_FEEDS_VAR).ok(),
        };

        let environment = LIST_KEYS.iter().fold(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .list_separator(",")
                .source(env),
            |environment, key| environment.with_list_parse_key(key),
        );

        let mut config: Self = builder
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        if let Some(raw) = rss_feeds {
            config.apply_rss_feeds(&raw);
        }
        Ok(config)
    }

    /// Replace `collector.feeds` with a comma-separated URL list. Blank
    /// lists leave the configured feeds alone.
    pub fn apply_rss_feeds(&mut self, raw: &str) {
        let feeds: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_owned)
            .collect();
        if !feeds.is_empty() {
            self.collector.feeds = feeds;
        }
    }

    /// First existing file among `./.ainews.toml` and the platform config.
    fn discover() -> Option<PathBuf> {
        [Self::local_config_path(), Self::config_path()]
            .into_iter()
            .find(|path| path.is_file())
    }

    /// The file that `load(None)` reads, if any.
    pub fn active_path(config_file: Option<&PathBuf>) -> Option<PathBuf> {
        config_file.cloned().or_else(Self::discover)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.ainews.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "ainews", "ainews")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(Self::local_config_path)
    }

    pub fn local_config_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }
}
