//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "ainews",
    bin_name = "ainews",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "AI news collector and static site generator",
    long_about = "ainews collects AI-related stories from RSS feeds and \
                  scraped pages, stores one JSON file per day, and renders \
                  them into a static HTML site.",
    after_help = "EXAMPLES:\n\
        \x20 ainews collect\n\
        \x20 ainews generate --out docs --yes\n\
        \x20 ainews render templates/index.html --context day.json\n\
        \x20 ainews completions bash > /usr/share/bash-completion/completions/ainews",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch, filter and store today's news.
    #[command(
        visible_alias = "c",
        about = "Collect news from the configured sources",
        after_help = "EXAMPLES:\n\
            \x20 ainews collect\n\
            \x20 ainews collect --dry-run\n\
            \x20 ainews collect --date 2024-01-05"
    )]
    Collect(CollectArgs),

    /// Build the static site from stored content.
    #[command(
        visible_alias = "g",
        about = "Generate the static site",
        after_help = "EXAMPLES:\n\
            \x20 ainews generate\n\
            \x20 ainews generate --out public --templates my-templates --yes"
    )]
    Generate(GenerateArgs),

    /// Render one template against a JSON context.
    #[command(
        about = "Render a template file to stdout",
        after_help = "EXAMPLES:\n\
            \x20 ainews render templates/index.html --context day.json\n\
            \x20 ainews render page.html --strict"
    )]
    Render(RenderArgs),

    /// List the configured news sources.
    #[command(
        visible_alias = "ls",
        about = "List configured sources",
        after_help = "EXAMPLES:\n\
            \x20 ainews sources\n\
            \x20 ainews sources --format json"
    )]
    Sources(SourcesArgs),

    /// Initialise an ainews configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 ainews init           # platform config directory\n\
            \x20 ainews init --local   # .ainews.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 ainews completions bash > ~/.local/share/bash-completion/completions/ainews\n\
            \x20 ainews completions zsh  > ~/.zfunc/_ainews\n\
            \x20 ainews completions fish > ~/.config/fish/completions/ainews.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the ainews configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 ainews config get site.output_dir\n\
            \x20 ainews config list\n\
            \x20 ainews config path"
    )]
    Config(ConfigCommands),
}

// ── collect ───────────────────────────────────────────────────────────────────

/// Arguments for `ainews collect`.
#[derive(Debug, Args)]
pub struct CollectArgs {
    /// Print the curated items instead of saving them.
    #[arg(long = "dry-run", help = "Show what would be saved without saving")]
    pub dry_run: bool,

    /// Day key to store the items under.
    #[arg(
        short = 'd',
        long = "date",
        value_name = "YYYY-MM-DD",
        help = "Store under this day instead of today"
    )]
    pub date: Option<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `ainews generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Override `site.output_dir`.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory (replaced on every run)"
    )]
    pub out: Option<PathBuf>,

    /// Override `content_dir`.
    #[arg(long = "content", value_name = "DIR", help = "Content directory")]
    pub content: Option<PathBuf>,

    /// Override `site.templates_dir`.
    #[arg(long = "templates", value_name = "DIR", help = "Templates directory")]
    pub templates: Option<PathBuf>,

    /// Override `site.static_dir`.
    #[arg(long = "static", value_name = "DIR", help = "Static assets directory")]
    pub static_dir: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Replace the output directory without asking"
    )]
    pub yes: bool,

    /// Day preferred for the front page.
    #[arg(
        short = 'd',
        long = "date",
        value_name = "YYYY-MM-DD",
        help = "Front page day instead of today"
    )]
    pub date: Option<String>,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `ainews render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file.
    #[arg(value_name = "TEMPLATE", help = "Template file to render")]
    pub template: PathBuf,

    /// JSON object bound as the render context.
    #[arg(
        long = "context",
        value_name = "FILE",
        help = "JSON context file (empty context when omitted)"
    )]
    pub context: Option<PathBuf>,

    /// Reject malformed markers instead of passing them through.
    #[arg(long = "strict", help = "Fail on malformed template markers")]
    pub strict: bool,

    /// Use the legacy truncate behaviour.
    #[arg(
        long = "legacy-truncate",
        help = "Let the first truncate limit govern every description"
    )]
    pub legacy_truncate: bool,
}

// ── sources ───────────────────────────────────────────────────────────────────

/// Arguments for `ainews sources`.
#[derive(Debug, Args)]
pub struct SourcesArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: SourcesFormat,
}

/// Output format for the `sources` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourcesFormat {
    /// Human-readable table.
    Table,
    /// One URL per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `ainews init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.ainews.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `ainews completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `ainews config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `site.output_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
