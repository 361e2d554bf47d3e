//! Clap derive structures for the `linkdeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Compiled into `build.rs` as well, so it may only depend on clap.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// linkdeck -- short links, click analytics, and QR codes from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "linkdeck",
    version,
    about = "Manage short links from the command line",
    long_about = "A terminal dashboard for a URL-shortening service.\n\n\
        Create short links (enriched with the destination page's title,\n\
        description, and favicon), browse and search them, read click\n\
        analytics, and generate QR codes.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Service profile to use
    #[arg(long, short = 'p', env = "LINKDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Service base URL (overrides profile)
    #[arg(long, env = "LINKDECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "LINKDECK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "LINKDECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in, register, and manage your profile
    Auth(AuthArgs),

    /// Create, browse, and manage short links
    #[command(alias = "l")]
    Links(LinksArgs),

    /// Click analytics per link or for the whole account
    #[command(alias = "stats")]
    Analytics(AnalyticsArgs),

    /// Preview the title, description, and favicon a destination yields
    Metadata(MetadataArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in and store the session
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },

    /// Create an account and store the session
    Register {
        /// Display name (prompted when omitted)
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    #[command(alias = "me")]
    Whoami,

    /// Update name, email, or password
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },
}

// ── Links ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LinksArgs {
    #[command(subcommand)]
    pub command: LinksCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Newest first
    Desc,
    /// Oldest first
    Asc,
}

#[derive(Debug, Subcommand)]
pub enum LinksCommand {
    /// List links, newest first
    #[command(alias = "ls")]
    List {
        /// Only links whose destination or slug contains this text
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Creation-date order
        #[arg(long, value_enum, default_value = "desc")]
        sort: SortOrder,

        /// Show at most this many links
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },

    /// Show one link (by id or slug)
    Get {
        /// Link id or slug
        link: String,
    },

    /// Shorten a URL
    #[command(alias = "new")]
    Create {
        /// Destination URL (`https://` is added when missing)
        url: String,

        /// Custom slug
        #[arg(long)]
        slug: Option<String>,

        /// Title (defaults to the page's <title>)
        #[arg(long)]
        title: Option<String>,

        /// Description (defaults to the page's meta description)
        #[arg(long)]
        description: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Require a password to follow the link
        #[arg(long)]
        protect: bool,

        /// Read the link password from stdin instead of prompting
        #[arg(long, requires = "protect")]
        password_stdin: bool,

        /// Print the request body without creating anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Change an existing link
    Update {
        /// Link id or slug
        link: String,

        /// New destination URL
        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Replace tags (repeatable)
        #[arg(long = "tag", short = 't')]
        tags: Option<Vec<String>>,

        /// Require a password (prompted)
        #[arg(long, conflicts_with = "unprotect")]
        protect: bool,

        /// Remove password protection
        #[arg(long)]
        unprotect: bool,
    },

    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link id or slug
        link: String,
    },

    /// Build a QR code image URL for a link's short URL
    Qr {
        /// Link id or slug
        link: String,

        /// Image edge length in pixels (50-1000)
        #[arg(long, default_value = "200")]
        size: u32,
    },
}

// ── Analytics ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AnalyticsArgs {
    #[command(subcommand)]
    pub command: AnalyticsCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dimension {
    Referrers,
    Countries,
    Devices,
    Browsers,
}

#[derive(Debug, Subcommand)]
pub enum AnalyticsCommand {
    /// Clicks and breakdowns for one link
    Link {
        /// Link id or slug
        link: String,

        /// Only show this breakdown
        #[arg(long, short = 'd', value_enum)]
        dimension: Option<Dimension>,

        /// Rows per breakdown
        #[arg(long, default_value = "5")]
        top: usize,
    },

    /// Account-wide totals and top links
    Overview {
        /// Rows per breakdown
        #[arg(long, default_value = "5")]
        top: usize,
    },
}

// ── Metadata ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MetadataArgs {
    /// Destination URL (`https://` is added when missing)
    pub url: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a profile value (api_url, domain, timeout, metadata_timeout,
    /// user_agent, qr_service)
    Set {
        key: String,
        value: String,
    },

    /// Make a profile the default
    Use {
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
