//! Command-line interface for `gallery`.
//!
//! # Examples
//!
//! ```bash
//! # Browse the demos interactively
//! gallery
//!
//! # Print one page without a terminal session
//! gallery --seed 7 --today 2025-08-07 render heatmap
//!
//! # Show the resolved configuration
//! gallery --config gallery.json diagnostics
//! ```

use std::path::PathBuf;

use chrono::{NaiveDate, Weekday};
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};

/// Widget Gallery - small interactive widget demos in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gallery",
    author,
    version,
    about = "Widget Gallery - small interactive widget demos in the terminal"
)]
pub struct Cli {
    /// Seed for deterministic demo data
    #[arg(long, short = 's', env = "GALLERY_SEED")]
    pub seed: Option<u64>,

    /// Date treated as today by the heat map (YYYY-MM-DD)
    #[arg(long, env = "GALLERY_TODAY")]
    pub today: Option<NaiveDate>,

    /// First day of the week for heat-map columns (e.g. sun, mon)
    #[arg(long, env = "GALLERY_WEEK_START")]
    pub week_start: Option<Weekday>,

    /// Path to a JSON configuration file
    #[arg(long, short = 'c', env = "GALLERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Force color output off
    ///
    /// Respects `NO_COLOR` environment variable
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Force color output on (overrides `NO_COLOR`)
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Disable alternate screen mode
    #[arg(long, env = "GALLERY_NO_ALT_SCREEN", value_parser = FalseyValueParser::new())]
    pub no_alt_screen: bool,

    /// Write logs to this file
    #[arg(long, env = "GALLERY_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the list of demos
    List,

    /// Render pages to stdout without a terminal session
    Render(RenderArgs),

    /// Show the resolved configuration
    Diagnostics,
}

/// Arguments for the render subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Page to render (all if not specified)
    pub page: Option<String>,

    /// Render width in columns
    #[arg(long, short = 'W', default_value = "80")]
    pub width: usize,

    /// Render height in rows
    #[arg(long, short = 'H', default_value = "24")]
    pub height: usize,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Whether a one-shot subcommand was requested.
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.command.is_some()
    }
}
