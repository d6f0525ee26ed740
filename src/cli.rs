//! CLI - Command Line Interface for ccloud
//!
//! Every browsing screen is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Two pages of top rated action movies
//! ccloud movies --genre 1 --sort imdb --pages 2
//!
//! # Search and country listings
//! ccloud search "dark" --json
//! ccloud country 3 --sort views
//!
//! # Home rows
//! ccloud home
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::Config;
use crate::eligibility::TitlePolicy;
use crate::models::FilterType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Listing came back empty
    NoResults = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// ccloud - browse the CCloud movie and series catalog
#[derive(Parser, Debug)]
#[command(
    name = "ccloud",
    version,
    about = "Browse the CCloud movie and series catalog",
    after_help = "EXAMPLES:\n\
                  ccloud movies --sort imdb           Top rated movies\n\
                  ccloud series --genre 4 --pages 3   Three pages of a genre\n\
                  ccloud search \"dark\" --json         Search as JSON\n\
                  ccloud home                         All home rows"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log requests and state changes to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// Config from `--config`, or the default location
    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Ok(Config::load()),
        }
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse movies
    #[command(visible_alias = "m")]
    Movies(ListCmd),

    /// Browse series
    #[command(visible_alias = "tv")]
    Series(ListCmd),

    /// Browse titles produced in a country
    Country(CountryCmd),

    /// Search movies and series by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Show one movie or series
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Show the home rows (new, top rated, most viewed)
    Home(HomeCmd),

    /// List genres
    Genres,

    /// List countries
    Countries,

    /// Write a config file
    Init(InitCmd),
}

// =============================================================================
// Listing Commands
// =============================================================================

/// Paginated movie or series listing
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Genre id (0 = all genres)
    #[arg(long, short = 'g', default_value = "0")]
    pub genre: u32,

    /// Sort order
    #[arg(long, short = 's', value_enum, default_value = "default")]
    pub sort: SortArg,

    /// Number of pages to load
    #[arg(long, short = 'p', default_value = "1")]
    pub pages: u32,

    /// Maximum number of results to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// Country listing
#[derive(Args, Debug)]
pub struct CountryCmd {
    /// Country id (see `ccloud countries`)
    #[arg(required = true)]
    pub id: u32,

    /// Sort order
    #[arg(long, short = 's', value_enum, default_value = "default")]
    pub sort: SortArg,

    /// Number of pages to load
    #[arg(long, short = 'p', default_value = "1")]
    pub pages: u32,

    /// Maximum number of results to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// Sort order argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortArg {
    /// Newest first
    #[default]
    Default,
    /// By release year
    Year,
    /// By IMDb rating
    Imdb,
    /// By view count
    Views,
}

impl From<SortArg> for FilterType {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Default => FilterType::Default,
            SortArg::Year => FilterType::ByYear,
            SortArg::Imdb => FilterType::ByImdb,
            SortArg::Views => FilterType::ByViews,
        }
    }
}

// =============================================================================
// Search / Info / Home / Init Commands
// =============================================================================

/// Search by title
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Single title details
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// Movie or series id
    #[arg(required = true)]
    pub id: u64,

    /// Look the id up as a series instead of a movie
    #[arg(long)]
    pub series: bool,
}

/// Home rows
#[derive(Args, Debug)]
pub struct HomeCmd {
    /// Items shown per row
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

/// Config file writer
#[derive(Args, Debug)]
pub struct InitCmd {
    /// Catalog API key
    #[arg(long)]
    pub api_key: String,

    /// Catalog API root
    #[arg(long)]
    pub base_url: Option<String>,

    /// Which titles are shown
    #[arg(long, value_enum, default_value = "latin-persian")]
    pub title_filter: TitleFilterArg,
}

/// Title filter argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFilterArg {
    /// Show every title
    All,
    /// Latin and Persian titles only
    LatinPersian,
}

impl From<TitleFilterArg> for TitlePolicy {
    fn from(arg: TitleFilterArg) -> Self {
        match arg {
            TitleFilterArg::All => TitlePolicy::All,
            TitleFilterArg::LatinPersian => TitlePolicy::LatinPersian,
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Listing response
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub page: u32,
    pub can_load_more: bool,
    pub items: Vec<T>,
}

/// One home row
#[derive(Debug, Serialize)]
pub struct HomeRow<T: Serialize> {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub items: Vec<T>,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print one line per item in text mode, the JSON envelope otherwise
    pub fn print_lines<T: Serialize + std::fmt::Display>(&self, items: &[T]) -> anyhow::Result<()> {
        if self.json {
            return self.print(items);
        }
        for item in items {
            println!("{}", item);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
