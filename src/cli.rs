//! CLI - Command Line Interface for FlixTUI
//!
//! Every browsing page and library action is scriptable. All output is
//! JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Browse
//! flixtui home --json
//! flixtui search "the batman"
//! flixtui info 414906 -t movie
//!
//! # Library
//! flixtui signup me@example.com "Alex"
//! flixtui watchlist add 1396 -t tv
//! flixtui watch 414906 --position 12:30
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::catalog::{NavTarget, TimeWindow, TrendingScope};
use crate::launcher::OpenerKind;
use crate::models::{MaturityLevel, MediaType, UserProfile};

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
    /// Title, profile or trailer not found
    NotFound = 4,
    /// No signed-in user
    NotAuthenticated = 5,
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

/// FlixTUI - Browse a movie & TV catalog from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "flixtui",
    version,
    author = "Gorka & Hermes",
    about = "Browse a movie & TV streaming catalog from the terminal",
    long_about = "A terminal front end for the TMDB catalog with profiles, \
                  a watchlist and continue-watching progress kept on disk.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  flixtui                              Launch interactive TUI\n\
                  flixtui search \"blade runner\"        Search for content\n\
                  flixtui home --page tv -l 5          Browse TV rows\n\
                  flixtui watchlist list --json        Show saved titles"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Directory for profiles, watchlist and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the rows of a browse page
    #[command(visible_alias = "h")]
    Home(HomeCmd),

    /// Get trending content
    #[command(visible_alias = "tr")]
    Trending(TrendingCmd),

    /// Popular movies or TV shows
    Popular(ListCmd),

    /// Top rated movies or TV shows
    TopRated(ListCmd),

    /// Movies in theaters or TV currently airing
    NowPlaying(ListCmd),

    /// Upcoming movies
    Upcoming(UpcomingCmd),

    /// Titles in a genre, most popular first
    Discover(DiscoverCmd),

    /// List genres
    Genres(GenresCmd),

    /// Search for movies and TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Get details for a movie or show
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Find the trailer for a title
    Trailer(TrailerCmd),

    /// List every video published for a title
    Videos(InfoCmd),

    /// Cast and crew of a title
    Credits(CreditsCmd),

    /// Titles similar to a title
    Similar(RelatedCmd),

    /// Titles recommended for viewers of a title
    #[command(visible_alias = "recs")]
    Recommended(RelatedCmd),

    /// Show or update the config file
    Config(ConfigCmd),

    /// Create the local account
    Signup(SignUpCmd),

    /// Sign in to the local account
    Signin(SignInCmd),

    /// Sign out (the account stays on disk)
    Signout(SignOutCmd),

    /// Show the signed-in user and active profile
    Whoami,

    /// Manage profiles
    #[command(visible_alias = "p")]
    Profiles(ProfilesCmd),

    /// Manage the watchlist (My List)
    #[command(visible_alias = "wl")]
    Watchlist(WatchlistCmd),

    /// Manage continue-watching progress
    #[command(name = "continue", visible_alias = "cw")]
    ContinueWatching(ContinueCmd),

    /// Record viewing progress for a title
    #[command(visible_alias = "w")]
    Watch(WatchCmd),
}

// =============================================================================
// Shared Argument Types
// =============================================================================

/// Media type selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaTypeFilter {
    /// Movies
    #[default]
    Movie,
    /// TV shows
    Tv,
}

impl From<MediaTypeFilter> for MediaType {
    fn from(filter: MediaTypeFilter) -> Self {
        match filter {
            MediaTypeFilter::Movie => MediaType::Movie,
            MediaTypeFilter::Tv => MediaType::Tv,
        }
    }
}

/// Browse page selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowsePage {
    #[default]
    Home,
    Movies,
    Tv,
    /// New & Popular
    New,
}

impl From<BrowsePage> for NavTarget {
    fn from(page: BrowsePage) -> Self {
        match page {
            BrowsePage::Home => NavTarget::Home,
            BrowsePage::Movies => NavTarget::Movies,
            BrowsePage::Tv => NavTarget::Tv,
            BrowsePage::New => NavTarget::NewPopular,
        }
    }
}

/// Time window for trending content
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendingWindow {
    /// Today's trending
    Day,
    /// This week's trending
    #[default]
    Week,
}

impl From<TrendingWindow> for TimeWindow {
    fn from(window: TrendingWindow) -> Self {
        match window {
            TrendingWindow::Day => TimeWindow::Day,
            TrendingWindow::Week => TimeWindow::Week,
        }
    }
}

/// Profile maturity ceiling
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaturityArg {
    All,
    Pg,
    #[value(name = "pg13", alias = "pg-13")]
    Pg13,
    R,
}

impl From<MaturityArg> for MaturityLevel {
    fn from(arg: MaturityArg) -> Self {
        match arg {
            MaturityArg::All => MaturityLevel::All,
            MaturityArg::Pg => MaturityLevel::Pg,
            MaturityArg::Pg13 => MaturityLevel::Pg13,
            MaturityArg::R => MaturityLevel::R,
        }
    }
}

/// External program for trailers
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenerChoice {
    /// System URL handler (default)
    #[default]
    Browser,
    /// mpv media player
    Mpv,
}

impl From<OpenerChoice> for OpenerKind {
    fn from(choice: OpenerChoice) -> Self {
        match choice {
            OpenerChoice::Browser => OpenerKind::System,
            OpenerChoice::Mpv => OpenerKind::Mpv,
        }
    }
}

/// A title addressed by TMDB id and media type
#[derive(Args, Debug, Clone)]
pub struct TitleArgs {
    /// TMDB ID
    #[arg(required = true)]
    pub id: u64,

    /// Media type of the ID
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeFilter,
}

impl TitleArgs {
    pub fn media_type(&self) -> MediaType {
        self.media_type.into()
    }
}

// =============================================================================
// Catalog Commands
// =============================================================================

/// Show every row of a browse page
#[derive(Args, Debug)]
pub struct HomeCmd {
    /// Page to load
    #[arg(long, short = 'p', value_enum, default_value = "home")]
    pub page: BrowsePage,

    /// Maximum titles per row
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

/// Get trending movies and TV shows
#[derive(Args, Debug)]
pub struct TrendingCmd {
    /// Time window for trending
    #[arg(long, short = 'w', value_enum, default_value = "week")]
    pub window: TrendingWindow,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,

    /// Restrict to one media type
    #[arg(long, short = 't', value_enum)]
    pub media_type: Option<MediaTypeFilter>,
}

impl TrendingCmd {
    pub fn scope(&self) -> TrendingScope {
        match self.media_type {
            None => TrendingScope::All,
            Some(MediaTypeFilter::Movie) => TrendingScope::Movie,
            Some(MediaTypeFilter::Tv) => TrendingScope::Tv,
        }
    }
}

/// A paged listing for one media type
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Media type
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeFilter,

    /// Result page
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=500))]
    pub page: u32,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct UpcomingCmd {
    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Titles in a genre
#[derive(Args, Debug)]
pub struct DiscoverCmd {
    /// Genre ID or name (e.g. 28 or "action")
    #[arg(required = true)]
    pub genre: String,

    /// Media type
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeFilter,

    /// Result page
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=500))]
    pub page: u32,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct GenresCmd {
    /// Media type
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeFilter,

    /// Fetch the list from TMDB instead of the built-in table
    #[arg(long)]
    pub remote: bool,
}

/// Search for movies and TV shows by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,

    /// Filter by media type
    #[arg(long, short = 't', value_enum)]
    pub media_type: Option<MediaTypeFilter>,

    /// Minimum year
    #[arg(long)]
    pub year_from: Option<u16>,

    /// Maximum year
    #[arg(long)]
    pub year_to: Option<u16>,
}

/// Get detailed information about a movie or TV show
#[derive(Args, Debug)]
pub struct InfoCmd {
    #[command(flatten)]
    pub title: TitleArgs,
}

/// Find (and optionally open) a title's trailer
#[derive(Args, Debug)]
pub struct TrailerCmd {
    #[command(flatten)]
    pub title: TitleArgs,

    /// Open the trailer outside the terminal
    #[arg(long, short = 'o')]
    pub open: bool,

    /// Program used with --open
    #[arg(long, value_enum, default_value = "browser")]
    pub with: OpenerChoice,
}

#[derive(Args, Debug)]
pub struct CreditsCmd {
    #[command(flatten)]
    pub title: TitleArgs,

    /// Maximum number of cast members
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

/// Titles related to another title
#[derive(Args, Debug)]
pub struct RelatedCmd {
    #[command(flatten)]
    pub title: TitleArgs,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Show the effective config, or write the given settings to the config file
#[derive(Args, Debug)]
pub struct ConfigCmd {
    /// TMDB v3 API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Response language, e.g. en-US
    #[arg(long)]
    pub language: Option<String>,

    /// Region for release-date listings, e.g. US
    #[arg(long)]
    pub region: Option<String>,

    /// Include adult titles in search and discover
    #[arg(long)]
    pub include_adult: Option<bool>,
}

impl ConfigCmd {
    pub fn has_changes(&self) -> bool {
        self.api_key.is_some()
            || self.language.is_some()
            || self.region.is_some()
            || self.include_adult.is_some()
    }
}

// =============================================================================
// Account Commands
// =============================================================================

#[derive(Args, Debug)]
pub struct SignUpCmd {
    /// Account email
    #[arg(required = true)]
    pub email: String,

    /// Display name (also the first profile's name)
    #[arg(required = true)]
    pub name: String,

    /// Password (accepted but not stored)
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct SignInCmd {
    /// Account email
    #[arg(required = true)]
    pub email: String,

    /// Password (accepted but not checked)
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct SignOutCmd {
    /// Also clear the watchlist and continue-watching
    #[arg(long)]
    pub clear_data: bool,
}

#[derive(Args, Debug)]
pub struct ProfilesCmd {
    #[command(subcommand)]
    pub action: ProfilesAction,
}

#[derive(Subcommand, Debug)]
pub enum ProfilesAction {
    /// List profiles
    #[command(visible_alias = "ls")]
    List,

    /// Add a profile (at most 5)
    Add {
        /// Profile name
        name: String,

        /// Avatar color (#RRGGBB); random when omitted
        #[arg(long)]
        avatar: Option<String>,

        /// Kids profile (only kids-friendly titles, capped at PG)
        #[arg(long, conflicts_with = "maturity")]
        kids: bool,

        /// Maturity ceiling
        #[arg(long, value_enum, default_value = "r")]
        maturity: MaturityArg,
    },

    /// Update a profile
    Update {
        /// Profile ID or name
        profile: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        avatar: Option<String>,

        /// Turning kids on caps maturity at PG; turning it off restores R
        #[arg(long)]
        kids: Option<bool>,

        #[arg(long, value_enum)]
        maturity: Option<MaturityArg>,
    },

    /// Delete a profile (the last one cannot be deleted)
    #[command(visible_alias = "rm")]
    Delete {
        /// Profile ID or name
        profile: String,
    },

    /// Make a profile active
    Switch {
        /// Profile ID or name
        profile: String,
    },
}

// =============================================================================
// Library Commands
// =============================================================================

#[derive(Args, Debug)]
pub struct WatchlistCmd {
    #[command(subcommand)]
    pub action: WatchlistAction,
}

#[derive(Subcommand, Debug)]
pub enum WatchlistAction {
    /// List saved titles, newest first
    #[command(visible_alias = "ls")]
    List,
    /// Save a title
    Add(TitleArgs),
    /// Remove a title
    #[command(visible_alias = "rm")]
    Remove(TitleArgs),
    /// Remove everything
    Clear,
}

#[derive(Args, Debug)]
pub struct ContinueCmd {
    #[command(subcommand)]
    pub action: ContinueAction,
}

#[derive(Subcommand, Debug)]
pub enum ContinueAction {
    /// List titles in progress, most recent first
    #[command(visible_alias = "ls")]
    List,
    /// Set progress for a title
    Update {
        #[command(flatten)]
        title: TitleArgs,

        /// Progress percentage
        #[arg(long, short = 'p', value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: u8,

        /// Playback position in seconds
        #[arg(long, default_value = "0")]
        timestamp: u64,
    },
    /// Remove a title
    #[command(visible_alias = "rm")]
    Remove(TitleArgs),
    /// Remove everything
    Clear,
}

/// Record how far into a title's trailer you got
#[derive(Args, Debug)]
pub struct WatchCmd {
    #[command(flatten)]
    pub title: TitleArgs,

    /// Playback position: seconds, MM:SS or HH:MM:SS
    #[arg(long, short = 'p', default_value = "0")]
    pub position: String,

    /// Open the trailer outside the terminal
    #[arg(long, short = 'o')]
    pub open: bool,

    /// Program used with --open
    #[arg(long, value_enum, default_value = "browser")]
    pub with: OpenerChoice,
}

impl WatchCmd {
    /// Parse the position argument into seconds
    pub fn position_secs(&self) -> Option<u64> {
        let s = self.position.trim();
        s.parse::<u64>().ok().or_else(|| parse_timestamp(s))
    }
}

/// Parse timestamp string (HH:MM:SS or MM:SS) to seconds
pub fn parse_timestamp(s: &str) -> Option<u64> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.len() {
        2 => {
            let mins: u64 = parts[0].parse().ok()?;
            let secs: u64 = parts[1].parse().ok()?;
            Some(mins * 60 + secs)
        }
        3 => {
            let hours: u64 = parts[0].parse().ok()?;
            let mins: u64 = parts[1].parse().ok()?;
            let secs: u64 = parts[2].parse().ok()?;
            Some(hours * 3600 + mins * 60 + secs)
        }
        _ => None,
    }
}

/// Validate a `#RRGGBB` avatar color
pub fn validate_avatar_color(color: &str) -> Result<&str, &'static str> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(color)
    } else {
        Err("Invalid avatar color (expected #RRGGBB)")
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

/// Status OK response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusOk {
    pub status: &'static str,
}

impl Default for StatusOk {
    fn default() -> Self {
        Self { status: "ok" }
    }
}

/// Trailer lookup response
#[derive(Debug, Serialize)]
pub struct TrailerResponse {
    pub title: String,
    pub key: String,
    pub name: String,
    pub kind: String,
    pub official: bool,
    pub watch_url: String,
    pub embed_url: String,
    pub opened: bool,
}

/// Result of `watch`
#[derive(Debug, Serialize)]
pub struct WatchResponse {
    pub title: String,
    pub position: u64,
    pub duration: u64,
    pub progress: u8,
    pub recorded: bool,
    pub watch_url: String,
}

/// Result of `config`
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub path: Option<std::path::PathBuf>,
    pub api_key_set: bool,
    pub language: Option<String>,
    pub region: Option<String>,
    pub include_adult: bool,
    pub data_dir: std::path::PathBuf,
    pub saved: bool,
}

/// Result of `whoami`, `signup` and `signin`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub email: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub active_profile: Option<UserProfile>,
    pub profiles: usize,
    pub watchlist: usize,
    pub continue_watching: usize,
}

/// One row of `profiles list`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntry {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub active: bool,
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

    /// Print data, or human-readable lines when not in JSON mode
    pub fn print_lines<T: Serialize>(&self, data: T, lines: &[String]) -> anyhow::Result<()> {
        if self.json {
            return self.print(data);
        }
        for line in lines {
            println!("{}", line);
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
