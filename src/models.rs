//! Data structures and types for FlixTUI
//!
//! Contains all shared models used across the application organized by domain:
//! - **Catalog**: normalized TMDB listings, details, videos and credits
//! - **Account**: the local user stub and its profiles
//! - **Library**: watchlist and continue-watching entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Catalog Models (TMDB)
// =============================================================================

/// Media type discriminator for catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the TMDB API (`movie` / `tv`)
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Short badge used in lists
    pub fn badge(&self) -> &'static str {
        match self {
            MediaType::Movie => "MOVIE",
            MediaType::Tv => "TV",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("unknown media type: {}", other)),
        }
    }
}

/// Identity of a title across the catalog: TMDB ids are only unique per media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaKey {
    pub id: u64,
    pub media_type: MediaType,
}

impl MediaKey {
    pub fn new(id: u64, media_type: MediaType) -> Self {
        Self { id, media_type }
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.media_type.as_str(), self.id)
    }
}

/// Normalized catalog item (movie or TV show) from any TMDB list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub year: Option<u16>,
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    pub genre_ids: Vec<u32>,
    pub adult: bool,
    pub original_language: String,
}

impl Media {
    pub fn key(&self) -> MediaKey {
        MediaKey::new(self.id, self.media_type)
    }

    /// Release year as display text, empty when unknown
    pub fn release_year(&self) -> String {
        self.year.map(|y| y.to_string()).unwrap_or_default()
    }

    /// Bare entry for a title only known from local storage
    fn saved(
        key: MediaKey,
        title: &str,
        poster_path: Option<&String>,
        backdrop_path: Option<&String>,
    ) -> Self {
        Self {
            id: key.id,
            media_type: key.media_type,
            title: title.to_string(),
            original_title: None,
            overview: String::new(),
            poster_path: poster_path.cloned(),
            backdrop_path: backdrop_path.cloned(),
            release_date: None,
            year: None,
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            genre_ids: Vec::new(),
            adult: false,
            original_language: String::new(),
        }
    }
}

impl From<&WatchlistItem> for Media {
    fn from(item: &WatchlistItem) -> Self {
        Media::saved(
            item.key(),
            &item.title,
            item.poster_path.as_ref(),
            item.backdrop_path.as_ref(),
        )
    }
}

impl From<&ContinueWatchingItem> for Media {
    fn from(item: &ContinueWatchingItem) -> Self {
        Media::saved(
            item.key(),
            &item.title,
            item.poster_path.as_ref(),
            item.backdrop_path.as_ref(),
        )
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.media_type)
    }
}

/// One page of a paginated TMDB listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

/// A titled row of catalog items on a browse page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub show_rank: bool,
    pub items: Vec<Media>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, items: Vec<Media>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            show_rank: false,
            items,
        }
    }
}

/// Multi-search results split by media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub movies: Vec<Media>,
    pub tv_shows: Vec<Media>,
    pub total_results: u32,
}

impl SearchResults {
    /// Split a list of results, keeping relative order inside each group
    pub fn from_results(results: Vec<Media>, total_results: u32) -> Self {
        let (movies, tv_shows) = results
            .into_iter()
            .partition(|m| m.media_type == MediaType::Movie);
        Self {
            movies,
            tv_shows,
            total_results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.tv_shows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movies.len() + self.tv_shows.len()
    }

    /// All results, movies first
    pub fn all(&self) -> impl Iterator<Item = &Media> {
        self.movies.iter().chain(self.tv_shows.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub english_name: String,
}

/// Summary of a TV season (season 0 "Specials" is never kept)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
}

impl fmt::Display for SeasonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("Season");
        write!(f, "{} ({} episodes)", name, self.episode_count)
    }
}

/// Video reference (trailer, teaser, clip) hosted by a third party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub iso_639_1: Option<String>,
    #[serde(default)]
    pub iso_3166_1: Option<String>,
}

impl Video {
    pub fn is_youtube(&self) -> bool {
        self.site == "YouTube"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub known_for_department: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Top-billed cast in billing order
    pub fn top_cast(&self, n: usize) -> Vec<&CastMember> {
        let mut cast: Vec<&CastMember> = self.cast.iter().collect();
        cast.sort_by_key(|c| c.order);
        cast.truncate(n);
        cast
    }

    /// Directors (movies) or creators listed under the Directing department
    pub fn directors(&self) -> Vec<&str> {
        self.crew
            .iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Full movie or TV show detail, with videos/credits/similar/recommendations appended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDetail {
    #[serde(flatten)]
    pub media: Media,
    /// Minutes (movie runtime, or first episode runtime for TV)
    pub runtime: Option<u32>,
    pub status: String,
    pub tagline: Option<String>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub genres: Vec<Genre>,
    pub production_companies: Vec<ProductionCompany>,
    pub production_countries: Vec<ProductionCountry>,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub seasons: Vec<SeasonSummary>,
    pub videos: Vec<Video>,
    pub credits: Credits,
    pub similar: Vec<Media>,
    pub recommendations: Vec<Media>,
}

impl MediaDetail {
    pub fn key(&self) -> MediaKey {
        self.media.key()
    }

    pub fn title(&self) -> &str {
        &self.media.title
    }

    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Runtime as "2h 15m", when known
    pub fn runtime_str(&self) -> Option<String> {
        self.runtime.filter(|m| *m > 0).map(format_runtime)
    }

    /// Similar titles followed by recommendations
    pub fn related(&self) -> impl Iterator<Item = &Media> {
        self.similar.iter().chain(self.recommendations.iter())
    }
}

impl fmt::Display for MediaDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.media)?;
        if let Some(runtime) = self.runtime_str() {
            write!(f, " - {}", runtime)?;
        }
        if let Some(seasons) = self.number_of_seasons {
            write!(f, " - {} seasons", seasons)?;
        }
        write!(f, " - ★ {}", format_rating(self.media.vote_average))
    }
}

// =============================================================================
// Account Models (local auth stub)
// =============================================================================

/// Content ceiling for a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaturityLevel {
    All,
    Pg,
    Pg13,
    #[default]
    R,
}

impl MaturityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            MaturityLevel::All => "All Ages",
            MaturityLevel::Pg => "PG",
            MaturityLevel::Pg13 => "PG-13",
            MaturityLevel::R => "R",
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MaturityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "").as_str() {
            "all" => Ok(MaturityLevel::All),
            "pg" => Ok(MaturityLevel::Pg),
            "pg13" => Ok(MaturityLevel::Pg13),
            "r" => Ok(MaturityLevel::R),
            other => Err(format!("unknown maturity level: {}", other)),
        }
    }
}

/// Named sub-identity under the local account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    /// Avatar color as a `#RRGGBB` hex string
    pub avatar: String,
    pub is_kids: bool,
    pub maturity_level: MaturityLevel,
}

impl UserProfile {
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// Profile fields supplied when creating a profile (the id is generated)
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub name: String,
    pub avatar: String,
    pub is_kids: bool,
    pub maturity_level: MaturityLevel,
}

/// The local "account"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub profiles: Vec<UserProfile>,
    pub active_profile_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self, id: &str) -> Option<&UserProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }
}

// =============================================================================
// Library Models (watchlist / continue watching)
// =============================================================================

/// A title saved to the watchlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: u64,
    pub media_type: MediaType,
    pub added_at: DateTime<Utc>,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl WatchlistItem {
    pub fn from_media(media: &Media) -> Self {
        Self {
            id: media.id,
            media_type: media.media_type,
            added_at: Utc::now(),
            title: media.title.clone(),
            poster_path: media.poster_path.clone(),
            backdrop_path: media.backdrop_path.clone(),
        }
    }

    pub fn key(&self) -> MediaKey {
        MediaKey::new(self.id, self.media_type)
    }
}

/// A recently viewed title and how far into it the viewer got
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueWatchingItem {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// Percentage 0-100
    pub progress: u8,
    /// Playback position in seconds
    pub timestamp: u64,
    pub last_watched: DateTime<Utc>,
}

impl ContinueWatchingItem {
    pub fn from_media(media: &Media, progress: u8, timestamp: u64) -> Self {
        Self {
            id: media.id,
            media_type: media.media_type,
            title: media.title.clone(),
            poster_path: media.poster_path.clone(),
            backdrop_path: media.backdrop_path.clone(),
            progress: progress.min(100),
            timestamp,
            last_watched: Utc::now(),
        }
    }

    pub fn key(&self) -> MediaKey {
        MediaKey::new(self.id, self.media_type)
    }
}

impl fmt::Display for ContinueWatchingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}% @ {}",
            self.title,
            self.media_type,
            self.progress,
            format_clock(self.timestamp)
        )
    }
}

// =============================================================================
// Display Helpers
// =============================================================================

/// Format minutes as "45m", "2h" or "2h 15m"
pub fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours == 0 {
        format!("{}m", mins)
    } else if mins == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, mins)
    }
}

/// Format a vote average with one decimal
pub fn format_rating(rating: f32) -> String {
    format!("{:.1}", rating)
}

/// Format seconds as m:ss
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Truncate to `max_len` characters, appending "..." when cut
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut.trim_end())
}

/// Uppercased first letters of the first two words
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Rounded percentage of `current` over `total`, 0 when total is 0
pub fn calculate_progress(current: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = ((current as f64 / total as f64) * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

// =============================================================================
// Tests
// =============================================================================
