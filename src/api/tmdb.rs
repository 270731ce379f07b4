//! TMDB (The Movie Database) API client
//!
//! Listings, details, trailers and search for movies and TV shows, normalized
//! into the shared catalog models.
//! API docs: https://developer.themoviedb.org/docs

use futures::future::try_join_all;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{SectionDef, SectionSource, TimeWindow, TrendingScope};
use crate::models::{
    Credits, Genre, Media, MediaDetail, MediaType, Page, ProductionCompany, ProductionCountry,
    SearchResults, SeasonSummary, Section, SpokenLanguage, Video,
};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const UNKNOWN_TITLE: &str = "Unknown Title";

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Invalid or missing API key (401)")]
    Unauthorized,

    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl TmdbError {
    /// Transport-level failure (no usable HTTP status)
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            TmdbError::RequestFailed(_) | TmdbError::RateLimited | TmdbError::ServerError(_)
        )
    }
}

pub type TmdbResult<T> = std::result::Result<T, TmdbError>;

/// TMDB API client
#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    language: Option<String>,
    region: Option<String>,
    include_adult: bool,
    client: reqwest::Client,
    max_retries: u32,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: None,
            region: None,
            include_adult: false,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// Response language, e.g. `en-US`
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.is_empty());
        self
    }

    /// Region used by release-date based listings
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region.filter(|r| !r.is_empty());
        self
    }

    pub fn with_include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// GET with the api key appended, retrying on rate limits
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> TmdbResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut retries = 0;

        loop {
            let mut request = self
                .client
                .get(&url)
                .query(&[("api_key", self.api_key.as_str())])
                .header("Accept", "application/json");
            if let Some(language) = &self.language {
                request = request.query(&[("language", language.as_str())]);
            }
            if !params.is_empty() {
                request = request.query(params);
            }

            debug!(endpoint, "tmdb request");
            let response = request.send().await?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await?;
                    let parsed: T = serde_json::from_str(&body).map_err(|e| {
                        TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                    })?;
                    return Ok(parsed);
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(TmdbError::Unauthorized);
                }
                StatusCode::NOT_FOUND => {
                    return Err(TmdbError::NotFound);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(TmdbError::RateLimited);
                    }

                    // Retry-After header, else exponential backoff
                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    warn!(endpoint, wait_secs, retries, "tmdb rate limited");
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                    continue;
                }
                status => {
                    return Err(TmdbError::ServerError(status.as_u16()));
                }
            }
        }
    }

    async fn get_page(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        scope: Option<MediaType>,
    ) -> TmdbResult<Page<Media>> {
        let raw: PageRaw = self.get(endpoint, params).await?;
        Ok(raw.into_page(scope))
    }

    fn region_params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", page.to_string())];
        if let Some(region) = &self.region {
            params.push(("region", region.clone()));
        }
        params
    }

    // -------------------------------------------------------------------------
    // Listings
    // -------------------------------------------------------------------------

    /// Trending titles for a scope and time window
    pub async fn trending(&self, scope: TrendingScope, window: TimeWindow) -> TmdbResult<Page<Media>> {
        let endpoint = format!("/trending/{}/{}", scope.as_str(), window.as_str());
        let stamp = match scope {
            TrendingScope::All => None,
            TrendingScope::Movie => Some(MediaType::Movie),
            TrendingScope::Tv => Some(MediaType::Tv),
        };
        self.get_page(&endpoint, &[], stamp).await
    }

    pub async fn popular(&self, media_type: MediaType, page: u32) -> TmdbResult<Page<Media>> {
        let endpoint = format!("/{}/popular", media_type.as_str());
        self.get_page(&endpoint, &[("page", page.to_string())], Some(media_type))
            .await
    }

    pub async fn top_rated(&self, media_type: MediaType, page: u32) -> TmdbResult<Page<Media>> {
        let endpoint = format!("/{}/top_rated", media_type.as_str());
        self.get_page(&endpoint, &[("page", page.to_string())], Some(media_type))
            .await
    }

    /// Movies in theaters, or TV shows currently on the air
    pub async fn now_playing(&self, media_type: MediaType) -> TmdbResult<Page<Media>> {
        let endpoint = match media_type {
            MediaType::Movie => "/movie/now_playing",
            MediaType::Tv => "/tv/on_the_air",
        };
        self.get_page(endpoint, &self.region_params(1), Some(media_type))
            .await
    }

    pub async fn upcoming(&self) -> TmdbResult<Page<Media>> {
        self.get_page("/movie/upcoming", &self.region_params(1), Some(MediaType::Movie))
            .await
    }

    /// Titles with a genre, most popular first
    pub async fn discover_by_genre(
        &self,
        media_type: MediaType,
        genre_id: u32,
        page: u32,
    ) -> TmdbResult<Page<Media>> {
        let endpoint = format!("/discover/{}", media_type.as_str());
        let params = [
            ("with_genres", genre_id.to_string()),
            ("page", page.to_string()),
            ("sort_by", "popularity.desc".to_string()),
            ("include_adult", self.include_adult.to_string()),
        ];
        self.get_page(&endpoint, &params, Some(media_type)).await
    }

    pub async fn similar(&self, media_type: MediaType, id: u64) -> TmdbResult<Page<Media>> {
        let endpoint = format!("/{}/{}/similar", media_type.as_str(), id);
        self.get_page(&endpoint, &[], Some(media_type)).await
    }

    pub async fn recommendations(&self, media_type: MediaType, id: u64) -> TmdbResult<Page<Media>> {
        let endpoint = format!("/{}/{}/recommendations", media_type.as_str(), id);
        self.get_page(&endpoint, &[], Some(media_type)).await
    }

    // -------------------------------------------------------------------------
    // Details
    // -------------------------------------------------------------------------

    /// Full detail with videos, credits, similar and recommendations appended
    pub async fn details(&self, media_type: MediaType, id: u64) -> TmdbResult<MediaDetail> {
        let endpoint = format!("/{}/{}", media_type.as_str(), id);
        let params = [(
            "append_to_response",
            "videos,credits,similar,recommendations".to_string(),
        )];
        let raw: DetailRaw = self.get(&endpoint, &params).await?;
        Ok(raw.into_detail(media_type))
    }

    pub async fn videos(&self, media_type: MediaType, id: u64) -> TmdbResult<Vec<Video>> {
        let endpoint = format!("/{}/{}/videos", media_type.as_str(), id);
        let raw: VideosRaw = self.get(&endpoint, &[]).await?;
        Ok(raw.results)
    }

    pub async fn credits(&self, media_type: MediaType, id: u64) -> TmdbResult<Credits> {
        let endpoint = format!("/{}/{}/credits", media_type.as_str(), id);
        self.get(&endpoint, &[]).await
    }

    /// Official genre list
    pub async fn genres(&self, media_type: MediaType) -> TmdbResult<Vec<Genre>> {
        let endpoint = format!("/genre/{}/list", media_type.as_str());
        let raw: GenresRaw = self.get(&endpoint, &[]).await?;
        Ok(raw.genres)
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Movies and TV shows matching a query (people are dropped)
    pub async fn search_multi(&self, query: &str, page: u32) -> TmdbResult<Page<Media>> {
        let params = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ];
        self.get_page("/search/multi", &params, None).await
    }

    pub async fn search_movies(&self, query: &str, page: u32) -> TmdbResult<Page<Media>> {
        let params = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ];
        self.get_page("/search/movie", &params, Some(MediaType::Movie))
            .await
    }

    pub async fn search_tv(&self, query: &str, page: u32) -> TmdbResult<Page<Media>> {
        let params = [("query", query.to_string()), ("page", page.to_string())];
        self.get_page("/search/tv", &params, Some(MediaType::Tv)).await
    }

    /// First page of a search limited to one media type
    pub async fn search_typed(&self, query: &str, media_type: MediaType) -> TmdbResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }
        let page = match media_type {
            MediaType::Movie => self.search_movies(query, 1).await?,
            MediaType::Tv => self.search_tv(query, 1).await?,
        };
        Ok(SearchResults::from_results(page.results, page.total_results))
    }

    /// First page of a multi search, split into movies and TV shows
    pub async fn search(&self, query: &str) -> TmdbResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }
        let page = self.search_multi(query, 1).await?;
        Ok(SearchResults::from_results(page.results, page.total_results))
    }

    // -------------------------------------------------------------------------
    // Browse rows
    // -------------------------------------------------------------------------

    /// Fetch the first page behind one row definition
    pub async fn fetch_section(&self, def: &SectionDef) -> TmdbResult<Section> {
        let page = match def.source {
            SectionSource::Trending { scope, window } => self.trending(scope, window).await?,
            SectionSource::Popular(media_type) => self.popular(media_type, 1).await?,
            SectionSource::TopRated(media_type) => self.top_rated(media_type, 1).await?,
            SectionSource::NowPlaying(media_type) => self.now_playing(media_type).await?,
            SectionSource::Upcoming => self.upcoming().await?,
            SectionSource::Genre {
                media_type,
                genre_id,
            } => self.discover_by_genre(media_type, genre_id, 1).await?,
        };
        Ok(Section {
            id: def.id.to_string(),
            title: def.title.to_string(),
            show_rank: def.show_rank,
            items: page.results,
        })
    }

    /// Fetch all rows concurrently; any failure fails the whole page
    pub async fn fetch_sections(&self, defs: &[SectionDef]) -> TmdbResult<Vec<Section>> {
        try_join_all(defs.iter().map(|def| self.fetch_section(def))).await
    }
}

/// Pick the trailer to show: official YouTube trailer, then any YouTube
/// trailer, then a YouTube teaser, then any YouTube video
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    let youtube = || videos.iter().filter(|v| v.is_youtube());
    youtube()
        .find(|v| v.kind == "Trailer" && v.official)
        .or_else(|| youtube().find(|v| v.kind == "Trailer"))
        .or_else(|| youtube().find(|v| v.kind == "Teaser"))
        .or_else(|| youtube().next())
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct PageRaw {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default)]
    results: Vec<MediaRaw>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl PageRaw {
    fn into_page(self, scope: Option<MediaType>) -> Page<Media> {
        Page {
            page: self.page,
            results: into_media_list(self.results, scope),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

fn into_media_list(raw: Vec<MediaRaw>, scope: Option<MediaType>) -> Vec<Media> {
    raw.into_iter().filter_map(|r| r.into_media(scope)).collect()
}

#[derive(Debug, Default, Deserialize)]
struct MediaRaw {
    id: u64,
    #[serde(default)]
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    original_title: Option<String>,
    #[serde(default)]
    original_name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
    #[serde(default)]
    vote_average: Option<f32>,
    #[serde(default)]
    vote_count: Option<u32>,
    #[serde(default)]
    popularity: Option<f32>,
    #[serde(default)]
    genre_ids: Vec<u32>,
    #[serde(default)]
    adult: bool,
    #[serde(default)]
    original_language: Option<String>,
}

impl MediaRaw {
    /// Resolve the media type: explicit field, then the endpoint's scope,
    /// then movie when a title is present
    fn resolve_media_type(&self, scope: Option<MediaType>) -> Option<MediaType> {
        match self.media_type.as_deref() {
            Some("movie") => Some(MediaType::Movie),
            Some("tv") => Some(MediaType::Tv),
            // "person" and anything else
            Some(_) => None,
            None => Some(scope.unwrap_or(if non_empty(&self.title).is_some() {
                MediaType::Movie
            } else {
                MediaType::Tv
            })),
        }
    }

    fn into_media(self, scope: Option<MediaType>) -> Option<Media> {
        let media_type = self.resolve_media_type(scope)?;

        let title = non_empty(&self.title)
            .or_else(|| non_empty(&self.name))
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();
        let release_date = non_empty(&self.release_date)
            .or_else(|| non_empty(&self.first_air_date))
            .map(str::to_string);
        let year = release_date.as_deref().and_then(extract_year);

        Some(Media {
            id: self.id,
            media_type,
            title,
            original_title: self.original_title.or(self.original_name),
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path.filter(|p| !p.is_empty()),
            backdrop_path: self.backdrop_path.filter(|p| !p.is_empty()),
            release_date,
            year,
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            popularity: self.popularity.unwrap_or(0.0),
            genre_ids: self.genre_ids,
            adult: self.adult,
            original_language: self.original_language.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct DetailRaw {
    #[serde(flatten)]
    base: MediaRaw,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    budget: Option<u64>,
    #[serde(default)]
    revenue: Option<u64>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    imdb_id: Option<String>,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    number_of_seasons: Option<u32>,
    #[serde(default)]
    number_of_episodes: Option<u32>,
    #[serde(default)]
    seasons: Vec<SeasonSummary>,
    #[serde(default)]
    videos: Option<VideosRaw>,
    #[serde(default)]
    credits: Option<Credits>,
    #[serde(default)]
    similar: Option<PageRaw>,
    #[serde(default)]
    recommendations: Option<PageRaw>,
}

impl DetailRaw {
    fn into_detail(self, media_type: MediaType) -> MediaDetail {
        let mut base = self.base;
        // The detail endpoint is already scoped
        base.media_type = None;
        if base.genre_ids.is_empty() {
            base.genre_ids = self.genres.iter().map(|g| g.id).collect();
        }
        let media = base
            .into_media(Some(media_type))
            .unwrap_or_else(|| placeholder_media(media_type));

        let runtime = self
            .runtime
            .or_else(|| self.episode_run_time.first().copied())
            .filter(|m| *m > 0);

        // Filter out specials (season 0)
        let seasons = self
            .seasons
            .into_iter()
            .filter(|s| s.season_number > 0)
            .collect();

        MediaDetail {
            media,
            runtime,
            status: self.status.unwrap_or_default(),
            tagline: self.tagline.filter(|t| !t.is_empty()),
            budget: self.budget.filter(|b| *b > 0),
            revenue: self.revenue.filter(|r| *r > 0),
            homepage: self.homepage.filter(|h| !h.is_empty()),
            imdb_id: self.imdb_id.filter(|i| !i.is_empty()),
            genres: self.genres,
            production_companies: self.production_companies,
            production_countries: self.production_countries,
            spoken_languages: self.spoken_languages,
            number_of_seasons: self.number_of_seasons,
            number_of_episodes: self.number_of_episodes,
            seasons,
            videos: self.videos.map(|v| v.results).unwrap_or_default(),
            credits: self.credits.unwrap_or_default(),
            similar: self
                .similar
                .map(|p| into_media_list(p.results, Some(media_type)))
                .unwrap_or_default(),
            recommendations: self
                .recommendations
                .map(|p| into_media_list(p.results, Some(media_type)))
                .unwrap_or_default(),
        }
    }
}

fn placeholder_media(media_type: MediaType) -> Media {
    Media {
        id: 0,
        media_type,
        title: UNKNOWN_TITLE.to_string(),
        original_title: None,
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
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

#[derive(Debug, Default, Deserialize)]
struct VideosRaw {
    #[serde(default)]
    results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct GenresRaw {
    #[serde(default)]
    genres: Vec<Genre>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Extract year from a date string like "2022-03-04"
fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(key: &str, site: &str, kind: &str, official: bool) -> Video {
        Video {
            id: key.to_string(),
            key: key.to_string(),
            name: key.to_string(),
            site: site.to_string(),
            kind: kind.to_string(),
            official,
            size: 1080,
            published_at: None,
            iso_639_1: None,
            iso_3166_1: None,
        }
    }

    fn raw(title: Option<&str>, name: Option<&str>, media_type: Option<&str>) -> MediaRaw {
        MediaRaw {
            id: 1,
            media_type: media_type.map(str::to_string),
            title: title.map(str::to_string),
            name: name.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2022-03-04"), Some(2022));
        assert_eq!(extract_year("2019-11-12"), Some(2019));
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("abc"), None);
    }

    #[test]
    fn test_media_type_filter() {
        assert!(raw(Some("Test"), None, Some("movie")).into_media(None).is_some());
        assert!(raw(None, Some("Actor"), Some("person")).into_media(None).is_none());
    }

    #[test]
    fn test_media_type_inference() {
        let movie = raw(Some("Film"), None, None).into_media(None).unwrap();
        assert_eq!(movie.media_type, MediaType::Movie);

        let tv = raw(None, Some("Show"), None).into_media(None).unwrap();
        assert_eq!(tv.media_type, MediaType::Tv);

        // Explicit type beats the endpoint scope
        let explicit = raw(Some("Film"), None, Some("tv"))
            .into_media(Some(MediaType::Movie))
            .unwrap();
        assert_eq!(explicit.media_type, MediaType::Tv);

        // Scope beats the title heuristic
        let scoped = raw(Some("Film"), None, None)
            .into_media(Some(MediaType::Tv))
            .unwrap();
        assert_eq!(scoped.media_type, MediaType::Tv);
    }

    #[test]
    fn test_title_fallback() {
        let media = raw(None, None, Some("movie")).into_media(None).unwrap();
        assert_eq!(media.title, "Unknown Title");

        let empty = raw(Some(""), Some("Named"), None).into_media(None).unwrap();
        assert_eq!(empty.title, "Named");
        assert_eq!(empty.media_type, MediaType::Tv);
    }

    #[test]
    fn test_select_trailer_priority() {
        let videos = vec![
            video("clip", "YouTube", "Clip", true),
            video("teaser", "YouTube", "Teaser", true),
            video("vimeo", "Vimeo", "Trailer", true),
            video("trailer", "YouTube", "Trailer", false),
            video("official", "YouTube", "Trailer", true),
        ];
        assert_eq!(select_trailer(&videos).map(|v| v.key.as_str()), Some("official"));
        assert_eq!(select_trailer(&videos[..4]).map(|v| v.key.as_str()), Some("trailer"));
        assert_eq!(select_trailer(&videos[..3]).map(|v| v.key.as_str()), Some("teaser"));
        assert_eq!(select_trailer(&videos[..1]).map(|v| v.key.as_str()), Some("clip"));
        assert!(select_trailer(&videos[2..3]).is_none());
        assert!(select_trailer(&[]).is_none());
    }

    #[test]
    fn test_detail_runtime_and_seasons() {
        let json = r#"{
            "id": 1396,
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "episode_run_time": [45, 47],
            "genres": [{"id": 18, "name": "Drama"}],
            "seasons": [
                {"season_number": 0, "episode_count": 9, "name": "Specials"},
                {"season_number": 1, "episode_count": 7, "name": "Season 1"}
            ],
            "number_of_seasons": 5
        }"#;
        let raw: DetailRaw = serde_json::from_str(json).unwrap();
        let detail = raw.into_detail(MediaType::Tv);
        assert_eq!(detail.media.title, "Breaking Bad");
        assert_eq!(detail.media.year, Some(2008));
        assert_eq!(detail.media.genre_ids, vec![18]);
        assert_eq!(detail.runtime, Some(45));
        assert_eq!(detail.seasons.len(), 1);
        assert_eq!(detail.seasons[0].season_number, 1);
        assert!(detail.videos.is_empty());
    }
}
