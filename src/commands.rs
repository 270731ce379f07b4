//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the TMDB client and the local store.
//! Each handler takes CLI args, a context and Output, returns ExitCode.

use std::path::PathBuf;

use crate::api::{
    image_url, select_trailer, youtube_embed_url, youtube_watch_url, ImageKind, ImageSize,
    TmdbClient, TmdbError,
};
use crate::app::WatchSession;
use crate::catalog::{genres_for, is_kids_friendly, random_avatar_color, sections_for, NavTarget};
use crate::cli::{
    self, AccountResponse, Cli, ConfigCmd, ConfigResponse, ContinueAction, ContinueCmd, CreditsCmd, DiscoverCmd,
    ExitCode, GenresCmd, HomeCmd, InfoCmd, ListCmd, Output, ProfileEntry, ProfilesAction,
    ProfilesCmd, RelatedCmd, SearchCmd, SignInCmd, SignOutCmd, SignUpCmd, StatusOk, TitleArgs,
    TrailerCmd, TrailerResponse, TrendingCmd, UpcomingCmd, WatchCmd, WatchResponse, WatchlistCmd,
};
use crate::config::Config;
use crate::launcher::{LauncherError, TrailerLauncher};
use crate::models::*;
use crate::store::{
    check_sign_in, check_sign_up, AuthError, ContinueWatchingAction, Store, UserAction,
    WatchlistAction,
};

// =============================================================================
// Context
// =============================================================================

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    pub data_dir: PathBuf,
    /// Where `config` writes settings
    pub config_path: Option<PathBuf>,
    base_url: Option<String>,
}

impl CommandContext {
    pub fn new(config: Config, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            data_dir: data_dir.into(),
            config_path: None,
            base_url: None,
        }
    }

    /// Resolve config and data directory from the global flags
    pub fn from_cli(cli: &Cli) -> Self {
        let config_path = cli.config.clone().or_else(Config::path);
        let config = config_path
            .as_deref()
            .map(Config::load_from)
            .unwrap_or_default();
        let data_dir = config.data_dir(cli.data_dir.as_deref());
        Self::new(config, data_dir).with_config_path(config_path)
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Send TMDB requests to another server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn client(&self) -> Option<TmdbClient> {
        let key = self.config.tmdb_api_key()?;
        let client = match &self.base_url {
            Some(url) => TmdbClient::with_base_url(key, url.clone()),
            None => TmdbClient::new(key),
        };
        Some(self.config.configure(client))
    }

    pub fn store(&self) -> Store {
        Store::open(&self.data_dir)
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

fn require_client(ctx: &CommandContext, output: &Output) -> Result<TmdbClient, ExitCode> {
    ctx.client().ok_or_else(|| {
        output.error(
            format!(
                "No TMDB API key. Set {} or add tmdb_api_key to {}",
                crate::config::API_KEY_ENV,
                Config::path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.toml".into())
            ),
            ExitCode::Error,
        )
    })
}

fn require_auth(store: &Store, output: &Output) -> Result<(), ExitCode> {
    if store.is_authenticated() {
        Ok(())
    } else {
        Err(output.error(
            "Not signed in. Run `flixtui signin <email>` or `flixtui signup <email> <name>`",
            ExitCode::NotAuthenticated,
        ))
    }
}

/// Map a TMDB failure to a message and exit code
fn api_error(output: &Output, what: &str, e: TmdbError) -> ExitCode {
    let code = match &e {
        TmdbError::NotFound => ExitCode::NotFound,
        e if e.is_network() => ExitCode::NetworkError,
        _ => ExitCode::Error,
    };
    output.error(format!("{} failed: {}", what, e), code)
}

fn print_or_fail<T: serde::Serialize>(output: &Output, data: T, lines: &[String]) -> ExitCode {
    match output.print_lines(data, lines) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn kids_filter(kids: bool, items: Vec<Media>) -> Vec<Media> {
    if kids {
        items.into_iter().filter(is_kids_friendly).collect()
    } else {
        items
    }
}

fn media_line(index: usize, media: &Media) -> String {
    format!(
        "{:>3}. {} [{}] ★ {}",
        index + 1,
        media,
        media.id,
        format_rating(media.vote_average)
    )
}

fn media_lines(items: &[Media]) -> Vec<String> {
    if items.is_empty() {
        return vec!["No results".into()];
    }
    items
        .iter()
        .enumerate()
        .map(|(i, m)| media_line(i, m))
        .collect()
}

/// Print one paged listing after kids filtering and truncation
fn print_listing(
    ctx: &CommandContext,
    output: &Output,
    what: &str,
    result: Result<Page<Media>, TmdbError>,
    limit: usize,
) -> ExitCode {
    match result {
        Ok(page) => {
            let kids = ctx.store().user.is_kids_mode();
            let mut items = kids_filter(kids, page.results);
            items.truncate(limit);
            let lines = media_lines(&items);
            print_or_fail(output, &items, &lines)
        }
        Err(e) => api_error(output, what, e),
    }
}

async fn fetch_media(client: &TmdbClient, title: &TitleArgs) -> Result<MediaDetail, TmdbError> {
    client.details(title.media_type(), title.id).await
}

fn account_response(store: &Store) -> Option<AccountResponse> {
    let user = store.user.user.as_ref()?;
    Some(AccountResponse {
        email: user.email.clone(),
        name: user.name.clone(),
        created_at: user.created_at,
        active_profile: store.active_profile().cloned(),
        profiles: user.profiles.len(),
        watchlist: store.watchlist.items.len(),
        continue_watching: store.continue_watching.items.len(),
    })
}

fn account_lines(account: &AccountResponse) -> Vec<String> {
    vec![
        format!("{} <{}>", account.name, account.email),
        format!(
            "Profile: {}",
            account
                .active_profile
                .as_ref()
                .map(|p| p.name.as_str())
                .unwrap_or("(none selected)")
        ),
        format!(
            "Profiles: {}  My List: {}  Continue Watching: {}",
            account.profiles, account.watchlist, account.continue_watching
        ),
    ]
}

// =============================================================================
// Catalog Commands
// =============================================================================

pub async fn home_cmd(cmd: HomeCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let target = NavTarget::from(cmd.page);
    output.info(format!("Loading {:?} rows...", target));

    let sections = match client.fetch_sections(sections_for(target)).await {
        Ok(s) => s,
        Err(e) => return api_error(output, "Loading rows", e),
    };

    let store = ctx.store();
    let kids = store.user.is_kids_mode();
    let mut rows: Vec<Section> = sections
        .into_iter()
        .map(|mut s| {
            s.items = kids_filter(kids, s.items);
            s.items.truncate(cmd.limit);
            s
        })
        .collect();

    if target == NavTarget::Home && store.is_authenticated() {
        let mut items: Vec<Media> = store
            .continue_watching
            .items
            .iter()
            .map(Media::from)
            .collect();
        items.truncate(cmd.limit);
        if !items.is_empty() {
            let title = match store.active_profile() {
                Some(profile) => format!("Continue Watching for {}", profile.name),
                None => "Continue Watching".to_string(),
            };
            rows.insert(0, Section::new(crate::app::CONTINUE_ROW_ID, title, items));
        }
    }

    let mut lines = Vec::new();
    for row in &rows {
        lines.push(format!("== {} ==", row.title));
        lines.extend(media_lines(&row.items));
        lines.push(String::new());
    }
    print_or_fail(output, &rows, &lines)
}

pub async fn trending_cmd(cmd: TrendingCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let window = crate::catalog::TimeWindow::from(cmd.window);
    output.info(format!("Fetching trending ({})...", window.as_str()));

    let result = client.trending(cmd.scope(), window).await;
    print_listing(ctx, output, "Trending", result, cmd.limit)
}

pub async fn popular_cmd(cmd: ListCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let result = client.popular(cmd.media_type.into(), cmd.page).await;
    print_listing(ctx, output, "Popular", result, cmd.limit)
}

pub async fn top_rated_cmd(cmd: ListCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let result = client.top_rated(cmd.media_type.into(), cmd.page).await;
    print_listing(ctx, output, "Top rated", result, cmd.limit)
}

pub async fn now_playing_cmd(cmd: ListCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let result = client.now_playing(cmd.media_type.into()).await;
    print_listing(ctx, output, "Now playing", result, cmd.limit)
}

pub async fn upcoming_cmd(cmd: UpcomingCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let result = client.upcoming().await;
    print_listing(ctx, output, "Upcoming", result, cmd.limit)
}

/// Genre id from a number or a case-insensitive name
pub fn resolve_genre(media_type: MediaType, genre: &str) -> Option<u32> {
    let genre = genre.trim();
    if let Ok(id) = genre.parse::<u32>() {
        return Some(id);
    }
    genres_for(media_type)
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(genre))
        .map(|(id, _)| *id)
}

pub async fn discover_cmd(cmd: DiscoverCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let media_type = MediaType::from(cmd.media_type);
    let Some(genre_id) = resolve_genre(media_type, &cmd.genre) else {
        return output.error(
            format!("Unknown {} genre: {}", media_type.as_str(), cmd.genre),
            ExitCode::InvalidArgs,
        );
    };
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let result = client.discover_by_genre(media_type, genre_id, cmd.page).await;
    print_listing(ctx, output, "Discover", result, cmd.limit)
}

pub async fn genres_cmd(cmd: GenresCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let media_type = MediaType::from(cmd.media_type);
    let genres: Vec<Genre> = if cmd.remote {
        let client = match require_client(ctx, output) {
            Ok(c) => c,
            Err(code) => return code,
        };
        match client.genres(media_type).await {
            Ok(g) => g,
            Err(e) => return api_error(output, "Loading genres", e),
        }
    } else {
        genres_for(media_type)
            .iter()
            .map(|(id, name)| Genre {
                id: *id,
                name: name.to_string(),
            })
            .collect()
    };

    let lines: Vec<String> = genres
        .iter()
        .map(|g| format!("{:>6}  {}", g.id, g.name))
        .collect();
    print_or_fail(output, &genres, &lines)
}

pub async fn search_cmd(cmd: SearchCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    output.info(format!("Searching for: {}", cmd.query));

    let searched = match cmd.media_type {
        Some(filter) => client.search_typed(&cmd.query, filter.into()).await,
        None => client.search(&cmd.query).await,
    };
    let mut results = match searched {
        Ok(r) => r,
        Err(e) => return api_error(output, "Search", e),
    };

    let kids = ctx.store().user.is_kids_mode();
    let in_years = |m: &Media| {
        cmd.year_from.map_or(true, |from| m.year.is_some_and(|y| y >= from))
            && cmd.year_to.map_or(true, |to| m.year.is_some_and(|y| y <= to))
    };
    let keep = |items: Vec<Media>| -> Vec<Media> {
        kids_filter(kids, items).into_iter().filter(|m| in_years(m)).collect()
    };
    results.movies = keep(std::mem::take(&mut results.movies));
    results.tv_shows = keep(std::mem::take(&mut results.tv_shows));

    results.movies.truncate(cmd.limit);
    results
        .tv_shows
        .truncate(cmd.limit.saturating_sub(results.movies.len()));

    let mut lines = Vec::new();
    if results.is_empty() {
        lines.push(format!("No results for \"{}\"", cmd.query));
    }
    if !results.movies.is_empty() {
        lines.push(format!("Movies ({})", results.movies.len()));
        lines.extend(media_lines(&results.movies));
    }
    if !results.tv_shows.is_empty() {
        lines.push(format!("TV Shows ({})", results.tv_shows.len()));
        lines.extend(media_lines(&results.tv_shows));
    }
    print_or_fail(output, &results, &lines)
}

pub async fn info_cmd(cmd: InfoCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    output.info(format!(
        "Fetching {} {}...",
        cmd.title.media_type().as_str(),
        cmd.title.id
    ));

    let detail = match fetch_media(&client, &cmd.title).await {
        Ok(d) => d,
        Err(e) => return api_error(output, "Details", e),
    };

    let mut lines = vec![detail.to_string()];
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("\"{}\"", tagline));
    }
    if !detail.genres.is_empty() {
        lines.push(format!("Genres: {}", detail.genre_names()));
    }
    let directors = detail.credits.directors();
    if !directors.is_empty() {
        lines.push(format!("Director: {}", directors.join(", ")));
    }
    let cast: Vec<&str> = detail
        .credits
        .top_cast(5)
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    if !cast.is_empty() {
        lines.push(format!("Cast: {}", cast.join(", ")));
    }
    if !detail.media.overview.is_empty() {
        lines.push(String::new());
        lines.push(detail.media.overview.clone());
    }
    lines.push(String::new());
    if detail.media.poster_path.is_some() {
        lines.push(format!(
            "Poster: {}",
            image_url(detail.media.poster_path.as_deref(), ImageKind::Poster, ImageSize::Large)
        ));
    }
    if detail.media.backdrop_path.is_some() {
        lines.push(format!(
            "Backdrop: {}",
            image_url(
                detail.media.backdrop_path.as_deref(),
                ImageKind::Backdrop,
                ImageSize::Original
            )
        ));
    }
    if let Some(trailer) = select_trailer(&detail.videos) {
        lines.push(format!("Trailer: {}", youtube_watch_url(&trailer.key)));
    }
    print_or_fail(output, &detail, &lines)
}

pub async fn videos_cmd(cmd: InfoCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let videos = match client.videos(cmd.title.media_type(), cmd.title.id).await {
        Ok(v) => v,
        Err(e) => return api_error(output, "Videos", e),
    };

    let best = select_trailer(&videos).map(|v| v.key.clone());
    let lines: Vec<String> = if videos.is_empty() {
        vec!["No videos".into()]
    } else {
        videos
            .iter()
            .map(|v| {
                let marker = if best.as_deref() == Some(v.key.as_str()) { "*" } else { " " };
                let location = if v.is_youtube() {
                    youtube_watch_url(&v.key)
                } else {
                    format!("{} {}", v.site, v.key)
                };
                format!("{} {} ({}) {}", marker, v.name, v.kind, location)
            })
            .collect()
    };
    print_or_fail(output, &videos, &lines)
}

/// Crew jobs shown by `credits`
const KEY_CREW_JOBS: &[&str] = &[
    "Director",
    "Screenplay",
    "Writer",
    "Creator",
    "Original Music Composer",
];

pub async fn credits_cmd(cmd: CreditsCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let mut credits = match client.credits(cmd.title.media_type(), cmd.title.id).await {
        Ok(c) => c,
        Err(e) => return api_error(output, "Credits", e),
    };
    credits.cast = credits
        .top_cast(cmd.limit)
        .into_iter()
        .cloned()
        .collect();
    credits
        .crew
        .retain(|c| KEY_CREW_JOBS.contains(&c.job.as_str()));

    let mut lines = Vec::new();
    if !credits.cast.is_empty() {
        lines.push("Cast".to_string());
        lines.extend(credits.cast.iter().map(|c| match c.character.as_str() {
            "" => format!("  {}", c.name),
            character => format!("  {} as {}", c.name, character),
        }));
    }
    if !credits.crew.is_empty() {
        lines.push("Crew".to_string());
        lines.extend(
            credits
                .crew
                .iter()
                .map(|c| format!("  {} ({})", c.name, c.job)),
        );
    }
    if lines.is_empty() {
        lines.push("No credits".into());
    }
    print_or_fail(output, &credits, &lines)
}

pub async fn similar_cmd(cmd: RelatedCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let result = client.similar(cmd.title.media_type(), cmd.title.id).await;
    print_listing(ctx, output, "Similar titles", result, cmd.limit)
}

pub async fn recommended_cmd(cmd: RelatedCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let result = client
        .recommendations(cmd.title.media_type(), cmd.title.id)
        .await;
    print_listing(ctx, output, "Recommendations", result, cmd.limit)
}

pub async fn trailer_cmd(cmd: TrailerCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let detail = match fetch_media(&client, &cmd.title).await {
        Ok(d) => d,
        Err(e) => return api_error(output, "Trailer lookup", e),
    };
    let Some(trailer) = select_trailer(&detail.videos).cloned() else {
        return output.error(
            format!("No trailer found for {}", detail.title()),
            ExitCode::NotFound,
        );
    };

    let watch_url = youtube_watch_url(&trailer.key);
    let mut opened = false;
    if cmd.open {
        let launcher = TrailerLauncher::new(cmd.with.into());
        if !launcher.is_available().await {
            return output.error(
                LauncherError::NotFound(launcher.kind().command().to_string()).to_string(),
                ExitCode::Error,
            );
        }
        match launcher.open(&watch_url) {
            Ok(_) => opened = true,
            Err(e) => return output.error(e.to_string(), ExitCode::Error),
        }
    }

    let muted = ctx.store().ui.is_muted;
    let response = TrailerResponse {
        title: detail.title().to_string(),
        key: trailer.key.clone(),
        name: trailer.name.clone(),
        kind: trailer.kind.clone(),
        official: trailer.official,
        watch_url: watch_url.clone(),
        embed_url: youtube_embed_url(&trailer.key, muted),
        opened,
    };
    let lines = vec![
        format!("{}: {} ({})", detail.title(), trailer.name, trailer.kind),
        watch_url,
    ];
    print_or_fail(output, &response, &lines)
}

// =============================================================================
// Config Command
// =============================================================================

pub fn config_cmd(cmd: ConfigCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let mut config = ctx.config.clone();
    let saved = cmd.has_changes();
    if saved {
        let Some(path) = ctx.config_path.as_deref() else {
            return output.error("Could not determine config path", ExitCode::Error);
        };
        if let Some(key) = cmd.api_key {
            config.tmdb_api_key = Some(key.trim().to_string()).filter(|k| !k.is_empty());
        }
        if let Some(language) = cmd.language {
            config.language = Some(language).filter(|l| !l.is_empty());
        }
        if let Some(region) = cmd.region {
            config.region = Some(region.to_uppercase()).filter(|r| !r.is_empty());
        }
        if let Some(include_adult) = cmd.include_adult {
            config.include_adult = include_adult;
        }
        if let Err(e) = config.save_to(path) {
            return output.error(format!("Saving config failed: {:#}", e), ExitCode::Error);
        }
        tracing::info!(path = %path.display(), "config saved");
    }

    let response = ConfigResponse {
        path: ctx.config_path.clone(),
        api_key_set: config.tmdb_api_key().is_some(),
        language: config.language.clone(),
        region: config.region.clone(),
        include_adult: config.include_adult,
        data_dir: ctx.data_dir.clone(),
        saved,
    };
    let unset = || "(not set)".to_string();
    let mut lines = Vec::new();
    if saved {
        lines.push("Config saved".to_string());
    }
    lines.extend([
        format!(
            "Config file: {}",
            response
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(unset)
        ),
        format!(
            "API key: {}",
            if response.api_key_set { "set" } else { "(not set)" }
        ),
        format!("Language: {}", response.language.clone().unwrap_or_else(unset)),
        format!("Region: {}", response.region.clone().unwrap_or_else(unset)),
        format!("Include adult: {}", response.include_adult),
        format!("Data dir: {}", response.data_dir.display()),
    ]);
    print_or_fail(output, &response, &lines)
}

// =============================================================================
// Account Commands
// =============================================================================

pub fn signup_cmd(cmd: SignUpCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    if let Err(e) = check_sign_up(&cmd.email, &cmd.name) {
        return output.error(e.to_string(), ExitCode::InvalidArgs);
    }
    let mut store = ctx.store();
    store.dispatch(UserAction::SignUp {
        email: cmd.email.trim().to_string(),
        name: cmd.name.trim().to_string(),
        password: cmd.password,
    });
    match account_response(&store) {
        Some(account) => {
            let lines = account_lines(&account);
            print_or_fail(output, &account, &lines)
        }
        None => output.error("Sign up failed", ExitCode::Error),
    }
}

pub fn signin_cmd(cmd: SignInCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let mut store = ctx.store();
    let email = cmd.email.trim().to_string();
    if let Err(e) = check_sign_in(store.storage(), &email) {
        let code = match e {
            AuthError::MissingEmail | AuthError::MissingName => ExitCode::InvalidArgs,
            AuthError::NoAccount | AuthError::InvalidCredentials => ExitCode::NotAuthenticated,
        };
        return output.error(e.to_string(), code);
    }
    if !store.dispatch(UserAction::SignIn {
        email,
        password: cmd.password,
    }) {
        return output.error(
            AuthError::InvalidCredentials.to_string(),
            ExitCode::NotAuthenticated,
        );
    }
    match account_response(&store) {
        Some(account) => {
            let lines = account_lines(&account);
            print_or_fail(output, &account, &lines)
        }
        None => output.error("Sign in failed", ExitCode::Error),
    }
}

pub fn signout_cmd(cmd: SignOutCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let mut store = ctx.store();
    if cmd.clear_data {
        store.clear_all_data();
        output.info("Cleared all local data");
    } else {
        store.dispatch(UserAction::SignOut);
    }
    print_or_fail(output, StatusOk::default(), &["Signed out".to_string()])
}

pub fn whoami_cmd(ctx: &CommandContext, output: &Output) -> ExitCode {
    let store = ctx.store();
    if let Err(code) = require_auth(&store, output) {
        return code;
    }
    match account_response(&store) {
        Some(account) => {
            let lines = account_lines(&account);
            print_or_fail(output, &account, &lines)
        }
        None => output.error("Not signed in", ExitCode::NotAuthenticated),
    }
}

/// Find a profile by exact id, then case-insensitive name
fn find_profile(store: &Store, needle: &str) -> Option<UserProfile> {
    let profiles = store.user.profiles();
    profiles
        .iter()
        .find(|p| p.id == needle)
        .or_else(|| profiles.iter().find(|p| p.name.eq_ignore_ascii_case(needle)))
        .cloned()
}

fn profile_line(profile: &UserProfile, active: bool) -> String {
    format!(
        "{} {} [{}]{}  {}",
        if active { "*" } else { " " },
        profile.name,
        profile.maturity_level,
        if profile.is_kids { " (kids)" } else { "" },
        profile.id
    )
}

pub fn profiles_cmd(cmd: ProfilesCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let mut store = ctx.store();
    if let Err(code) = require_auth(&store, output) {
        return code;
    }

    match cmd.action {
        ProfilesAction::List => {
            let active_id = store.active_profile().map(|p| p.id.clone());
            let entries: Vec<ProfileEntry> = store
                .user
                .profiles()
                .iter()
                .map(|p| ProfileEntry {
                    profile: p.clone(),
                    active: Some(&p.id) == active_id.as_ref(),
                })
                .collect();
            let lines: Vec<String> = entries
                .iter()
                .map(|e| profile_line(&e.profile, e.active))
                .collect();
            print_or_fail(output, &entries, &lines)
        }

        ProfilesAction::Add {
            name,
            avatar,
            kids,
            maturity,
        } => {
            if name.trim().is_empty() {
                return output.error("Profile name cannot be empty", ExitCode::InvalidArgs);
            }
            let avatar = match avatar {
                Some(color) => match cli::validate_avatar_color(&color) {
                    Ok(c) => c.to_string(),
                    Err(e) => return output.error(e, ExitCode::InvalidArgs),
                },
                None => random_avatar_color().to_string(),
            };
            let added = store.dispatch(UserAction::AddProfile(NewProfile {
                name: name.trim().to_string(),
                avatar,
                is_kids: kids,
                maturity_level: if kids {
                    MaturityLevel::Pg
                } else {
                    maturity.into()
                },
            }));
            if !added {
                return output.error(
                    format!(
                        "Profile limit reached ({} profiles)",
                        crate::catalog::MAX_PROFILES
                    ),
                    ExitCode::Error,
                );
            }
            match store.user.profiles().last() {
                Some(profile) => {
                    let lines = vec![format!("Added profile {}", profile.name)];
                    print_or_fail(output, profile, &lines)
                }
                None => ExitCode::Error,
            }
        }

        ProfilesAction::Update {
            profile,
            name,
            avatar,
            kids,
            maturity,
        } => {
            let Some(mut updated) = find_profile(&store, &profile) else {
                return output.error(format!("No profile named {}", profile), ExitCode::NotFound);
            };
            if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
                updated.name = name.trim().to_string();
            }
            if let Some(color) = avatar {
                match cli::validate_avatar_color(&color) {
                    Ok(c) => updated.avatar = c.to_string(),
                    Err(e) => return output.error(e, ExitCode::InvalidArgs),
                }
            }
            if kids == Some(true) && maturity.is_some() {
                return output.error(
                    "Kids profiles are capped at PG; drop --maturity",
                    ExitCode::InvalidArgs,
                );
            }
            if let Some(kids) = kids {
                if kids {
                    updated.maturity_level = MaturityLevel::Pg;
                } else if updated.is_kids {
                    updated.maturity_level = MaturityLevel::R;
                }
                updated.is_kids = kids;
            }
            if let Some(level) = maturity {
                updated.maturity_level = level.into();
            }
            store.dispatch(UserAction::UpdateProfile(updated.clone()));
            let lines = vec![format!("Updated profile {}", updated.name)];
            print_or_fail(output, &updated, &lines)
        }

        ProfilesAction::Delete { profile } => {
            let Some(target) = find_profile(&store, &profile) else {
                return output.error(format!("No profile named {}", profile), ExitCode::NotFound);
            };
            if !store.dispatch(UserAction::DeleteProfile(target.id.clone())) {
                return output.error("Cannot delete the only profile", ExitCode::Error);
            }
            print_or_fail(
                output,
                StatusOk::default(),
                &[format!("Deleted profile {}", target.name)],
            )
        }

        ProfilesAction::Switch { profile } => {
            let Some(target) = find_profile(&store, &profile) else {
                return output.error(format!("No profile named {}", profile), ExitCode::NotFound);
            };
            store.dispatch(UserAction::SetActiveProfile(target.id.clone()));
            let lines = vec![format!("Now watching as {}", target.name)];
            print_or_fail(output, &target, &lines)
        }
    }
}

// =============================================================================
// Library Commands
// =============================================================================

pub async fn watchlist_cmd(cmd: WatchlistCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let mut store = ctx.store();
    if let Err(code) = require_auth(&store, output) {
        return code;
    }

    match cmd.action {
        cli::WatchlistAction::List => {
            let lines: Vec<String> = if store.watchlist.items.is_empty() {
                vec!["My List is empty".into()]
            } else {
                store
                    .watchlist
                    .items
                    .iter()
                    .map(|item| {
                        format!(
                            "{} [{}] {}  added {}",
                            item.title,
                            item.media_type,
                            item.id,
                            item.added_at.format("%Y-%m-%d")
                        )
                    })
                    .collect()
            };
            print_or_fail(output, &store.watchlist.items, &lines)
        }

        cli::WatchlistAction::Add(title) => {
            if store.is_in_watchlist(title.id, title.media_type()) {
                output.info("Already in My List");
                return print_or_fail(output, StatusOk::default(), &[]);
            }
            let client = match require_client(ctx, output) {
                Ok(c) => c,
                Err(code) => return code,
            };
            let detail = match fetch_media(&client, &title).await {
                Ok(d) => d,
                Err(e) => return api_error(output, "Details", e),
            };
            let item = WatchlistItem::from_media(&detail.media);
            store.dispatch(WatchlistAction::AddToWatchlist(item.clone()));
            let lines = vec![format!("Added {} to My List", item.title)];
            print_or_fail(output, &item, &lines)
        }

        cli::WatchlistAction::Remove(title) => {
            let key = MediaKey::new(title.id, title.media_type());
            if !store.dispatch(WatchlistAction::RemoveFromWatchlist(key)) {
                return output.error(format!("{} is not in My List", key), ExitCode::NotFound);
            }
            print_or_fail(output, StatusOk::default(), &[format!("Removed {}", key)])
        }

        cli::WatchlistAction::Clear => {
            store.dispatch(WatchlistAction::ClearWatchlist);
            print_or_fail(output, StatusOk::default(), &["My List cleared".to_string()])
        }
    }
}

pub async fn continue_cmd(cmd: ContinueCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let mut store = ctx.store();
    if let Err(code) = require_auth(&store, output) {
        return code;
    }

    match cmd.action {
        ContinueAction::List => {
            let lines: Vec<String> = if store.continue_watching.items.is_empty() {
                vec!["Nothing in progress".into()]
            } else {
                store
                    .continue_watching
                    .items
                    .iter()
                    .map(|item| item.to_string())
                    .collect()
            };
            print_or_fail(output, &store.continue_watching.items, &lines)
        }

        ContinueAction::Update {
            title,
            progress,
            timestamp,
        } => {
            let client = match require_client(ctx, output) {
                Ok(c) => c,
                Err(code) => return code,
            };
            let detail = match fetch_media(&client, &title).await {
                Ok(d) => d,
                Err(e) => return api_error(output, "Details", e),
            };
            let item = ContinueWatchingItem::from_media(&detail.media, progress, timestamp);
            store.dispatch(ContinueWatchingAction::UpdateProgress(item));
            match store.continue_watching_item(title.id, title.media_type()) {
                Some(saved) => {
                    let lines = vec![saved.to_string()];
                    print_or_fail(output, saved, &lines)
                }
                None => ExitCode::Error,
            }
        }

        ContinueAction::Remove(title) => {
            let key = MediaKey::new(title.id, title.media_type());
            if !store.dispatch(ContinueWatchingAction::RemoveFromContinueWatching(key)) {
                return output.error(format!("{} is not in progress", key), ExitCode::NotFound);
            }
            print_or_fail(output, StatusOk::default(), &[format!("Removed {}", key)])
        }

        ContinueAction::Clear => {
            store.dispatch(ContinueWatchingAction::ClearContinueWatching);
            print_or_fail(
                output,
                StatusOk::default(),
                &["Continue Watching cleared".to_string()],
            )
        }
    }
}

/// Record a viewing position for a title's trailer page
pub async fn watch_cmd(cmd: WatchCmd, ctx: &CommandContext, output: &Output) -> ExitCode {
    let Some(position) = cmd.position_secs() else {
        return output.error(
            format!("Invalid position: {} (use seconds, MM:SS or HH:MM:SS)", cmd.position),
            ExitCode::InvalidArgs,
        );
    };
    let client = match require_client(ctx, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let detail = match fetch_media(&client, &cmd.title).await {
        Ok(d) => d,
        Err(e) => return api_error(output, "Details", e),
    };

    let session = WatchSession::new(&detail).resume_at(position);
    let Some(watch_url) = session.watch_url() else {
        return output.error(
            format!("No trailer available for {}", detail.title()),
            ExitCode::NotFound,
        );
    };

    let mut store = ctx.store();
    let recorded = match session.to_progress_item() {
        Some(item) => store.dispatch(ContinueWatchingAction::UpdateProgress(item)),
        None => false,
    };

    if cmd.open {
        if let Err(e) = TrailerLauncher::new(cmd.with.into()).open(&watch_url) {
            return output.error(e.to_string(), ExitCode::Error);
        }
    }

    let response = WatchResponse {
        title: detail.title().to_string(),
        position: session.position,
        duration: session.duration,
        progress: session.progress(),
        recorded,
        watch_url: watch_url.clone(),
    };
    let lines = vec![
        format!(
            "{}  {} / {}  ({}%){}",
            response.title,
            format_clock(response.position),
            format_clock(response.duration),
            response.progress,
            if recorded { "" } else { "  not recorded" }
        ),
        watch_url,
    ];
    print_or_fail(output, &response, &lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_genre() {
        assert_eq!(resolve_genre(MediaType::Movie, "28"), Some(28));
        assert_eq!(resolve_genre(MediaType::Movie, "horror"), Some(27));
        assert_eq!(resolve_genre(MediaType::Tv, "Drama"), Some(18));
        assert_eq!(resolve_genre(MediaType::Movie, "nope"), None);
    }

    #[test]
    fn test_kids_filter() {
        let cartoon = Media {
            id: 1,
            media_type: MediaType::Movie,
            title: "A".into(),
            original_title: None,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            year: None,
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            genre_ids: vec![16],
            adult: false,
            original_language: "en".into(),
        };
        let mut horror = cartoon.clone();
        horror.genre_ids = vec![27];

        let kept = kids_filter(true, vec![cartoon.clone(), horror.clone()]);
        assert_eq!(kept, vec![cartoon]);
        assert_eq!(kids_filter(false, vec![horror]).len(), 1);
    }

    #[test]
    fn test_context_without_key_has_no_client() {
        let ctx = CommandContext::new(Config::default(), "/tmp/unused");
        if std::env::var(crate::config::API_KEY_ENV).is_err() {
            assert!(ctx.client().is_none());
        }
    }
}
