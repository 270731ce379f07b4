//! Static catalog tables: genres, kids filter, avatar palette and page rows

use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Media, MediaType};

/// TMDB movie genres
pub const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// TMDB TV genres
pub const TV_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

/// Genres shown to kids profiles
pub const KIDS_GENRE_IDS: &[u32] = &[16, 10751, 10762, 35, 12];

/// Palette for generated profile avatars
pub const AVATAR_COLORS: &[&str] = &[
    "#E50914", "#B81D24", "#221F1F", "#F5F5F1", "#564D4D", "#831010", "#0071EB", "#46D369",
    "#FFD700", "#9B59B6",
];

/// Maximum number of profiles under one account
pub const MAX_PROFILES: usize = 5;

/// Navigation links shown in the menu popup
pub const NAV_LINKS: &[(&str, NavTarget)] = &[
    ("Home", NavTarget::Home),
    ("Movies", NavTarget::Movies),
    ("TV Shows", NavTarget::Tv),
    ("New & Popular", NavTarget::NewPopular),
    ("My List", NavTarget::MyList),
];

/// Browse pages reachable from the navigation menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    Movies,
    Tv,
    NewPopular,
    MyList,
}

/// Where a browse row gets its titles from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSource {
    Trending {
        scope: TrendingScope,
        window: TimeWindow,
    },
    Popular(MediaType),
    TopRated(MediaType),
    /// `/movie/now_playing` or `/tv/on_the_air`
    NowPlaying(MediaType),
    Upcoming,
    Genre {
        media_type: MediaType,
        genre_id: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingScope {
    All,
    Movie,
    Tv,
}

impl TrendingScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingScope::All => "all",
            TrendingScope::Movie => "movie",
            TrendingScope::Tv => "tv",
        }
    }
}

impl std::str::FromStr for TrendingScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TrendingScope::All),
            "movie" => Ok(TrendingScope::Movie),
            "tv" => Ok(TrendingScope::Tv),
            other => Err(format!("unknown trending scope: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            other => Err(format!("unknown time window: {}", other)),
        }
    }
}

/// A titled browse row definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDef {
    pub id: &'static str,
    pub title: &'static str,
    pub source: SectionSource,
    /// Render rank numbers next to items
    pub show_rank: bool,
}

const fn row(id: &'static str, title: &'static str, source: SectionSource) -> SectionDef {
    SectionDef {
        id,
        title,
        source,
        show_rank: false,
    }
}

const fn ranked(id: &'static str, title: &'static str, source: SectionSource) -> SectionDef {
    SectionDef {
        id,
        title,
        source,
        show_rank: true,
    }
}

const fn genre(media_type: MediaType, genre_id: u32) -> SectionSource {
    SectionSource::Genre {
        media_type,
        genre_id,
    }
}

pub const HOME_SECTIONS: &[SectionDef] = &[
    row(
        "trending",
        "Trending Now",
        SectionSource::Trending {
            scope: TrendingScope::All,
            window: TimeWindow::Week,
        },
    ),
    row("popular-movies", "Popular Movies", SectionSource::Popular(MediaType::Movie)),
    row("popular-tv", "Popular TV Shows", SectionSource::Popular(MediaType::Tv)),
    ranked("top-rated-movies", "Top Rated Movies", SectionSource::TopRated(MediaType::Movie)),
    row("top-rated-tv", "Top Rated TV Shows", SectionSource::TopRated(MediaType::Tv)),
    row("action", "Action Movies", genre(MediaType::Movie, 28)),
    row("comedy", "Comedy Movies", genre(MediaType::Movie, 35)),
    row("horror", "Horror Movies", genre(MediaType::Movie, 27)),
    row("romance", "Romance Movies", genre(MediaType::Movie, 10749)),
    row("documentaries", "Documentaries", genre(MediaType::Movie, 99)),
];

pub const MOVIE_SECTIONS: &[SectionDef] = &[
    row("popular", "Popular Movies", SectionSource::Popular(MediaType::Movie)),
    row("now-playing", "Now Playing", SectionSource::NowPlaying(MediaType::Movie)),
    row("upcoming", "Upcoming Movies", SectionSource::Upcoming),
    ranked("top-rated", "Top Rated Movies", SectionSource::TopRated(MediaType::Movie)),
    row("action", "Action Movies", genre(MediaType::Movie, 28)),
    row("comedy", "Comedy Movies", genre(MediaType::Movie, 35)),
    row("horror", "Horror Movies", genre(MediaType::Movie, 27)),
    row("romance", "Romance Movies", genre(MediaType::Movie, 10749)),
    row("sci-fi", "Sci-Fi Movies", genre(MediaType::Movie, 878)),
    row("thriller", "Thriller Movies", genre(MediaType::Movie, 53)),
    row("animation", "Animation", genre(MediaType::Movie, 16)),
    row("documentaries", "Documentaries", genre(MediaType::Movie, 99)),
];

pub const TV_SECTIONS: &[SectionDef] = &[
    row("popular", "Popular TV Shows", SectionSource::Popular(MediaType::Tv)),
    row("on-air", "Currently Airing", SectionSource::NowPlaying(MediaType::Tv)),
    ranked("top-rated", "Top Rated TV Shows", SectionSource::TopRated(MediaType::Tv)),
    row("action", "Action & Adventure", genre(MediaType::Tv, 10759)),
    row("comedy", "Comedy Shows", genre(MediaType::Tv, 35)),
    row("crime", "Crime Shows", genre(MediaType::Tv, 80)),
    row("drama", "Drama Series", genre(MediaType::Tv, 18)),
    row("sci-fi", "Sci-Fi & Fantasy", genre(MediaType::Tv, 10765)),
    row("animation", "Animation", genre(MediaType::Tv, 16)),
    row("reality", "Reality TV", genre(MediaType::Tv, 10764)),
    row("documentary", "Documentaries", genre(MediaType::Tv, 99)),
];

pub const NEW_POPULAR_SECTIONS: &[SectionDef] = &[
    row(
        "trending",
        "Trending Now",
        SectionSource::Trending {
            scope: TrendingScope::All,
            window: TimeWindow::Day,
        },
    ),
    row("upcoming", "Coming Soon", SectionSource::Upcoming),
    row("movies", "Popular Movies", SectionSource::Popular(MediaType::Movie)),
    row("tv", "Popular TV Shows", SectionSource::Popular(MediaType::Tv)),
];

/// Row definitions for a browse page (My List has no remote rows)
pub fn sections_for(target: NavTarget) -> &'static [SectionDef] {
    match target {
        NavTarget::Home => HOME_SECTIONS,
        NavTarget::Movies => MOVIE_SECTIONS,
        NavTarget::Tv => TV_SECTIONS,
        NavTarget::NewPopular => NEW_POPULAR_SECTIONS,
        NavTarget::MyList => &[],
    }
}

/// Genre table for a media type
pub fn genres_for(media_type: MediaType) -> &'static [(u32, &'static str)] {
    match media_type {
        MediaType::Movie => MOVIE_GENRES,
        MediaType::Tv => TV_GENRES,
    }
}

/// Look up a genre name, trying the media type's own table first
pub fn genre_name(media_type: MediaType, id: u32) -> Option<&'static str> {
    let other = match media_type {
        MediaType::Movie => MediaType::Tv,
        MediaType::Tv => MediaType::Movie,
    };
    [media_type, other]
        .iter()
        .flat_map(|t| genres_for(*t).iter())
        .find(|(gid, _)| *gid == id)
        .map(|(_, name)| *name)
}

/// Genre names for a list of ids, unknown ids skipped
pub fn genre_names(media_type: MediaType, ids: &[u32]) -> Vec<&'static str> {
    ids.iter()
        .filter_map(|id| genre_name(media_type, *id))
        .collect()
}

/// Whether a title may be shown on a kids profile
pub fn is_kids_friendly(media: &Media) -> bool {
    !media.adult && media.genre_ids.iter().any(|id| KIDS_GENRE_IDS.contains(id))
}

/// Pick an avatar color, seeded from the clock
pub fn random_avatar_color() -> &'static str {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as usize ^ d.as_secs() as usize)
        .unwrap_or(0);
    AVATAR_COLORS[seed % AVATAR_COLORS.len()]
}
