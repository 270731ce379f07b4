//! FlixTUI - StreamFlix catalog in the terminal
//!
//! A TMDB-backed movie and TV browser with local accounts, profiles, a
//! watchlist and continue-watching progress.
//!
//! # Modules
//!
//! - `models` - Catalog and account records
//! - `api` - TMDB client and image/trailer URL helpers
//! - `catalog` - Genre tables and browse row definitions
//! - `store` - Persisted user, watchlist, continue-watching and UI state
//! - `app` - Screen state machine and key handling
//! - `ui` - TUI renderers
//! - `cli` / `commands` - Scriptable command line

pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod launcher;
pub mod models;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use models::{
    ContinueWatchingItem, Media, MediaDetail, MediaKey, MediaType, SearchResults, Section, User,
    UserProfile, WatchlistItem,
};

pub use api::{TmdbClient, TmdbError};
pub use app::{App, Screen};
pub use store::Store;
