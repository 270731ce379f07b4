//! Client store tests
//!
//! Tests file-backed persistence, the account/profile lifecycle and the
//! watchlist and continue-watching rules.

use flixtui::models::{
    ContinueWatchingItem, MaturityLevel, MediaKey, MediaType, NewProfile, WatchlistItem,
};
use flixtui::store::storage::{FileStorage, Storage, CONTINUE_WATCHING_KEY, WATCHLIST_KEY};
use flixtui::store::{
    check_sign_in, AuthError, ContinueWatchingAction, Store, UserAction, WatchlistAction,
    MAX_CONTINUE_WATCHING,
};
use tempfile::TempDir;

fn sign_up(store: &mut Store, email: &str, name: &str) {
    assert!(store.dispatch(UserAction::SignUp {
        email: email.into(),
        name: name.into(),
        password: "hunter2".into(),
    }));
}

fn saved(id: u64, media_type: MediaType, title: &str) -> WatchlistItem {
    WatchlistItem {
        id,
        media_type,
        added_at: chrono::Utc::now(),
        title: title.into(),
        poster_path: Some(format!("/{}.jpg", id)),
        backdrop_path: None,
    }
}

fn progress(id: u64, pct: u8) -> ContinueWatchingItem {
    ContinueWatchingItem {
        id,
        media_type: MediaType::Movie,
        title: format!("Movie {}", id),
        poster_path: None,
        backdrop_path: None,
        progress: pct,
        timestamp: u64::from(pct) * 60,
        last_watched: chrono::Utc::now(),
    }
}

fn kids_profile(name: &str) -> NewProfile {
    NewProfile {
        name: name.into(),
        avatar: "#46d369".into(),
        is_kids: true,
        maturity_level: MaturityLevel::Pg,
    }
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = Store::open(dir.path());
        sign_up(&mut store, "ada@example.com", "Ada");
        store.dispatch(WatchlistAction::AddToWatchlist(saved(603, MediaType::Movie, "The Matrix")));
        store.dispatch(ContinueWatchingAction::UpdateProgress(progress(27205, 40)));
    }

    let store = Store::open(dir.path());
    assert!(store.is_authenticated());
    assert_eq!(store.active_profile().map(|p| p.name.as_str()), Some("Ada"));
    assert!(store.is_in_watchlist(603, MediaType::Movie));
    assert_eq!(
        store.continue_watching_item(27205, MediaType::Movie).map(|i| i.progress),
        Some(40)
    );
}

#[test]
fn test_documents_are_camel_case_json() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(dir.path());
    store.dispatch(WatchlistAction::AddToWatchlist(saved(1396, MediaType::Tv, "Breaking Bad")));

    let raw = FileStorage::new(dir.path())
        .read(WATCHLIST_KEY)
        .unwrap()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["id"], 1396);
    assert_eq!(json[0]["mediaType"], "tv");
    assert_eq!(json[0]["posterPath"], "/1396.jpg");
    assert!(json[0]["addedAt"].is_string());
}

#[test]
fn test_corrupt_document_falls_back_to_empty() {
    let dir = TempDir::new().unwrap();
    FileStorage::new(dir.path())
        .write(CONTINUE_WATCHING_KEY, "{ not json")
        .unwrap();

    let store = Store::open(dir.path());
    assert!(store.continue_watching.items.is_empty());
    assert!(!store.is_authenticated());
}

#[test]
fn test_clear_all_data_leaves_only_signed_out_marker() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(dir.path());
    sign_up(&mut store, "ada@example.com", "Ada");
    store.dispatch(WatchlistAction::AddToWatchlist(saved(1, MediaType::Movie, "One")));

    store.clear_all_data();

    assert!(!store.is_authenticated());
    let mut files: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, vec!["streamflix_active_profile.json"]);
    let marker = std::fs::read_to_string(dir.path().join("streamflix_active_profile.json")).unwrap();
    assert_eq!(marker.trim(), "null");

    let reopened = Store::open(dir.path());
    assert!(!reopened.is_authenticated());
    assert!(reopened.watchlist.items.is_empty());
}

// =============================================================================
// Account
// =============================================================================

#[test]
fn test_sign_out_keeps_account_for_sign_in() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(dir.path());
    sign_up(&mut store, "ada@example.com", "Ada");
    store.dispatch(UserAction::SignOut);
    assert!(!store.is_authenticated());

    // Next launch restores the account without an active profile
    let mut store = Store::open(dir.path());
    assert!(store.is_authenticated());
    assert!(store.active_profile().is_none());

    store.dispatch(UserAction::SignOut);
    assert_eq!(
        check_sign_in(store.storage(), "bob@example.com"),
        Err(AuthError::InvalidCredentials)
    );
    assert!(!store.dispatch(UserAction::SignIn {
        email: "bob@example.com".into(),
        password: "x".into(),
    }));
    assert!(store.dispatch(UserAction::SignIn {
        email: "ada@example.com".into(),
        password: "anything".into(),
    }));
    // Falls back to the first profile
    assert_eq!(store.active_profile().map(|p| p.name.as_str()), Some("Ada"));
}

#[test]
fn test_sign_in_without_account() {
    let store = Store::in_memory();
    assert_eq!(check_sign_in(store.storage(), "ada@example.com"), Err(AuthError::NoAccount));
    assert_eq!(check_sign_in(store.storage(), "  "), Err(AuthError::MissingEmail));
}

#[test]
fn test_profile_limit_and_last_profile() {
    let mut store = Store::in_memory();
    sign_up(&mut store, "ada@example.com", "Ada");

    for name in ["Bo", "Cy", "Di", "Ed"] {
        assert!(store.dispatch(UserAction::AddProfile(kids_profile(name))));
    }
    assert_eq!(store.user.profiles().len(), 5);
    assert!(!store.user.can_add_profile());
    assert!(!store.dispatch(UserAction::AddProfile(kids_profile("Fay"))));

    let ids: Vec<String> = store.user.profiles().iter().map(|p| p.id.clone()).collect();
    for id in &ids[1..] {
        assert!(store.dispatch(UserAction::DeleteProfile(id.clone())));
    }
    assert!(!store.dispatch(UserAction::DeleteProfile(ids[0].clone())));
    assert_eq!(store.user.profiles().len(), 1);
}

#[test]
fn test_switching_to_kids_profile() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(dir.path());
    sign_up(&mut store, "ada@example.com", "Ada");
    store.dispatch(UserAction::AddProfile(kids_profile("Junior")));

    let junior = store.user.profiles()[1].id.clone();
    assert!(store.dispatch(UserAction::SetActiveProfile(junior.clone())));
    assert!(store.user.is_kids_mode());
    assert!(!store.dispatch(UserAction::SetActiveProfile("missing".into())));

    let reopened = Store::open(dir.path());
    assert_eq!(reopened.active_profile().map(|p| p.id.as_str()), Some(junior.as_str()));
    assert!(reopened.user.is_kids_mode());
}

#[test]
fn test_deleting_active_profile_moves_to_first() {
    let mut store = Store::in_memory();
    sign_up(&mut store, "ada@example.com", "Ada");
    store.dispatch(UserAction::AddProfile(kids_profile("Junior")));
    let junior = store.user.profiles()[1].id.clone();
    store.dispatch(UserAction::SetActiveProfile(junior.clone()));

    assert!(store.dispatch(UserAction::DeleteProfile(junior)));
    assert_eq!(store.active_profile().map(|p| p.name.as_str()), Some("Ada"));
}

// =============================================================================
// Watchlist / Continue Watching
// =============================================================================

#[test]
fn test_watchlist_rules() {
    let mut store = Store::in_memory();
    assert!(store.dispatch(WatchlistAction::AddToWatchlist(saved(1, MediaType::Movie, "A"))));
    assert!(store.dispatch(WatchlistAction::AddToWatchlist(saved(1, MediaType::Tv, "B"))));
    // Same id and type is a duplicate
    assert!(!store.dispatch(WatchlistAction::AddToWatchlist(saved(1, MediaType::Movie, "A"))));

    let titles: Vec<&str> = store.watchlist.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);

    assert!(store.dispatch(WatchlistAction::RemoveFromWatchlist(MediaKey::new(1, MediaType::Tv))));
    assert!(!store.dispatch(WatchlistAction::RemoveFromWatchlist(MediaKey::new(1, MediaType::Tv))));
    assert!(store.is_in_watchlist(1, MediaType::Movie));
    assert!(!store.is_in_watchlist(1, MediaType::Tv));
}

#[test]
fn test_continue_watching_rules() {
    let mut store = Store::in_memory();
    for id in 0..25 {
        store.dispatch(ContinueWatchingAction::UpdateProgress(progress(id, 10)));
    }
    assert_eq!(store.continue_watching.items.len(), MAX_CONTINUE_WATCHING);
    // Newest first, oldest dropped
    assert_eq!(store.continue_watching.items[0].id, 24);
    assert!(store.continue_watching_item(0, MediaType::Movie).is_none());

    store.dispatch(ContinueWatchingAction::UpdateProgress(progress(10, 250)));
    assert_eq!(store.continue_watching.items[0].id, 10);
    assert_eq!(store.continue_watching.items[0].progress, 100);
    assert_eq!(
        store.continue_watching.items.iter().filter(|i| i.id == 10).count(),
        1
    );
}
