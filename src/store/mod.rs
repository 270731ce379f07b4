//! Client state store
//!
//! Four independent slices (account, watchlist, continue watching, UI flags)
//! behind a single `dispatch`. Persistent slices write through to a `Storage`
//! backend after every mutation.

pub mod continue_watching;
pub mod storage;
pub mod ui;
pub mod user;
pub mod watchlist;

use std::path::PathBuf;

pub use continue_watching::{ContinueWatchingAction, ContinueWatchingState, MAX_CONTINUE_WATCHING};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use ui::{UiAction, UiState};
pub use user::{check_sign_in, check_sign_up, AuthError, UserAction, UserState};
pub use watchlist::{WatchlistAction, WatchlistState};

use crate::models::{ContinueWatchingItem, MediaType, UserProfile};

/// Any store action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    User(UserAction),
    Watchlist(WatchlistAction),
    ContinueWatching(ContinueWatchingAction),
    Ui(UiAction),
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}

impl From<WatchlistAction> for Action {
    fn from(action: WatchlistAction) -> Self {
        Action::Watchlist(action)
    }
}

impl From<ContinueWatchingAction> for Action {
    fn from(action: ContinueWatchingAction) -> Self {
        Action::ContinueWatching(action)
    }
}

impl From<UiAction> for Action {
    fn from(action: UiAction) -> Self {
        Action::Ui(action)
    }
}

pub struct Store {
    pub user: UserState,
    pub watchlist: WatchlistState,
    pub continue_watching: ContinueWatchingState,
    pub ui: UiState,
    storage: Box<dyn Storage>,
}

impl Store {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            user: UserState::default(),
            watchlist: WatchlistState::default(),
            continue_watching: ContinueWatchingState::default(),
            ui: UiState::default(),
            storage,
        }
    }

    /// In-memory store (nothing survives the process)
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// Store backed by JSON files in `dir`, already initialized
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(Box::new(FileStorage::new(dir)));
        store.initialize();
        store
    }

    /// Load every persistent slice from storage
    pub fn initialize(&mut self) {
        self.dispatch(UserAction::InitializeUser);
        self.dispatch(WatchlistAction::InitializeWatchlist);
        self.dispatch(ContinueWatchingAction::InitializeContinueWatching);
    }

    /// Route an action to its slice. Returns false when the slice refused it.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> bool {
        let action = action.into();
        tracing::trace!(?action, "dispatch");
        let storage = self.storage.as_ref();
        match action {
            Action::User(a) => self.user.reduce(a, storage),
            Action::Watchlist(a) => self.watchlist.reduce(a, storage),
            Action::ContinueWatching(a) => self.continue_watching.reduce(a, storage),
            Action::Ui(a) => self.ui.reduce(a),
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Wipe every persisted document, then sign out
    pub fn clear_all_data(&mut self) {
        self.dispatch(WatchlistAction::ClearWatchlist);
        self.dispatch(ContinueWatchingAction::ClearContinueWatching);
        for key in [
            storage::USER_KEY,
            storage::ACTIVE_PROFILE_KEY,
            storage::WATCHLIST_KEY,
            storage::CONTINUE_WATCHING_KEY,
        ] {
            storage::remove_from_storage(self.storage(), key);
        }
        self.dispatch(UserAction::SignOut);
        tracing::info!("local data cleared");
    }

    // -------------------------------------------------------------------------
    // Selectors
    // -------------------------------------------------------------------------

    pub fn is_authenticated(&self) -> bool {
        self.user.is_authenticated
    }

    pub fn active_profile(&self) -> Option<&UserProfile> {
        self.user.active_profile.as_ref()
    }

    pub fn is_in_watchlist(&self, id: u64, media_type: MediaType) -> bool {
        self.watchlist.is_in_watchlist(id, media_type)
    }

    pub fn continue_watching_item(
        &self,
        id: u64,
        media_type: MediaType,
    ) -> Option<&ContinueWatchingItem> {
        self.continue_watching.item(id, media_type)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("user", &self.user)
            .field("watchlist", &self.watchlist.items.len())
            .field("continue_watching", &self.continue_watching.items.len())
            .field("ui", &self.ui)
            .finish()
    }
}
