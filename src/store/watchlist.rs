//! Watchlist slice: saved titles, newest first

use chrono::Utc;

use super::storage::{get_from_storage, set_to_storage, Storage, WATCHLIST_KEY};
use crate::models::{MediaKey, MediaType, WatchlistItem};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchlistState {
    pub items: Vec<WatchlistItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WatchlistAction {
    InitializeWatchlist,
    AddToWatchlist(WatchlistItem),
    RemoveFromWatchlist(MediaKey),
    ClearWatchlist,
}

impl WatchlistState {
    pub fn reduce(&mut self, action: WatchlistAction, storage: &dyn Storage) -> bool {
        match action {
            WatchlistAction::InitializeWatchlist => {
                self.items = get_from_storage(storage, WATCHLIST_KEY, Vec::new());
                true
            }
            WatchlistAction::AddToWatchlist(mut item) => {
                if self.contains(item.key()) {
                    return false;
                }
                item.added_at = Utc::now();
                self.items.insert(0, item);
                set_to_storage(storage, WATCHLIST_KEY, &self.items);
                true
            }
            WatchlistAction::RemoveFromWatchlist(key) => {
                let before = self.items.len();
                self.items.retain(|i| i.key() != key);
                set_to_storage(storage, WATCHLIST_KEY, &self.items);
                self.items.len() != before
            }
            WatchlistAction::ClearWatchlist => {
                self.items.clear();
                set_to_storage(storage, WATCHLIST_KEY, &self.items);
                true
            }
        }
    }

    pub fn contains(&self, key: MediaKey) -> bool {
        self.items.iter().any(|i| i.key() == key)
    }

    pub fn is_in_watchlist(&self, id: u64, media_type: MediaType) -> bool {
        self.contains(MediaKey::new(id, media_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};

    fn item(id: u64, media_type: MediaType) -> WatchlistItem {
        WatchlistItem {
            id,
            media_type,
            added_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            title: format!("Title {}", id),
            poster_path: None,
            backdrop_path: None,
        }
    }

    #[test]
    fn test_add_prepends_and_stamps() {
        let storage = MemoryStorage::new();
        let mut state = WatchlistState::default();
        state.reduce(WatchlistAction::AddToWatchlist(item(1, MediaType::Movie)), &storage);
        state.reduce(WatchlistAction::AddToWatchlist(item(2, MediaType::Tv)), &storage);

        assert_eq!(state.items[0].id, 2);
        assert_eq!(state.items[1].id, 1);
        assert!(state.items[0].added_at.timestamp() > 1_600_000_000);
    }

    #[test]
    fn test_no_duplicates_by_id_and_type() {
        let storage = MemoryStorage::new();
        let mut state = WatchlistState::default();
        assert!(state.reduce(WatchlistAction::AddToWatchlist(item(1, MediaType::Movie)), &storage));
        assert!(!state.reduce(WatchlistAction::AddToWatchlist(item(1, MediaType::Movie)), &storage));
        // Same id, other media type is a different title
        assert!(state.reduce(WatchlistAction::AddToWatchlist(item(1, MediaType::Tv)), &storage));
        assert_eq!(state.items.len(), 2);
        assert!(state.is_in_watchlist(1, MediaType::Tv));
        assert!(!state.is_in_watchlist(2, MediaType::Movie));
    }

    #[test]
    fn test_remove_and_clear_persist() {
        let storage = MemoryStorage::new();
        let mut state = WatchlistState::default();
        state.reduce(WatchlistAction::AddToWatchlist(item(1, MediaType::Movie)), &storage);
        state.reduce(WatchlistAction::AddToWatchlist(item(2, MediaType::Movie)), &storage);

        state.reduce(
            WatchlistAction::RemoveFromWatchlist(MediaKey::new(1, MediaType::Movie)),
            &storage,
        );
        let stored: Vec<WatchlistItem> = get_from_storage(&storage, WATCHLIST_KEY, Vec::new());
        assert_eq!(stored, state.items);
        assert_eq!(stored.len(), 1);

        state.reduce(WatchlistAction::ClearWatchlist, &storage);
        let stored: Vec<WatchlistItem> = get_from_storage(&storage, WATCHLIST_KEY, vec![item(9, MediaType::Tv)]);
        assert!(stored.is_empty());
    }

    #[test]
    fn test_initialize_reads_storage() {
        let storage = MemoryStorage::new();
        set_to_storage(&storage, WATCHLIST_KEY, &vec![item(5, MediaType::Tv)]);
        let mut state = WatchlistState::default();
        state.reduce(WatchlistAction::InitializeWatchlist, &storage);
        assert_eq!(state.items.len(), 1);
        assert!(state.is_in_watchlist(5, MediaType::Tv));
    }
}
