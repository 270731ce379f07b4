//! Continue-watching slice: most recently viewed titles with playback progress

use chrono::Utc;

use super::storage::{get_from_storage, set_to_storage, Storage, CONTINUE_WATCHING_KEY};
use crate::models::{ContinueWatchingItem, MediaKey, MediaType};

/// Entries kept after an update
pub const MAX_CONTINUE_WATCHING: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContinueWatchingState {
    pub items: Vec<ContinueWatchingItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContinueWatchingAction {
    InitializeContinueWatching,
    UpdateProgress(ContinueWatchingItem),
    RemoveFromContinueWatching(MediaKey),
    ClearContinueWatching,
}

impl ContinueWatchingState {
    pub fn reduce(&mut self, action: ContinueWatchingAction, storage: &dyn Storage) -> bool {
        match action {
            ContinueWatchingAction::InitializeContinueWatching => {
                self.items = get_from_storage(storage, CONTINUE_WATCHING_KEY, Vec::new());
                true
            }
            ContinueWatchingAction::UpdateProgress(mut item) => {
                let key = item.key();
                item.last_watched = Utc::now();
                item.progress = item.progress.min(100);
                self.items.retain(|i| i.key() != key);
                self.items.insert(0, item);
                self.items.truncate(MAX_CONTINUE_WATCHING);
                set_to_storage(storage, CONTINUE_WATCHING_KEY, &self.items);
                true
            }
            ContinueWatchingAction::RemoveFromContinueWatching(key) => {
                let before = self.items.len();
                self.items.retain(|i| i.key() != key);
                set_to_storage(storage, CONTINUE_WATCHING_KEY, &self.items);
                self.items.len() != before
            }
            ContinueWatchingAction::ClearContinueWatching => {
                self.items.clear();
                set_to_storage(storage, CONTINUE_WATCHING_KEY, &self.items);
                true
            }
        }
    }

    pub fn item(&self, id: u64, media_type: MediaType) -> Option<&ContinueWatchingItem> {
        let key = MediaKey::new(id, media_type);
        self.items.iter().find(|i| i.key() == key)
    }
}
