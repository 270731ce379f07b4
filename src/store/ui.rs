//! Transient UI flags. Never persisted.

use crate::models::MediaKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub is_muted: bool,
    pub is_search_open: bool,
    pub is_modal_open: bool,
    pub modal_content: Option<MediaKey>,
    pub is_nav_scrolled: bool,
    pub is_mobile_menu_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            is_muted: true,
            is_search_open: false,
            is_modal_open: false,
            modal_content: None,
            is_nav_scrolled: false,
            is_mobile_menu_open: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ToggleMute,
    SetMuted(bool),
    ToggleSearch,
    SetSearchOpen(bool),
    OpenModal(MediaKey),
    CloseModal,
    SetNavScrolled(bool),
    ToggleMobileMenu,
    SetMobileMenuOpen(bool),
}

impl UiState {
    pub fn reduce(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::ToggleMute => self.is_muted = !self.is_muted,
            UiAction::SetMuted(muted) => self.is_muted = muted,
            UiAction::ToggleSearch => self.is_search_open = !self.is_search_open,
            UiAction::SetSearchOpen(open) => self.is_search_open = open,
            UiAction::OpenModal(key) => {
                self.is_modal_open = true;
                self.modal_content = Some(key);
            }
            UiAction::CloseModal => {
                self.is_modal_open = false;
                self.modal_content = None;
            }
            UiAction::SetNavScrolled(scrolled) => self.is_nav_scrolled = scrolled,
            UiAction::ToggleMobileMenu => self.is_mobile_menu_open = !self.is_mobile_menu_open,
            UiAction::SetMobileMenuOpen(open) => self.is_mobile_menu_open = open,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;

    #[test]
    fn test_defaults() {
        let ui = UiState::default();
        assert!(ui.is_muted);
        assert!(!ui.is_modal_open);
        assert!(ui.modal_content.is_none());
    }

    #[test]
    fn test_modal_open_close() {
        let mut ui = UiState::default();
        let key = MediaKey::new(42, MediaType::Tv);
        ui.reduce(UiAction::OpenModal(key));
        assert!(ui.is_modal_open);
        assert_eq!(ui.modal_content, Some(key));

        ui.reduce(UiAction::CloseModal);
        assert!(!ui.is_modal_open);
        assert!(ui.modal_content.is_none());
    }

    #[test]
    fn test_toggles() {
        let mut ui = UiState::default();
        ui.reduce(UiAction::ToggleMute);
        assert!(!ui.is_muted);
        ui.reduce(UiAction::SetMuted(true));
        assert!(ui.is_muted);

        ui.reduce(UiAction::ToggleSearch);
        assert!(ui.is_search_open);
        ui.reduce(UiAction::SetSearchOpen(false));
        assert!(!ui.is_search_open);

        ui.reduce(UiAction::ToggleMobileMenu);
        assert!(ui.is_mobile_menu_open);
        ui.reduce(UiAction::SetMobileMenuOpen(false));
        assert!(!ui.is_mobile_menu_open);

        ui.reduce(UiAction::SetNavScrolled(true));
        assert!(ui.is_nav_scrolled);
    }
}
