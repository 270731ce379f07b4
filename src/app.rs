//! App state and core application logic
//!
//! Manages the screen state machine, navigation stack and key handling.
//! Network work is queued as [`Request`]s; the event loop runs them with
//! [`perform`] and hands the [`Response`]s back to [`App::apply`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::api::{select_trailer, youtube_embed_url, youtube_watch_url, TmdbClient};
use crate::catalog::{is_kids_friendly, random_avatar_color, sections_for, NavTarget, NAV_LINKS};
use crate::launcher::{OpenerKind, TrailerLauncher};
use crate::models::*;
use crate::store::{
    check_sign_in, check_sign_up, AuthError, ContinueWatchingAction, Store, UiAction, UserAction,
    WatchlistAction,
};

/// Row id of the synthetic "Continue Watching" row on Home
pub const CONTINUE_ROW_ID: &str = "continue-watching";

/// Seconds skipped by one seek
pub const SEEK_STEP_SECS: u64 = 10;

// =============================================================================
// Screens
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    Login,
    Profiles,
    #[default]
    Home,
    Movies,
    Tv,
    NewPopular,
    MyList,
    Search,
    Detail,
    Watch,
    Account,
}

impl Screen {
    pub fn from_nav(target: NavTarget) -> Self {
        match target {
            NavTarget::Home => Screen::Home,
            NavTarget::Movies => Screen::Movies,
            NavTarget::Tv => Screen::Tv,
            NavTarget::NewPopular => Screen::NewPopular,
            NavTarget::MyList => Screen::MyList,
        }
    }

    pub fn nav_target(&self) -> Option<NavTarget> {
        match self {
            Screen::Home => Some(NavTarget::Home),
            Screen::Movies => Some(NavTarget::Movies),
            Screen::Tv => Some(NavTarget::Tv),
            Screen::NewPopular => Some(NavTarget::NewPopular),
            Screen::MyList => Some(NavTarget::MyList),
            _ => None,
        }
    }

    /// Pages with remote browse rows
    pub fn is_browse(&self) -> bool {
        matches!(self, Screen::Home | Screen::Movies | Screen::Tv | Screen::NewPopular)
    }

    /// Pages that bounce to Login when nobody is signed in
    pub fn requires_auth(&self) -> bool {
        matches!(self, Screen::Profiles | Screen::MyList | Screen::Account)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign In",
            Screen::Profiles => "Who's Watching?",
            Screen::Home => "Home",
            Screen::Movies => "Movies",
            Screen::Tv => "TV Shows",
            Screen::NewPopular => "New & Popular",
            Screen::MyList => "My List",
            Screen::Search => "Search",
            Screen::Detail => "Details",
            Screen::Watch => "Watch",
            Screen::Account => "Account",
        }
    }
}

/// Entries of the navigation menu popup
pub fn menu_items() -> Vec<(&'static str, Screen)> {
    NAV_LINKS
        .iter()
        .map(|(label, target)| (*label, Screen::from_nav(*target)))
        .chain([("Account", Screen::Account), ("Switch Profile", Screen::Profiles)])
        .collect()
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// A text field has focus
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading(Option<String>),
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Selection and text input
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    pub selected: usize,
    /// Scroll offset for the viewport
    pub offset: usize,
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep the selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if visible_height > 0 && self.selected >= self.offset + visible_height {
            self.offset = self.selected + 1 - visible_height;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Single-line text field. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Text split at the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_index(self.cursor))
    }

    /// Apply an editing key. Returns false for keys a field does not handle.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor_home(),
            KeyCode::End => self.cursor_end(),
            _ => return false,
        }
        true
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// Rows of a browse page
#[derive(Debug, Clone, Default)]
pub struct RowsState {
    /// Screen these rows belong to
    pub target: Option<NavTarget>,
    pub sections: Vec<Section>,
    /// Focused row
    pub row: usize,
    /// Selection within each row
    pub lists: Vec<ListState>,
    pub loading: LoadingState,
}

impl RowsState {
    /// Replace the rows. Focus and per-row selection follow the section id,
    /// so inserting or dropping a row keeps the cursor where it was.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        let focused = self.current().map(|s| s.id.clone());
        let mut previous: HashMap<String, ListState> = self
            .sections
            .iter()
            .map(|s| s.id.clone())
            .zip(self.lists.drain(..))
            .collect();
        self.lists = sections
            .iter()
            .map(|s| {
                let mut list = previous.remove(&s.id).unwrap_or_default();
                list.set_len(s.items.len());
                list
            })
            .collect();
        self.row = focused
            .and_then(|id| sections.iter().position(|s| s.id == id))
            .unwrap_or(self.row)
            .min(sections.len().saturating_sub(1));
        self.sections = sections;
        self.loading = LoadingState::Idle;
    }

    pub fn clear(&mut self) {
        self.sections.clear();
        self.lists.clear();
        self.row = 0;
    }

    pub fn current(&self) -> Option<&Section> {
        self.sections.get(self.row)
    }

    pub fn current_list(&self) -> Option<&ListState> {
        self.lists.get(self.row)
    }

    pub fn selected_media(&self) -> Option<&Media> {
        let list = self.lists.get(self.row)?;
        self.current()?.items.get(list.selected)
    }

    pub fn next_row(&mut self) {
        if self.row + 1 < self.sections.len() {
            self.row += 1;
        }
    }

    pub fn prev_row(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn up(&mut self) {
        if let Some(list) = self.lists.get_mut(self.row) {
            list.up();
        }
    }

    pub fn down(&mut self) {
        if let Some(list) = self.lists.get_mut(self.row) {
            list.down();
        }
    }

    /// Featured title: first item of the first remote row
    pub fn hero(&self) -> Option<&Media> {
        self.sections
            .iter()
            .find(|s| s.id != CONTINUE_ROW_ID)
            .and_then(|s| s.items.first())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub input: TextInput,
    /// Query of the last submitted search
    pub submitted: String,
    pub results: SearchResults,
    pub list: ListState,
    pub loading: LoadingState,
}

impl SearchState {
    pub fn set_results(&mut self, results: SearchResults) {
        self.list.reset();
        self.list.set_len(results.len());
        self.results = results;
        self.loading = LoadingState::Idle;
    }

    /// Movies first, then TV shows
    pub fn selected_result(&self) -> Option<&Media> {
        self.results.all().nth(self.list.selected)
    }
}

/// Detail modal and detail page share this state
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub key: Option<MediaKey>,
    pub detail: Option<Box<MediaDetail>>,
    /// Selection across "More Like This" then "Recommended For You"
    pub related: ListState,
    pub loading: LoadingState,
}

impl DetailState {
    pub fn begin(&mut self, key: MediaKey) {
        self.key = Some(key);
        self.detail = None;
        self.related = ListState::default();
        self.loading = LoadingState::Loading(Some("Loading details...".into()));
    }

    pub fn set_detail(&mut self, detail: Box<MediaDetail>) {
        self.related = ListState::new(detail.related().count());
        self.detail = Some(detail);
        self.loading = LoadingState::Idle;
    }

    pub fn selected_related(&self) -> Option<&Media> {
        self.detail
            .as_ref()
            .and_then(|d| d.related().nth(self.related.selected))
    }

    pub fn trailer(&self) -> Option<&Video> {
        self.detail.as_ref().and_then(|d| select_trailer(&d.videos))
    }
}

/// Simulated playback of a title's trailer page.
///
/// Nothing is decoded; position advances on the UI clock while playing so
/// the transport controls and continue-watching progress behave like a
/// player would.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchSession {
    pub media: Media,
    pub trailer: Option<Video>,
    /// Seconds
    pub position: u64,
    /// Seconds, 0 when the runtime is unknown
    pub duration: u64,
    pub playing: bool,
}

impl WatchSession {
    pub fn new(detail: &MediaDetail) -> Self {
        Self {
            media: detail.media.clone(),
            trailer: select_trailer(&detail.videos).cloned(),
            position: 0,
            duration: detail.runtime.map(|m| u64::from(m) * 60).unwrap_or(0),
            playing: true,
        }
    }

    pub fn resume_at(mut self, seconds: u64) -> Self {
        self.seek_to(seconds);
        self
    }

    pub fn seek_to(&mut self, seconds: u64) {
        self.position = if self.duration > 0 {
            seconds.min(self.duration)
        } else {
            seconds
        };
    }

    pub fn seek_forward(&mut self) {
        self.seek_to(self.position + SEEK_STEP_SECS);
    }

    pub fn seek_backward(&mut self) {
        self.position = self.position.saturating_sub(SEEK_STEP_SECS);
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    /// Advance the clock; playback stops at the end
    pub fn tick(&mut self, secs: u64) {
        if !self.playing {
            return;
        }
        self.seek_to(self.position + secs);
        if self.duration > 0 && self.position >= self.duration {
            self.playing = false;
        }
    }

    pub fn progress(&self) -> u8 {
        calculate_progress(self.position, self.duration)
    }

    /// Continue-watching entry for this session, if anything was watched
    pub fn to_progress_item(&self) -> Option<ContinueWatchingItem> {
        let progress = self.progress();
        (progress > 0).then(|| ContinueWatchingItem::from_media(&self.media, progress, self.position))
    }

    pub fn watch_url(&self) -> Option<String> {
        self.trailer.as_ref().map(|t| youtube_watch_url(&t.key))
    }

    pub fn embed_url(&self, muted: bool) -> Option<String> {
        self.trailer.as_ref().map(|t| youtube_embed_url(&t.key, muted))
    }
}

/// Wall clock driving `App::tick`. Only whole seconds are handed out; the
/// remainder carries over to the next call.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    last: Instant,
}

impl PlaybackClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whole seconds elapsed since the last call that returned any
    pub fn take_secs(&mut self, now: Instant) -> u64 {
        let secs = now.saturating_duration_since(self.last).as_secs();
        self.last += Duration::from_secs(secs);
        secs
    }
}

#[derive(Debug, Clone, Default)]
pub struct WatchState {
    pub key: Option<MediaKey>,
    pub session: Option<WatchSession>,
    pub loading: LoadingState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub mode: LoginMode,
    pub name: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    /// Index into `fields()`
    pub focus: usize,
    pub error: Option<String>,
}

impl LoginState {
    pub fn fields(&self) -> &'static [LoginField] {
        match self.mode {
            LoginMode::SignIn => &[LoginField::Email, LoginField::Password],
            LoginMode::SignUp => &[LoginField::Name, LoginField::Email, LoginField::Password],
        }
    }

    pub fn focused(&self) -> LoginField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn input_mut(&mut self, field: LoginField) -> &mut TextInput {
        match field {
            LoginField::Name => &mut self.name,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn prev_field(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
        self.focus = 0;
        self.error = None;
    }
}

/// "Add Profile" form
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: TextInput,
    pub is_kids: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfilesState {
    /// Profiles plus a trailing "Add Profile" entry when there is room
    pub list: ListState,
    pub form: Option<ProfileForm>,
}

#[derive(Debug, Clone, Default)]
pub struct AccountState {
    /// Waiting for `y` to confirm wiping local data
    pub confirm_clear: bool,
}

// =============================================================================
// Async requests
// =============================================================================

/// Work the event loop performs off the UI task
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Sections(NavTarget),
    Search(String),
    Details(MediaKey),
    Watch(MediaKey),
    OpenTrailer { url: String, opener: OpenerKind },
}

/// Result of a [`Request`]
#[derive(Debug)]
pub enum Response {
    Sections {
        target: NavTarget,
        result: Result<Vec<Section>, String>,
    },
    Search {
        query: String,
        result: Result<SearchResults, String>,
    },
    Details {
        key: MediaKey,
        result: Result<Box<MediaDetail>, String>,
    },
    Watch {
        key: MediaKey,
        result: Result<Box<MediaDetail>, String>,
    },
    /// Name of the opener that took the URL
    TrailerOpened(Result<String, String>),
}

/// Run one request against TMDB or the trailer opener
pub async fn perform(client: &TmdbClient, request: Request) -> Response {
    debug!(?request, "performing request");
    match request {
        Request::Sections(target) => Response::Sections {
            target,
            result: client
                .fetch_sections(sections_for(target))
                .await
                .map_err(|e| e.to_string()),
        },
        Request::Search(query) => {
            let result = client.search(&query).await.map_err(|e| e.to_string());
            Response::Search { query, result }
        }
        Request::Details(key) => Response::Details {
            key,
            result: client
                .details(key.media_type, key.id)
                .await
                .map(Box::new)
                .map_err(|e| e.to_string()),
        },
        Request::Watch(key) => Response::Watch {
            key,
            result: client
                .details(key.media_type, key.id)
                .await
                .map(Box::new)
                .map_err(|e| e.to_string()),
        },
        Request::OpenTrailer { url, opener } => Response::TrailerOpened(
            TrailerLauncher::new(opener)
                .open(&url)
                .map(|_| opener.to_string())
                .map_err(|e| e.to_string()),
        ),
    }
}

// =============================================================================
// Main Application State
// =============================================================================

#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub nav_stack: Vec<Screen>,
    pub running: bool,
    pub input_mode: InputMode,
    /// Shown in the error popup
    pub error: Option<String>,
    /// One-line status message
    pub notice: Option<String>,

    pub store: Store,
    pub opener: OpenerKind,

    pub rows: RowsState,
    pub my_list: ListState,
    pub search: SearchState,
    pub detail: DetailState,
    pub watch: WatchState,
    pub login: LoginState,
    pub profiles: ProfilesState,
    pub account: AccountState,
    pub menu: ListState,

    requests: Vec<Request>,
}

impl App {
    /// Create the app on the page that fits the stored account
    pub fn new(store: Store) -> Self {
        let start = Self::start_page(&store);
        let mut app = Self {
            screen: start,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,
            notice: None,
            store,
            opener: OpenerKind::default(),
            rows: RowsState::default(),
            my_list: ListState::default(),
            search: SearchState::default(),
            detail: DetailState::default(),
            watch: WatchState::default(),
            login: LoginState::default(),
            profiles: ProfilesState::default(),
            account: AccountState::default(),
            menu: ListState::new(menu_items().len()),
            requests: Vec::new(),
        };
        app.reset_to(start);
        app
    }

    pub fn with_opener(mut self, opener: OpenerKind) -> Self {
        self.opener = opener;
        self
    }

    /// Login when signed out, profile picker without an active profile, else Home
    pub fn start_page(store: &Store) -> Screen {
        if !store.is_authenticated() {
            Screen::Login
        } else if store.active_profile().is_none() {
            Screen::Profiles
        } else {
            Screen::Home
        }
    }

    /// Drain queued requests for the event loop
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    fn request(&mut self, request: Request) {
        self.requests.push(request);
    }

    pub fn is_modal_open(&self) -> bool {
        self.store.ui.is_modal_open
    }

    pub fn is_menu_open(&self) -> bool {
        self.store.ui.is_mobile_menu_open
    }

    pub fn is_kids_mode(&self) -> bool {
        self.store.user.is_kids_mode()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    fn gate(&self, page: Screen) -> Screen {
        if page.requires_auth() && !self.store.is_authenticated() {
            Screen::Login
        } else {
            page
        }
    }

    /// Navigate to a page, pushing the current one to the stack
    pub fn navigate(&mut self, page: Screen) {
        let page = self.gate(page);
        if self.screen != page {
            if self.screen == Screen::Watch {
                self.finish_watch();
            }
            self.nav_stack.push(self.screen);
            self.screen = page;
            debug!(?page, "navigate");
        }
        self.input_mode = InputMode::Normal;
        self.enter(page);
    }

    /// Replace the whole history with one page
    pub fn reset_to(&mut self, page: Screen) {
        if self.screen == Screen::Watch {
            self.finish_watch();
        }
        let page = self.gate(page);
        self.nav_stack.clear();
        self.screen = page;
        self.input_mode = InputMode::Normal;
        self.store.dispatch(UiAction::CloseModal);
        self.store.dispatch(UiAction::SetMobileMenuOpen(false));
        self.enter(page);
    }

    /// Go back: leave editing, then close the modal, then pop the stack
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if self.is_modal_open() {
            self.store.dispatch(UiAction::CloseModal);
            return true;
        }

        match self.nav_stack.pop() {
            Some(prev) => {
                if self.screen == Screen::Watch {
                    self.finish_watch();
                }
                self.screen = prev;
                self.enter(prev);
                true
            }
            None => false,
        }
    }

    /// Per-page setup when a page becomes current
    fn enter(&mut self, page: Screen) {
        match page {
            Screen::Home | Screen::Movies | Screen::Tv | Screen::NewPopular => {
                if let Some(target) = page.nav_target() {
                    if self.rows.target != Some(target) || self.rows.sections.is_empty() {
                        self.load_rows(target);
                    }
                }
            }
            Screen::MyList => self.my_list.set_len(self.store.watchlist.items.len()),
            Screen::Profiles => {
                self.profiles.form = None;
                self.sync_profile_list();
            }
            Screen::Login => {
                self.login = LoginState::default();
                self.input_mode = InputMode::Editing;
            }
            Screen::Account => self.account = AccountState::default(),
            Screen::Search | Screen::Detail | Screen::Watch => {}
        }
    }

    pub fn quit(&mut self) {
        if self.screen == Screen::Watch {
            self.finish_watch();
        }
        self.running = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Jump to the search page with the query field focused
    pub fn focus_search(&mut self) {
        if matches!(self.screen, Screen::Login | Screen::Profiles) {
            return;
        }
        self.store.dispatch(UiAction::CloseModal);
        self.navigate(Screen::Search);
        self.input_mode = InputMode::Editing;
        self.store.dispatch(UiAction::SetSearchOpen(true));
    }

    // -------------------------------------------------------------------------
    // Data flow
    // -------------------------------------------------------------------------

    /// Fetch the rows of a browse page
    pub fn load_rows(&mut self, target: NavTarget) {
        if sections_for(target).is_empty() {
            return;
        }
        self.rows.target = Some(target);
        self.rows.clear();
        self.rows.loading = LoadingState::Loading(Some("Loading...".into()));
        self.request(Request::Sections(target));
    }

    fn kids_filter(&self, items: Vec<Media>) -> Vec<Media> {
        if self.is_kids_mode() {
            items.into_iter().filter(is_kids_friendly).collect()
        } else {
            items
        }
    }

    /// Apply the result of a finished request. Stale results are dropped.
    pub fn apply(&mut self, response: Response) {
        match response {
            Response::Sections { target, result } => {
                if self.rows.target != Some(target) {
                    return;
                }
                match result {
                    Ok(sections) => {
                        let sections = sections
                            .into_iter()
                            .map(|mut s| {
                                s.items = self.kids_filter(s.items);
                                s
                            })
                            .collect();
                        self.rows.set_sections(sections);
                        if target == NavTarget::Home {
                            self.sync_continue_row();
                        }
                    }
                    Err(e) => {
                        self.rows.loading = LoadingState::Error(e.clone());
                        self.set_error(e);
                    }
                }
            }
            Response::Search { query, result } => {
                if self.search.submitted != query {
                    return;
                }
                match result {
                    Ok(mut results) => {
                        results.movies = self.kids_filter(results.movies);
                        results.tv_shows = self.kids_filter(results.tv_shows);
                        self.search.set_results(results);
                    }
                    Err(e) => {
                        self.search.loading = LoadingState::Error(e.clone());
                        self.set_error(e);
                    }
                }
            }
            Response::Details { key, result } => {
                if self.detail.key != Some(key) {
                    return;
                }
                match result {
                    Ok(mut detail) => {
                        detail.similar = self.kids_filter(std::mem::take(&mut detail.similar));
                        detail.recommendations =
                            self.kids_filter(std::mem::take(&mut detail.recommendations));
                        self.detail.set_detail(detail);
                    }
                    Err(e) => {
                        self.detail.loading = LoadingState::Error(e.clone());
                        self.set_error(e);
                    }
                }
            }
            Response::Watch { key, result } => {
                if self.watch.key != Some(key) {
                    return;
                }
                match result {
                    Ok(detail) => {
                        let resume = self
                            .store
                            .continue_watching_item(key.id, key.media_type)
                            .map(|item| item.timestamp)
                            .unwrap_or(0);
                        self.watch.session = Some(WatchSession::new(&detail).resume_at(resume));
                        self.watch.loading = LoadingState::Idle;
                    }
                    Err(e) => {
                        self.watch.loading = LoadingState::Error(e.clone());
                        self.set_error(e);
                    }
                }
            }
            Response::TrailerOpened(result) => match result {
                Ok(opener) => self.notice = Some(format!("Trailer opened in {}", opener)),
                Err(e) => self.set_error(e),
            },
        }
    }

    /// Advance the watch clock
    pub fn tick(&mut self, secs: u64) {
        if self.screen != Screen::Watch {
            return;
        }
        if let Some(session) = self.watch.session.as_mut() {
            session.tick(secs);
        }
    }

    /// Rebuild the "Continue Watching" row on Home from the store
    fn sync_continue_row(&mut self) {
        if self.rows.target != Some(NavTarget::Home) || self.rows.loading.is_loading() {
            return;
        }
        let mut sections: Vec<Section> = self
            .rows
            .sections
            .iter()
            .filter(|s| s.id != CONTINUE_ROW_ID)
            .cloned()
            .collect();

        let items = &self.store.continue_watching.items;
        if self.store.is_authenticated() && !items.is_empty() {
            let title = match self.store.active_profile() {
                Some(profile) => format!("Continue Watching for {}", profile.name),
                None => "Continue Watching".to_string(),
            };
            let media = items.iter().map(Media::from).collect();
            sections.insert(0, Section::new(CONTINUE_ROW_ID, title, media));
        }
        self.rows.set_sections(sections);
    }

    fn sync_profile_list(&mut self) {
        let extra = usize::from(self.store.user.can_add_profile());
        self.profiles
            .list
            .set_len(self.store.user.profiles().len() + extra);
    }

    /// Title under the cursor on the current page
    fn selected_media(&self) -> Option<Media> {
        match self.screen {
            Screen::Home | Screen::Movies | Screen::Tv | Screen::NewPopular => {
                self.rows.selected_media().cloned()
            }
            Screen::Search => self.search.selected_result().cloned(),
            Screen::MyList => self
                .store
                .watchlist
                .items
                .get(self.my_list.selected)
                .map(Media::from),
            Screen::Detail => self.detail.detail.as_ref().map(|d| d.media.clone()),
            _ => None,
        }
    }

    /// Title shown in the modal or on the detail page
    fn focused_detail_media(&self) -> Option<Media> {
        self.detail.detail.as_ref().map(|d| d.media.clone())
    }

    pub fn open_modal(&mut self, key: MediaKey) {
        if self.detail.key != Some(key) || self.detail.detail.is_none() {
            self.detail.begin(key);
            self.request(Request::Details(key));
        }
        self.store.dispatch(UiAction::OpenModal(key));
    }

    pub fn open_detail_page(&mut self, key: MediaKey) {
        if self.detail.key != Some(key) || self.detail.detail.is_none() {
            self.detail.begin(key);
            self.request(Request::Details(key));
        }
        self.store.dispatch(UiAction::CloseModal);
        self.navigate(Screen::Detail);
    }

    pub fn start_watch(&mut self, key: MediaKey) {
        if self.screen == Screen::Watch {
            self.finish_watch();
        }
        self.store.dispatch(UiAction::CloseModal);
        self.watch = WatchState {
            key: Some(key),
            session: None,
            loading: LoadingState::Loading(Some("Loading...".into())),
        };
        self.request(Request::Watch(key));
        self.navigate(Screen::Watch);
    }

    /// Record progress of the current session, if any was made
    fn finish_watch(&mut self) {
        let Some(session) = self.watch.session.take() else {
            return;
        };
        self.watch.key = None;
        if let Some(item) = session.to_progress_item() {
            info!(title = %item.title, progress = item.progress, "recording progress");
            self.store
                .dispatch(ContinueWatchingAction::UpdateProgress(item));
            self.sync_continue_row();
        }
    }

    pub fn toggle_watchlist(&mut self, media: &Media) {
        let key = media.key();
        if self.store.watchlist.contains(key) {
            self.store
                .dispatch(WatchlistAction::RemoveFromWatchlist(key));
            self.notice = Some(format!("Removed {} from My List", media.title));
        } else {
            self.store
                .dispatch(WatchlistAction::AddToWatchlist(WatchlistItem::from_media(media)));
            self.notice = Some(format!("Added {} to My List", media.title));
        }
        self.my_list.set_len(self.store.watchlist.items.len());
    }

    /// Hand the trailer URL to the external opener
    pub fn open_trailer(&mut self) {
        let trailer = if self.screen == Screen::Watch && !self.is_modal_open() {
            self.watch.session.as_ref().and_then(|s| s.trailer.clone())
        } else {
            self.detail.trailer().cloned()
        };
        match trailer {
            Some(video) => {
                let url = youtube_watch_url(&video.key);
                self.request(Request::OpenTrailer {
                    url,
                    opener: self.opener,
                });
            }
            None => self.set_error("No trailer available"),
        }
    }

    fn submit_search(&mut self) {
        let query = self.search.input.value.trim().to_string();
        self.search.submitted = query.clone();
        if query.is_empty() {
            self.search.set_results(SearchResults::default());
            return;
        }
        self.search.loading = LoadingState::Loading(Some(format!("Searching for {}...", query)));
        self.request(Request::Search(query));
    }

    fn submit_login(&mut self) {
        let email = self.login.email.value.trim().to_string();
        let checked = match self.login.mode {
            LoginMode::SignUp => check_sign_up(&email, &self.login.name.value),
            LoginMode::SignIn => check_sign_in(self.store.storage(), &email),
        };
        if let Err(e) = checked {
            self.login.error = Some(e.to_string());
            return;
        }

        let password = self.login.password.value.clone();
        let accepted = match self.login.mode {
            LoginMode::SignUp => self.store.dispatch(UserAction::SignUp {
                email,
                name: self.login.name.value.trim().to_string(),
                password,
            }),
            LoginMode::SignIn => self.store.dispatch(UserAction::SignIn { email, password }),
        };
        if accepted {
            self.reset_to(Screen::Profiles);
        } else {
            self.login.error = Some(AuthError::InvalidCredentials.to_string());
        }
    }

    fn submit_profile_form(&mut self) {
        let Some(form) = self.profiles.form.as_mut() else {
            return;
        };
        let name = form.name.value.trim().to_string();
        if name.is_empty() {
            form.error = Some("Please enter a name".into());
            return;
        }
        let profile = NewProfile {
            name,
            avatar: random_avatar_color().to_string(),
            is_kids: form.is_kids,
            maturity_level: if form.is_kids {
                MaturityLevel::Pg
            } else {
                MaturityLevel::R
            },
        };
        if self.store.dispatch(UserAction::AddProfile(profile)) {
            self.profiles.form = None;
            self.input_mode = InputMode::Normal;
            self.sync_profile_list();
        } else if let Some(form) = self.profiles.form.as_mut() {
            form.error = Some("Profile limit reached".into());
        }
    }

    fn selected_profile(&self) -> Option<UserProfile> {
        self.store
            .user
            .profiles()
            .get(self.profiles.list.selected)
            .cloned()
    }

    fn sign_out(&mut self) {
        self.store.dispatch(UserAction::SignOut);
        self.rows = RowsState::default();
        self.reset_to(Screen::Login);
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if the event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Any keypress dismisses messages
        self.error = None;
        self.notice = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            return self.handle_editing_key(key);
        }
        if self.is_menu_open() {
            return self.handle_menu_key(key);
        }
        if self.is_modal_open() {
            return self.handle_modal_key(key);
        }
        self.handle_normal_key(key)
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match self.screen {
            Screen::Login => self.handle_login_editing_key(key),
            Screen::Profiles => self.handle_profile_form_key(key),
            _ => self.handle_search_editing_key(key),
        }
    }

    fn handle_search_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.submit_search();
                true
            }
            _ => self.search.input.handle_key(key),
        }
    }

    fn handle_login_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Enter => {
                self.submit_login();
                true
            }
            KeyCode::Tab | KeyCode::Down => {
                self.login.next_field();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.login.prev_field();
                true
            }
            _ => {
                let field = self.login.focused();
                self.login.input_mut(field).handle_key(key)
            }
        }
    }

    fn handle_profile_form_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.profiles.form = None;
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Enter => {
                self.submit_profile_form();
                true
            }
            KeyCode::Tab => {
                if let Some(form) = self.profiles.form.as_mut() {
                    form.is_kids = !form.is_kids;
                }
                true
            }
            _ => match self.profiles.form.as_mut() {
                Some(form) => form.name.handle_key(key),
                None => false,
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.menu.up(),
            KeyCode::Down | KeyCode::Char('j') => self.menu.down(),
            KeyCode::Enter => {
                self.store.dispatch(UiAction::SetMobileMenuOpen(false));
                if let Some((_, page)) = menu_items().get(self.menu.selected) {
                    self.navigate(*page);
                }
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::Char('q') => {
                self.store.dispatch(UiAction::SetMobileMenuOpen(false));
            }
            _ => return false,
        }
        true
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.store.dispatch(UiAction::CloseModal);
            }
            KeyCode::Enter | KeyCode::Char('i') => {
                if let Some(key) = self.detail.key {
                    self.open_detail_page(key);
                }
            }
            KeyCode::Char('p') => {
                if let Some(key) = self.detail.key {
                    self.start_watch(key);
                }
            }
            KeyCode::Char('+') => {
                if let Some(media) = self.focused_detail_media() {
                    self.toggle_watchlist(&media);
                }
            }
            KeyCode::Char('o') => self.open_trailer(),
            KeyCode::Char('m') => {
                self.store.dispatch(UiAction::ToggleMute);
            }
            KeyCode::Up | KeyCode::Char('k') => self.detail.related.up(),
            KeyCode::Down | KeyCode::Char('j') => self.detail.related.down(),
            _ => return false,
        }
        true
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        // Login and the profile picker have their own exits
        match self.screen {
            Screen::Login => return self.handle_login_key(key),
            Screen::Profiles => {
                if self.handle_profiles_key(key) {
                    return true;
                }
            }
            _ => {}
        }

        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') => {
                self.focus_search();
                return true;
            }
            KeyCode::Tab if self.screen != Screen::Profiles => {
                self.menu.set_len(menu_items().len());
                self.store.dispatch(UiAction::ToggleMobileMenu);
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            _ => {}
        }

        match self.screen {
            Screen::Home | Screen::Movies | Screen::Tv | Screen::NewPopular => self.handle_browse_key(key),
            Screen::MyList => self.handle_my_list_key(key),
            Screen::Search => self.handle_search_key(key),
            Screen::Detail => self.handle_detail_key(key),
            Screen::Watch => self.handle_watch_key(key),
            Screen::Account => self.handle_account_key(key),
            Screen::Login | Screen::Profiles => false,
        }
    }

    /// Shared item actions: open modal, watch, toggle watchlist, detail page
    fn handle_item_key(&mut self, key: KeyEvent) -> bool {
        let Some(media) = self.selected_media() else {
            return false;
        };
        match key.code {
            KeyCode::Enter => self.open_modal(media.key()),
            KeyCode::Char('i') => self.open_detail_page(media.key()),
            KeyCode::Char('p') => self.start_watch(media.key()),
            KeyCode::Char('+') => self.toggle_watchlist(&media),
            _ => return false,
        }
        true
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        let handled = match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.rows.prev_row();
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.rows.next_row();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.rows.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.rows.down();
                true
            }
            KeyCode::Char('r') => {
                if let Some(target) = self.screen.nav_target() {
                    self.load_rows(target);
                }
                true
            }
            _ => self.handle_item_key(key),
        };
        if self.screen == Screen::Home {
            let scrolled = self.rows.row > 0;
            if scrolled != self.store.ui.is_nav_scrolled {
                self.store.dispatch(UiAction::SetNavScrolled(scrolled));
            }
        }
        handled
    }

    fn handle_my_list_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.my_list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.my_list.down(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(item) = self.store.watchlist.items.get(self.my_list.selected) {
                    let key = item.key();
                    self.store
                        .dispatch(WatchlistAction::RemoveFromWatchlist(key));
                    self.my_list.set_len(self.store.watchlist.items.len());
                }
            }
            _ => return self.handle_item_key(key),
        }
        true
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.search.list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.search.list.down(),
            KeyCode::PageUp => self.search.list.page_up(10),
            KeyCode::PageDown => self.search.list.page_down(10),
            KeyCode::Home => self.search.list.first(),
            KeyCode::End => self.search.list.last(),
            _ => return self.handle_item_key(key),
        }
        true
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.detail.related.up(),
            KeyCode::Down | KeyCode::Char('j') => self.detail.related.down(),
            KeyCode::Enter => {
                if let Some(related) = self.detail.selected_related() {
                    let key = related.key();
                    self.open_detail_page(key);
                }
            }
            KeyCode::Char('o') => self.open_trailer(),
            KeyCode::Char('p') => {
                if let Some(key) = self.detail.key {
                    self.start_watch(key);
                }
            }
            KeyCode::Char('+') => {
                if let Some(media) = self.focused_detail_media() {
                    self.toggle_watchlist(&media);
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_watch_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('m') {
            self.store.dispatch(UiAction::ToggleMute);
            return true;
        }
        if key.code == KeyCode::Char('o') {
            self.open_trailer();
            return true;
        }
        let Some(session) = self.watch.session.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('k') => session.toggle_play(),
            KeyCode::Left | KeyCode::Char('h') => session.seek_backward(),
            KeyCode::Right | KeyCode::Char('l') => session.seek_forward(),
            _ => return false,
        }
        true
    }

    fn handle_account_key(&mut self, key: KeyEvent) -> bool {
        if self.account.confirm_clear {
            self.account.confirm_clear = false;
            if key.code == KeyCode::Char('y') {
                self.store.clear_all_data();
                self.rows = RowsState::default();
                self.reset_to(Screen::Login);
            }
            return true;
        }
        match key.code {
            KeyCode::Char('o') => self.sign_out(),
            KeyCode::Char('x') => self.account.confirm_clear = true,
            KeyCode::Char('p') => self.navigate(Screen::Profiles),
            _ => return false,
        }
        true
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Enter | KeyCode::Char('i') => self.input_mode = InputMode::Editing,
            KeyCode::Char('s') => {
                self.login.toggle_mode();
                self.input_mode = InputMode::Editing;
            }
            // Browse without an account
            KeyCode::Char('g') => self.reset_to(Screen::Home),
            _ => return false,
        }
        true
    }

    fn handle_profiles_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left => self.profiles.list.up(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right => self.profiles.list.down(),
            KeyCode::Enter => match self.selected_profile() {
                Some(profile) => {
                    self.store
                        .dispatch(UserAction::SetActiveProfile(profile.id));
                    self.profile_changed();
                    self.reset_to(Screen::Home);
                }
                None => self.open_profile_form(),
            },
            KeyCode::Char('a') => self.open_profile_form(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(profile) = self.selected_profile() {
                    if !self
                        .store
                        .dispatch(UserAction::DeleteProfile(profile.id))
                    {
                        self.set_error("You need at least one profile");
                    }
                    self.sync_profile_list();
                }
            }
            KeyCode::Char('t') => {
                if let Some(mut profile) = self.selected_profile() {
                    profile.is_kids = !profile.is_kids;
                    profile.maturity_level = if profile.is_kids {
                        MaturityLevel::Pg
                    } else {
                        MaturityLevel::R
                    };
                    let is_active = self.store.active_profile().map(|p| &p.id) == Some(&profile.id);
                    self.store.dispatch(UserAction::UpdateProfile(profile));
                    if is_active {
                        self.profile_changed();
                    }
                }
            }
            KeyCode::Char('q') if self.nav_stack.is_empty() => self.quit(),
            KeyCode::Esc if self.nav_stack.is_empty() => {}
            _ => return false,
        }
        true
    }

    /// Drop content filtered for the previous profile and refetch what is on screen
    fn profile_changed(&mut self) {
        self.rows = RowsState::default();
        if let Some(key) = self.detail.key {
            self.detail.begin(key);
            self.request(Request::Details(key));
        }
        let query = self.search.submitted.clone();
        if !query.is_empty() {
            self.search.loading = LoadingState::Loading(Some(format!("Searching for {}...", query)));
            self.request(Request::Search(query));
        }
    }

    fn open_profile_form(&mut self) {
        if !self.store.user.can_add_profile() {
            self.set_error("Profile limit reached");
            return;
        }
        self.profiles.form = Some(ProfileForm::default());
        self.input_mode = InputMode::Editing;
    }
}

// =============================================================================
// Tests
// =============================================================================
