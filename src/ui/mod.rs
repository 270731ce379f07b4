//! Terminal UI components
//!
//! Built with ratatui in the StreamFlix look: red accents on near-black.
//! Everything here reads [`App`] and draws; state changes live in `app`.

pub mod browser;
pub mod detail;
pub mod login;
pub mod player;
pub mod profiles;
pub mod search;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::{menu_items, App, InputMode, Screen};
use crate::catalog::NAV_LINKS;

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    if app.is_modal_open() {
        detail::render_modal(frame, chunks[1], app);
    }
    if app.is_menu_open() {
        render_menu(frame, chunks[1], app);
    }
    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Logo
            Constraint::Min(1),     // Nav links
            Constraint::Length(28), // Profile
        ])
        .split(area);

    // Opaque bar with a rule once the page has scrolled
    let borders = if app.store.ui.is_nav_scrolled {
        Borders::BOTTOM
    } else {
        Borders::NONE
    };
    let bar = Block::default()
        .borders(borders)
        .border_style(Theme::border())
        .style(Style::default().bg(if app.store.ui.is_nav_scrolled {
            Theme::BACKGROUND_LIGHT
        } else {
            Theme::BACKGROUND
        }));
    frame.render_widget(bar, area);

    let logo = Paragraph::new(Span::styled("STREAMFLIX", Theme::logo()))
        .alignment(Alignment::Center)
        .block(Block::default().padding(ratatui::widgets::Padding::top(1)));
    frame.render_widget(logo, chunks[0]);

    if matches!(app.screen, Screen::Login | Screen::Profiles) {
        return;
    }

    let current = app.screen.nav_target();
    let mut spans = Vec::new();
    for (label, target) in NAV_LINKS {
        let style = if current == Some(*target) {
            Theme::title()
        } else {
            Theme::secondary()
        };
        spans.push(Span::styled(format!(" {} ", label), style));
    }
    let search_style = if app.screen == Screen::Search {
        Theme::title()
    } else {
        Theme::dimmed()
    };
    spans.push(Span::styled("  ⌕ /", search_style));
    let nav = Paragraph::new(Line::from(spans))
        .block(Block::default().padding(ratatui::widgets::Padding::top(1)));
    frame.render_widget(nav, chunks[1]);

    let mut profile_spans = Vec::new();
    match app.store.active_profile() {
        Some(profile) => {
            if profile.is_kids {
                profile_spans.push(Span::styled("KIDS ", Theme::kids()));
            }
            profile_spans.push(Span::styled(
                format!(" {} ", profile.initials()),
                Theme::avatar(&profile.avatar),
            ));
            profile_spans.push(Span::styled(format!(" {}", profile.name), Theme::text()));
        }
        None if !app.store.is_authenticated() => {
            profile_spans.push(Span::styled("Guest", Theme::dimmed()));
        }
        None => {}
    }
    let profile = Paragraph::new(Line::from(profile_spans))
        .alignment(Alignment::Right)
        .block(Block::default().padding(ratatui::widgets::Padding::new(0, 1, 1, 0)));
    frame.render_widget(profile, chunks[2]);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Login => login::render(frame, area, app),
        Screen::Profiles => profiles::render_profiles(frame, area, app),
        Screen::Account => profiles::render_account(frame, area, app),
        Screen::Home | Screen::Movies | Screen::Tv | Screen::NewPopular => {
            browser::render_browse(frame, area, app)
        }
        Screen::MyList => browser::render_my_list(frame, area, app),
        Screen::Search => search::render(frame, area, app),
        Screen::Detail => detail::render_page(frame, area, app),
        Screen::Watch => player::render(frame, area, app),
    }
}

/// Key hints for the current screen
fn key_hints(app: &App) -> &'static str {
    if app.input_mode == InputMode::Editing {
        return " enter:submit  tab:next field  esc:done ";
    }
    if app.is_menu_open() {
        return " ↑↓:move  enter:go  esc:close ";
    }
    if app.is_modal_open() {
        return " enter:details  p:play  +:my list  o:trailer  m:mute  esc:close ";
    }
    match app.screen {
        Screen::Login => " enter:edit  s:sign up/in  g:browse as guest  q:quit ",
        Screen::Profiles => " ←→:select  enter:choose  a:add  t:kids  d:delete  esc:back ",
        Screen::Home | Screen::Movies | Screen::Tv | Screen::NewPopular => {
            " h/l:row  j/k:title  enter:info  p:play  +:my list  tab:menu  /:search  q:quit "
        }
        Screen::MyList => " j/k:move  enter:info  p:play  d:remove  esc:back ",
        Screen::Search => " /:edit  j/k:move  enter:info  p:play  +:my list  esc:back ",
        Screen::Detail => " p:play  +:my list  o:trailer  j/k:similar  esc:back ",
        Screen::Watch => " space:play/pause  h/l:seek  m:mute  o:open trailer  esc:back ",
        Screen::Account => " p:profiles  o:sign out  x:clear data  esc:back ",
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::HIGHLIGHT).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let screen_indicator = Span::styled(
        format!(" {} ", app.screen.title().to_uppercase()),
        Style::default().fg(Theme::DIM),
    );

    let mut spans = vec![mode_indicator, screen_indicator];
    if app.store.ui.is_muted {
        spans.push(Span::styled("🔇 ", Theme::dimmed()));
    }
    match &app.notice {
        Some(notice) => spans.push(Span::styled(format!("│ {} ", notice), Theme::success())),
        None => spans.push(Span::styled(format!("│{}", key_hints(app)), Theme::keybind_desc())),
    }

    let status = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// Navigation menu popup
fn render_menu(frame: &mut Frame, area: Rect, app: &App) {
    let entries = menu_items();
    let height = (entries.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + 1,
        y: area.y,
        width: 24.min(area.width),
        height,
    };
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, screen))| {
            let selected = i == app.menu.selected;
            let marker = if selected { "▸ " } else { "  " };
            let style = if selected {
                Theme::list_item_selected()
            } else if *screen == app.screen {
                Theme::title()
            } else {
                Theme::list_item()
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Theme::logo()),
                Span::styled(label.to_string(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_focused())
            .title(Span::styled(" MENU ", Theme::title()))
            .style(Style::default().bg(Theme::BACKGROUND_LIGHT)),
    );
    frame.render_widget(list, popup);
}

fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 6;
    let popup_area = centered_rect(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
        Line::from(Span::styled("press any key", Theme::dimmed())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}

/// Rect of the given size centered in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Rounded panel with a title, red when focused
pub(crate) fn panel(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", title), Theme::title()))
}

/// Centered one-line message such as "Loading..." or an empty state
pub(crate) fn render_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let inner = centered_rect(area, area.width, 3);
    let paragraph = Paragraph::new(message.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(area, 60, 6);
        assert_eq!(r, Rect::new(20, 17, 60, 6));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(5, 5, 10, 4);
        let r = centered_rect(area, 60, 6);
        assert_eq!(r, area);
    }
}
