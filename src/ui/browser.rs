//! Browse views
//!
//! Home, Movies, TV Shows and New & Popular render as a hero banner over
//! horizontal rows of title cards. My List and search results use the
//! vertical media list.

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState as ViewState, Paragraph, Wrap},
};

use crate::app::{App, ListState, LoadingState, RowsState, Screen, CONTINUE_ROW_ID};
use crate::catalog::genre_names;
use crate::models::{format_rating, truncate_text, Media, MediaType, Section};
use crate::ui::{panel, render_message, Theme};

/// Characters of title shown on one card
const CARD_TITLE_WIDTH: usize = 18;

/// Lines used by one row: title, cards, spacer
const ROW_HEIGHT: u16 = 3;

const HERO_HEIGHT: u16 = 7;

/// Render a browse page for the current screen
pub fn render_browse(frame: &mut Frame, area: Rect, app: &App) {
    let rows = &app.rows;

    match &rows.loading {
        LoadingState::Loading(msg) => {
            render_message(frame, area, msg.as_deref().unwrap_or("Loading..."), Theme::loading());
            return;
        }
        LoadingState::Error(msg) if rows.sections.is_empty() => {
            render_message(frame, area, &format!("{}  (r to retry)", msg), Theme::error());
            return;
        }
        _ => {}
    }

    if rows.sections.is_empty() {
        render_message(frame, area, "Nothing to show here yet", Theme::dimmed());
        return;
    }

    let show_hero = app.screen == Screen::Home && area.height > HERO_HEIGHT + ROW_HEIGHT * 2;
    let (hero_area, rows_area) = if show_hero {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(HERO_HEIGHT), Constraint::Min(ROW_HEIGHT)])
            .split(area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, area)
    };

    if let (Some(hero_area), Some(hero)) = (hero_area, rows.hero()) {
        render_hero(frame, hero_area, hero, app.store.is_in_watchlist(hero.id, hero.media_type));
    }

    // Preview of the selected card under the rows
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(ROW_HEIGHT), Constraint::Length(4)])
        .split(rows_area);
    render_rows(frame, chunks[0], rows, app);
    if let Some(media) = rows.selected_media() {
        render_preview(frame, chunks[1], media);
    }
}

/// Featured banner: title, metadata, overview and buttons
fn render_hero(frame: &mut Frame, area: Rect, media: &Media, in_list: bool) {
    let mut lines = vec![
        Line::from(Span::styled(media.title.to_uppercase(), Theme::title())),
        meta_line(media),
        Line::from(Span::styled(
            truncate_text(&media.overview, (area.width as usize).saturating_mul(2).max(40)),
            Theme::text(),
        )),
    ];
    lines.push(Line::from(vec![
        Span::styled(" ▶ Play ", Theme::highlighted()),
        Span::raw("  "),
        Span::styled(" ⓘ More Info ", Theme::badge()),
        Span::raw("  "),
        Span::styled(
            if in_list { " ✓ My List " } else { " + My List " },
            Theme::secondary(),
        ),
    ]));

    let hero = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(ratatui::widgets::Block::default().padding(ratatui::widgets::Padding::horizontal(2)));
    frame.render_widget(hero, area);
}

/// Rows of cards, windowed so the focused row stays visible
fn render_rows(frame: &mut Frame, area: Rect, rows: &RowsState, app: &App) {
    let visible = (area.height / ROW_HEIGHT).max(1) as usize;
    let first = first_visible(rows.row, visible, rows.sections.len());

    for (slot, index) in (first..rows.sections.len()).take(visible).enumerate() {
        let section = &rows.sections[index];
        let row_area = Rect {
            x: area.x + 2,
            y: area.y + slot as u16 * ROW_HEIGHT,
            width: area.width.saturating_sub(4),
            height: ROW_HEIGHT.min(area.height.saturating_sub(slot as u16 * ROW_HEIGHT)),
        };
        let focused = index == rows.row;
        let selected = rows.lists.get(index).map(|l| l.selected).unwrap_or(0);
        render_row(frame, row_area, section, focused, selected, app);
    }
}

/// First row index to draw so `focused` is inside a window of `visible`
pub fn first_visible(focused: usize, visible: usize, total: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    focused
        .saturating_sub(visible - 1)
        .min(total - visible)
}

fn render_row(
    frame: &mut Frame,
    area: Rect,
    section: &Section,
    focused: bool,
    selected: usize,
    app: &App,
) {
    let title_style = if focused { Theme::title() } else { Theme::secondary() };
    let count = format!("  {}/{}", selected + 1, section.items.len());
    let title = Line::from(vec![
        Span::styled(if focused { "› " } else { "  " }, Theme::logo()),
        Span::styled(section.title.clone(), title_style),
        Span::styled(if focused { count } else { String::new() }, Theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(title), Rect { height: 1, ..area });

    if area.height < 2 {
        return;
    }
    let card_width = CARD_TITLE_WIDTH + 6;
    let per_row = (area.width as usize / card_width).max(1);
    let start = first_visible(selected, per_row, section.items.len());

    let mut spans = Vec::new();
    if start > 0 {
        spans.push(Span::styled("‹", Theme::dimmed()));
    }
    for (i, media) in section.items.iter().enumerate().skip(start).take(per_row) {
        let is_selected = focused && i == selected;
        let label = card_label(section, i, media, app);
        let style = if is_selected {
            Theme::highlighted()
        } else {
            Style::default().fg(Theme::TEXT).bg(Theme::BACKGROUND_LIGHT)
        };
        spans.push(Span::styled(
            format!(" {:<width$} ", label, width = card_width - 3),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    if start + per_row < section.items.len() {
        spans.push(Span::styled("›", Theme::dimmed()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Card text: rank for Top 10 rows, progress for Continue Watching
pub fn card_label(section: &Section, index: usize, media: &Media, app: &App) -> String {
    let title = truncate_text(&media.title, CARD_TITLE_WIDTH);
    if section.id == CONTINUE_ROW_ID {
        let progress = app
            .store
            .continue_watching_item(media.id, media.media_type)
            .map(|c| c.progress)
            .unwrap_or(0);
        format!("{} {}%", title, progress)
    } else if section.show_rank {
        format!("{} {}", index + 1, title)
    } else {
        title
    }
}

fn render_preview(frame: &mut Frame, area: Rect, media: &Media) {
    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", media.media_type.badge()), Theme::badge()),
            Span::raw(" "),
            Span::styled(media.title.clone(), Theme::title()),
        ]),
        meta_line(media),
        Line::from(Span::styled(media.overview.clone(), Theme::dimmed())),
    ];
    let preview = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(ratatui::widgets::Block::default().padding(ratatui::widgets::Padding::horizontal(2)));
    frame.render_widget(preview, area);
}

/// "★ 7.8  2024  Action · Comedy"
pub fn meta_line(media: &Media) -> Line<'static> {
    let mut spans = Vec::new();
    if media.vote_average > 0.0 {
        spans.push(Span::styled(
            format!("★ {}", format_rating(media.vote_average)),
            Theme::rating(media.vote_average),
        ));
        spans.push(Span::raw("  "));
    }
    if let Some(year) = media.year {
        spans.push(Span::styled(year.to_string(), Theme::year()));
        spans.push(Span::raw("  "));
    }
    let genres = genre_names(media.media_type, &media.genre_ids);
    if !genres.is_empty() {
        spans.push(Span::styled(genres.join(" · "), Theme::genre()));
    }
    Line::from(spans)
}

/// One line of a vertical media list
///
/// Format: ▸ Title (Year)   [MOVIE] ★ 8.5
pub fn media_item(media: &Media, is_selected: bool, in_list: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let year_str = media.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    let type_str = match media.media_type {
        MediaType::Movie => "MOVIE",
        MediaType::Tv => "TV",
    };

    let mut spans = vec![
        Span::styled(marker.to_string(), Theme::logo()),
        Span::styled(
            media.title.clone(),
            if is_selected { Theme::list_item_selected() } else { Theme::text() },
        ),
        Span::styled(year_str, Theme::year()),
        Span::raw(" "),
        Span::styled(format!("[{}]", type_str), Theme::secondary()),
    ];
    if media.vote_average > 0.0 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("★ {:.1}", media.vote_average),
            Theme::rating(media.vote_average),
        ));
    }
    if in_list {
        spans.push(Span::styled("  ✓", Theme::success()));
    }
    ListItem::new(Line::from(spans))
}

/// Vertical list of titles with the selection kept in view
pub fn render_media_list<'a>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: impl Iterator<Item = &'a Media>,
    list: &ListState,
    focused: bool,
    app: &App,
) {
    let items: Vec<ListItem> = items
        .enumerate()
        .map(|(i, m)| media_item(m, focused && i == list.selected, app.store.is_in_watchlist(m.id, m.media_type)))
        .collect();
    let title = format!("{} ({}/{})", title, (list.selected + 1).min(items.len()), items.len());

    let widget = List::new(items).block(panel(&title, focused)).style(Theme::text());
    let mut state = ViewState::default()
        .with_offset(list.offset)
        .with_selected(Some(list.selected));
    frame.render_stateful_widget(widget, area, &mut state);
}

/// My List page
pub fn render_my_list(frame: &mut Frame, area: Rect, app: &App) {
    let items = &app.store.watchlist.items;
    if items.is_empty() {
        render_message(
            frame,
            area,
            "Your list is empty. Press + on any title to add it.",
            Theme::dimmed(),
        );
        return;
    }

    let media: Vec<Media> = items.iter().map(Media::from).collect();
    render_media_list(
        frame,
        area,
        "MY LIST",
        media.iter(),
        &app.my_list,
        !app.is_modal_open(),
        app,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_window() {
        assert_eq!(first_visible(0, 3, 10), 0);
        assert_eq!(first_visible(2, 3, 10), 0);
        assert_eq!(first_visible(3, 3, 10), 1);
        assert_eq!(first_visible(9, 3, 10), 7);
        assert_eq!(first_visible(5, 20, 10), 0);
        assert_eq!(first_visible(5, 0, 10), 0);
    }
}
