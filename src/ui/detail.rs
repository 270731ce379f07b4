//! Detail views for movies and TV shows
//!
//! The modal pops over browse pages; the page view adds the
//! "More Like This" and "Recommended For You" lists.

use ratatui::{
    prelude::*,
    widgets::{Clear, List, ListItem, ListState as ViewState, Paragraph, Wrap},
};

use crate::app::{App, DetailState, LoadingState};
use crate::models::{format_rating, Media, MediaDetail};
use crate::ui::browser::media_item;
use crate::ui::{centered_rect, panel, render_message, Theme};

/// Render the detail modal over the content area
pub fn render_modal(frame: &mut Frame, area: Rect, app: &App) {
    let width = (area.width * 4 / 5).max(40);
    let height = (area.height * 4 / 5).max(12);
    let popup = centered_rect(area, width, height);
    frame.render_widget(Clear, popup);

    let block = panel("DETAILS", true).style(Style::default().bg(Theme::BACKGROUND_LIGHT));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if !render_status(frame, inner, &app.detail) {
        return;
    }
    if let Some(detail) = app.detail.detail.as_deref() {
        let lines = info_lines(detail, app, inner.width);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

/// Full detail page: info on the left, related titles on the right
pub fn render_page(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let block = panel("INFO", !app.is_modal_open());
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    if !render_status(frame, inner, &app.detail) {
        return;
    }
    let Some(detail) = app.detail.detail.as_deref() else {
        return;
    };
    let lines = info_lines(detail, app, inner.width);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

    render_related(frame, chunks[1], detail, &app.detail, app);
}

/// Loading/error placeholder. Returns true when details are ready to draw.
fn render_status(frame: &mut Frame, area: Rect, state: &DetailState) -> bool {
    match &state.loading {
        LoadingState::Loading(msg) => {
            render_message(frame, area, msg.as_deref().unwrap_or("Loading..."), Theme::loading());
            false
        }
        LoadingState::Error(msg) => {
            render_message(frame, area, msg, Theme::error());
            false
        }
        LoadingState::Idle => state.detail.is_some(),
    }
}

fn info_lines(detail: &MediaDetail, app: &App, width: u16) -> Vec<Line<'static>> {
    let media = &detail.media;
    let mut lines = Vec::new();

    let year_str = media.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    lines.push(Line::from(vec![
        Span::styled(format!(" {} ", media.media_type.badge()), Theme::badge()),
        Span::raw(" "),
        Span::styled(media.title.clone(), Theme::title()),
        Span::styled(year_str, Theme::secondary()),
    ]));

    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", tagline),
            Theme::dimmed().add_modifier(Modifier::ITALIC),
        )));
    }

    let mut meta = vec![Span::styled(
        format!("★ {}", format_rating(media.vote_average)),
        Theme::rating(media.vote_average),
    )];
    if media.vote_count > 0 {
        meta.push(Span::styled(format!(" ({} votes)", media.vote_count), Theme::dimmed()));
    }
    if let Some(runtime) = detail.runtime_str() {
        meta.push(Span::styled(" │ ", Theme::dimmed()));
        meta.push(Span::styled(runtime, Theme::duration()));
    }
    if let Some(seasons) = detail.number_of_seasons {
        meta.push(Span::styled(" │ ", Theme::dimmed()));
        meta.push(Span::styled(
            format!("{} season{}", seasons, if seasons == 1 { "" } else { "s" }),
            Theme::duration(),
        ));
    }
    if !detail.status.is_empty() {
        meta.push(Span::styled(" │ ", Theme::dimmed()));
        meta.push(Span::styled(detail.status.clone(), Theme::secondary()));
    }
    lines.push(Line::from(meta));

    if !detail.genres.is_empty() {
        lines.push(Line::from(Span::styled(detail.genre_names(), Theme::genre())));
    }
    lines.push(Line::from(""));

    let in_list = app.store.is_in_watchlist(media.id, media.media_type);
    let has_trailer = app.detail.trailer().is_some();
    let mut buttons = vec![
        Span::styled(" ▶ Play ", Theme::highlighted()),
        Span::raw("  "),
        Span::styled(
            if in_list { " ✓ My List " } else { " + My List " },
            if in_list { Theme::success() } else { Theme::badge() },
        ),
    ];
    if has_trailer {
        buttons.push(Span::raw("  "));
        buttons.push(Span::styled(" o Trailer ", Theme::secondary()));
    }
    buttons.push(Span::raw("  "));
    buttons.push(Span::styled(
        if app.store.ui.is_muted { "🔇" } else { "🔊" },
        Theme::dimmed(),
    ));
    lines.push(Line::from(buttons));

    if let Some(progress) = app.store.continue_watching_item(media.id, media.media_type) {
        lines.push(Line::from(vec![
            Span::styled(progress_bar(progress.progress, 20), Theme::progress_bar()),
            Span::styled(format!(" {}% watched", progress.progress), Theme::dimmed()),
        ]));
    }
    lines.push(Line::from(""));

    if !media.overview.is_empty() {
        lines.push(Line::from(Span::styled(media.overview.clone(), Theme::text())));
        lines.push(Line::from(""));
    }

    let cast: Vec<String> = detail
        .credits
        .top_cast(5)
        .iter()
        .map(|c| c.name.clone())
        .collect();
    if !cast.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Cast: ", Theme::dimmed()),
            Span::styled(cast.join(", "), Theme::secondary()),
        ]));
    }
    let directors = detail.credits.directors();
    if !directors.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Director: ", Theme::dimmed()),
            Span::styled(directors.join(", "), Theme::secondary()),
        ]));
    }
    if !detail.seasons.is_empty() && width > 30 {
        lines.push(Line::from(""));
        for season in detail.seasons.iter().take(6) {
            lines.push(Line::from(Span::styled(format!("  {}", season), Theme::dimmed())));
        }
    }
    lines
}

/// "More Like This" and "Recommended For You", sharing one selection
fn render_related(frame: &mut Frame, area: Rect, detail: &MediaDetail, state: &DetailState, app: &App) {
    if detail.related().next().is_none() {
        let empty = Paragraph::new("No similar titles")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(panel("MORE LIKE THIS", false));
        frame.render_widget(empty, area);
        return;
    }

    let groups: Vec<(&str, &[Media])> = [
        ("MORE LIKE THIS", detail.similar.as_slice()),
        ("RECOMMENDED FOR YOU", detail.recommendations.as_slice()),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, groups.len() as u32); groups.len()])
        .split(area);

    let mut first = 0;
    for ((title, items), chunk) in groups.into_iter().zip(chunks.iter()) {
        let selected = state
            .related
            .selected
            .checked_sub(first)
            .filter(|i| *i < items.len());
        let list_items: Vec<ListItem> = items
            .iter()
            .enumerate()
            .map(|(i, m)| {
                media_item(
                    m,
                    selected == Some(i),
                    app.store.is_in_watchlist(m.id, m.media_type),
                )
            })
            .collect();
        let list = List::new(list_items).block(panel(title, selected.is_some()));
        let mut view = ViewState::default().with_selected(selected);
        frame.render_stateful_widget(list, *chunk, &mut view);
        first += items.len();
    }
}

/// Text progress bar of `width` cells
pub fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (usize::from(progress.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "░░░░░░░░░░");
        assert_eq!(progress_bar(50, 10), "█████░░░░░");
        assert_eq!(progress_bar(100, 10), "██████████");
        assert_eq!(progress_bar(250, 4), "████");
    }
}
