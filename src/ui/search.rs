//! Search view
//!
//! Query input over results split into movies and TV shows.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, InputMode, LoadingState};
use crate::ui::browser::render_media_list;
use crate::ui::{render_message, Theme};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_input(frame, chunks[0], app);

    let search = &app.search;
    match &search.loading {
        LoadingState::Loading(msg) => {
            render_message(frame, chunks[1], msg.as_deref().unwrap_or("Searching..."), Theme::loading());
            return;
        }
        LoadingState::Error(msg) => {
            render_message(frame, chunks[1], msg, Theme::error());
            return;
        }
        LoadingState::Idle => {}
    }

    if search.submitted.is_empty() {
        render_message(
            frame,
            chunks[1],
            "Search for movies and TV shows",
            Theme::dimmed(),
        );
        return;
    }
    if search.results.is_empty() {
        render_message(
            frame,
            chunks[1],
            &format!("No results found for \"{}\"", search.submitted),
            Theme::dimmed(),
        );
        return;
    }

    let title = format!(
        "{} MOVIES · {} TV SHOWS",
        search.results.movies.len(),
        search.results.tv_shows.len()
    );
    render_media_list(
        frame,
        chunks[1],
        &title,
        search.results.all(),
        &search.list,
        app.input_mode == InputMode::Normal && !app.is_modal_open(),
        app,
    );
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let input = &app.search.input;

    let text = if editing {
        let (before, after) = input.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if input.value.is_empty() {
        "⌕ Titles, people, genres".to_string()
    } else {
        format!("⌕ {}", input.value)
    };

    let style = if editing {
        Theme::input().fg(Theme::HIGHLIGHT)
    } else {
        Theme::input()
    };
    let border_style = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let paragraph = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(" SEARCH ", Theme::title())),
    );
    frame.render_widget(paragraph, area);
}
