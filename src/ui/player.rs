//! Watch screen
//!
//! Shows the trailer being "played", transport state and a progress bar.
//! Playback itself happens in the browser or mpv.

use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::{App, LoadingState, WatchSession};
use crate::models::format_clock;
use crate::ui::{panel, render_message, Theme};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    match &app.watch.loading {
        LoadingState::Loading(msg) => {
            render_message(frame, area, msg.as_deref().unwrap_or("Loading..."), Theme::loading());
            return;
        }
        LoadingState::Error(msg) => {
            render_message(frame, area, msg, Theme::error());
            return;
        }
        LoadingState::Idle => {}
    }
    let Some(session) = app.watch.session.as_ref() else {
        render_message(frame, area, "Nothing playing", Theme::dimmed());
        return;
    };

    let block = panel("NOW PLAYING", true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Title and trailer info
            Constraint::Length(1), // Transport line
            Constraint::Length(1), // Progress gauge
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(info_lines(session, app.store.ui.is_muted)).wrap(Wrap { trim: true }),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(transport_line(session)), chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(Theme::progress_bar())
        .percent(u16::from(session.progress()))
        .label(format!("{}%", session.progress()));
    frame.render_widget(gauge, chunks[2]);
}

fn info_lines(session: &WatchSession, muted: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(session.media.title.clone(), Theme::title())),
        Line::from(""),
    ];
    match (&session.trailer, session.watch_url()) {
        (Some(trailer), Some(url)) => {
            lines.push(Line::from(vec![
                Span::styled("Trailer: ", Theme::dimmed()),
                Span::styled(trailer.name.clone(), Theme::secondary()),
                Span::styled(format!(" ({})", trailer.kind), Theme::dimmed()),
            ]));
            lines.push(Line::from(Span::styled(url, Theme::accent())));
            if let Some(embed) = session.embed_url(muted) {
                lines.push(Line::from(Span::styled(embed, Theme::dimmed())));
            }
        }
        _ => lines.push(Line::from(Span::styled(
            "No trailer available for this title",
            Theme::warning(),
        ))),
    }
    lines
}

/// "▶ 12:05 / 118:00   🔊"
pub fn transport_line(session: &WatchSession) -> Line<'static> {
    let state = if session.playing {
        Span::styled("▶ PLAYING ", Theme::success())
    } else {
        Span::styled("❚❚ PAUSED ", Theme::warning())
    };
    let duration = if session.duration > 0 {
        format_clock(session.duration)
    } else {
        "--:--".to_string()
    };
    Line::from(vec![
        state,
        Span::styled(
            format!("{} / {}", format_clock(session.position), duration),
            Theme::text(),
        ),
    ])
}
