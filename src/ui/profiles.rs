//! Profile picker and account page

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::catalog::MAX_PROFILES;
use crate::models::UserProfile;
use crate::ui::{centered_rect, panel, render_message, Theme};

const TILE_WIDTH: u16 = 16;
const TILE_HEIGHT: u16 = 5;

/// "Who's watching?" grid with an optional add-profile form
pub fn render_profiles(frame: &mut Frame, area: Rect, app: &App) {
    let profiles = app.store.user.profiles();
    let can_add = app.store.user.can_add_profile();
    let tiles = profiles.len() + usize::from(can_add);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(2),
            Constraint::Length(TILE_HEIGHT),
            Constraint::Min(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled("Who's watching?", Theme::title())).alignment(Alignment::Center),
        chunks[1],
    );

    let row_width = (TILE_WIDTH + 2) * tiles as u16;
    let row = centered_rect(chunks[2], row_width, TILE_HEIGHT);
    for i in 0..tiles {
        let tile = Rect {
            x: row.x + i as u16 * (TILE_WIDTH + 2),
            y: row.y,
            width: TILE_WIDTH.min(row.width.saturating_sub(i as u16 * (TILE_WIDTH + 2))),
            height: row.height,
        };
        if tile.width == 0 {
            break;
        }
        let selected = i == app.profiles.list.selected && app.profiles.form.is_none();
        match profiles.get(i) {
            Some(profile) => render_tile(frame, tile, profile, selected),
            None => render_add_tile(frame, tile, selected),
        }
    }

    let footer = format!("{}/{} profiles", profiles.len(), MAX_PROFILES);
    frame.render_widget(
        Paragraph::new(Span::styled(footer, Theme::dimmed())).alignment(Alignment::Center),
        chunks[3],
    );

    if let Some(form) = &app.profiles.form {
        let popup = centered_rect(area, 44, 9);
        frame.render_widget(Clear, popup);
        let block = panel("ADD PROFILE", true).style(Style::default().bg(Theme::BACKGROUND_LIGHT));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let editing = app.input_mode == InputMode::Editing;
        let (before, after) = form.name.split_at_cursor();
        let name = if editing {
            format!("{}│{}", before, after)
        } else {
            form.name.value.clone()
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Name: ", Theme::dimmed()),
                Span::styled(name, Theme::input()),
            ]),
            Line::from(vec![
                Span::styled("Kids: ", Theme::dimmed()),
                Span::styled(
                    if form.is_kids { "[x] kids profile" } else { "[ ] kids profile" },
                    if form.is_kids { Theme::kids() } else { Theme::secondary() },
                ),
                Span::styled("  (tab)", Theme::dimmed()),
            ]),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(error.clone(), Theme::error())));
        }
        lines.push(Line::from(Span::styled(
            "enter: save  esc: cancel",
            Theme::keybind_desc(),
        )));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

fn render_tile(frame: &mut Frame, area: Rect, profile: &UserProfile, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Theme::HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else {
        Theme::border()
    };
    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {}  ", profile.initials()),
            Theme::avatar(&profile.avatar),
        )),
        Line::from(Span::styled(
            profile.name.clone(),
            if selected { Theme::title() } else { Theme::secondary() },
        )),
    ];
    if profile.is_kids {
        lines.push(Line::from(Span::styled("KIDS", Theme::kids())));
    }
    let tile = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style),
    );
    frame.render_widget(tile, area);
}

fn render_add_tile(frame: &mut Frame, area: Rect, selected: bool) {
    let style = if selected { Theme::title() } else { Theme::dimmed() };
    let tile = Paragraph::new(vec![
        Line::from(Span::styled("  +  ", style)),
        Line::from(Span::styled("Add Profile", style)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if selected { Theme::border_focused() } else { Theme::border() }),
    );
    frame.render_widget(tile, area);
}

/// Account summary with sign-out and clear-data actions
pub fn render_account(frame: &mut Frame, area: Rect, app: &App) {
    let Some(user) = app.store.user.user.as_ref() else {
        render_message(frame, area, "Not signed in", Theme::dimmed());
        return;
    };
    let block = panel("ACCOUNT", true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |s: &'static str| Span::styled(s, Theme::dimmed());
    let mut lines = vec![
        Line::from(vec![label("Name:     "), Span::styled(user.name.clone(), Theme::text())]),
        Line::from(vec![label("Email:    "), Span::styled(user.email.clone(), Theme::text())]),
        Line::from(vec![
            label("Member since: "),
            Span::styled(user.created_at.format("%B %Y").to_string(), Theme::secondary()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Profiles", Theme::title())),
    ];
    let active_id = app.store.active_profile().map(|p| p.id.as_str());
    for profile in &user.profiles {
        let active = Some(profile.id.as_str()) == active_id;
        lines.push(Line::from(vec![
            Span::styled(if active { "▸ " } else { "  " }, Theme::logo()),
            Span::styled(format!(" {} ", profile.initials()), Theme::avatar(&profile.avatar)),
            Span::styled(format!(" {} ", profile.name), Theme::text()),
            Span::styled(format!("[{}]", profile.maturity_level.label()), Theme::dimmed()),
            Span::styled(if profile.is_kids { " KIDS" } else { "" }, Theme::kids()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        label("My List: "),
        Span::styled(app.store.watchlist.items.len().to_string(), Theme::text()),
        label("   Continue Watching: "),
        Span::styled(app.store.continue_watching.items.len().to_string(), Theme::text()),
    ]));
    lines.push(Line::from(""));
    if app.account.confirm_clear {
        lines.push(Line::from(Span::styled(
            "Delete all local data? This signs you out. Press y to confirm.",
            Theme::warning(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "p: manage profiles   o: sign out   x: clear all data",
            Theme::keybind_desc(),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
