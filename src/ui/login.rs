//! Sign in / sign up form

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, InputMode, LoginField, LoginMode, TextInput};
use crate::ui::{centered_rect, panel, Theme};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let login = &app.login;
    let fields = login.fields();
    let height = fields.len() as u16 * 3 + 7;
    let form = centered_rect(area, 50, height);
    frame.render_widget(Clear, form);

    let title = match login.mode {
        LoginMode::SignIn => "SIGN IN",
        LoginMode::SignUp => "SIGN UP",
    };
    let block = panel(title, true).style(Style::default().bg(Theme::BACKGROUND_LIGHT));
    let inner = block.inner(form);
    frame.render_widget(block, form);

    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1)); // Error
    constraints.push(Constraint::Min(1)); // Mode switch hint
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let editing = app.input_mode == InputMode::Editing;
    for (i, field) in fields.iter().enumerate() {
        let focused = login.focused() == *field;
        let input = match field {
            LoginField::Name => &login.name,
            LoginField::Email => &login.email,
            LoginField::Password => &login.password,
        };
        render_field(frame, chunks[i], *field, input, focused, editing && focused);
    }

    if let Some(error) = &login.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.clone(), Theme::error())).alignment(Alignment::Center),
            chunks[fields.len()],
        );
    }

    let switch = match login.mode {
        LoginMode::SignIn => "New to StreamFlix? Press s to sign up.",
        LoginMode::SignUp => "Already have an account? Press s to sign in.",
    };
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(switch, Theme::secondary())),
            Line::from(Span::styled("Press g to browse without an account.", Theme::dimmed())),
        ])
        .alignment(Alignment::Center),
        chunks[fields.len() + 1],
    );
}

fn field_label(field: LoginField) -> &'static str {
    match field {
        LoginField::Name => "Name",
        LoginField::Email => "Email",
        LoginField::Password => "Password",
    }
}

/// Text shown in a field; passwords are masked
pub fn field_text(field: LoginField, input: &TextInput, editing: bool) -> String {
    let mask = |s: &str| "•".repeat(s.chars().count());
    let (before, after) = input.split_at_cursor();
    let (before, after) = if field == LoginField::Password {
        (mask(before), mask(after))
    } else {
        (before.to_string(), after.to_string())
    };
    if editing {
        format!("{}│{}", before, after)
    } else {
        format!("{}{}", before, after)
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    field: LoginField,
    input: &TextInput,
    focused: bool,
    editing: bool,
) {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let paragraph = Paragraph::new(field_text(field, input, editing))
        .style(Theme::input())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(Span::styled(format!(" {} ", field_label(field)), Theme::secondary())),
        );
    frame.render_widget(paragraph, area);
}
