//! The sign-in screen, rendered as a centered form.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LoginFocus};
use crate::ui::screens::{centered_rect_fixed, field_tail};
use crate::ui::styles;

/// Visible width of the text fields
const FIELD_WIDTH: usize = 28;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let height = if app.login_error.is_some() { 16 } else { 14 };
    let form = centered_rect_fixed(52, height, area);

    let mut lines = vec![];

    // Brand mark
    lines.push(Line::from(Span::styled(
        "        ╔╦╗╔═╗╔═╗╦╔═╗  ╔═╗╔╦╗╦═╗╔═╗╔═╗╔╦╗",
        styles::title_style(),
    )));
    lines.push(Line::from(Span::styled(
        "        ║║║╠═╣║ ╦║║    ╚═╗ ║ ╠╦╝║╣ ╠═╣║║║",
        styles::title_style(),
    )));
    lines.push(Line::from(Span::styled(
        "        ╩ ╩╩ ╩╚═╝╩╚═╝  ╚═╝ ╩ ╩╚═╚═╝╩ ╩╩ ╩",
        styles::title_style(),
    )));
    lines.push(Line::from(""));

    // Email field
    let email_focused = app.login_focus == LoginFocus::Email;
    let email_display = format!("{:<width$}", field_tail(&app.login_email, FIELD_WIDTH), width = FIELD_WIDTH);
    let cursor = if email_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Email:    [", styles::muted_style()),
        Span::styled(
            format!("{}{}", email_display, cursor),
            styles::input_style(email_focused),
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    // Password field, masked
    let password_focused = app.login_focus == LoginFocus::Password;
    let masked: String = "*".repeat(app.login_password.chars().count().min(FIELD_WIDTH));
    let password_display = format!("{:<width$}", masked, width = FIELD_WIDTH);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(
            format!("{}{}", password_display, cursor),
            styles::input_style(password_focused),
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    // Remember toggle
    let remember_focused = app.login_focus == LoginFocus::Remember;
    let mark = if app.login_remember { "x" } else { " " };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled(
            format!("[{}] Remember password", mark),
            styles::input_style(remember_focused),
        ),
        Span::styled("  (system keyring)", styles::muted_style()),
    ]));

    // Sign-in button
    let button_focused = app.login_focus == LoginFocus::Button;
    lines.push(Line::from(""));
    if button_focused {
        lines.push(Line::from(vec![
            Span::raw("              ["),
            Span::styled(" ▶ Sign In ◀ ", styles::input_style(true)),
            Span::raw("]"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("              ["),
            Span::styled("   Sign In   ", Style::default()),
            Span::raw("]"),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   New here? ", styles::muted_style()),
        Span::styled("Ctrl+N", styles::help_key_style()),
        Span::styled(" creates an account", styles::muted_style()),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("   {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .title(" Sign In ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, form);
}
