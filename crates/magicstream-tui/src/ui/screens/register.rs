//! The account creation screen: identity fields plus a favourite-genre
//! picker fed from the public genre list.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, RegisterFocus};
use crate::ui::screens::{centered_rect_fixed, field_tail};
use crate::ui::styles;

/// Visible width of the text fields
const FIELD_WIDTH: usize = 26;

/// Genre rows shown at once in the picker
const GENRE_WINDOW: usize = 5;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let height = if app.register_error.is_some() { 21 } else { 19 };
    let form = centered_rect_fixed(56, height, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "                 Create your account",
            styles::title_style(),
        )),
        Line::from(""),
    ];

    lines.push(field_line(
        "First name:",
        &app.register_first_name,
        app.register_focus == RegisterFocus::FirstName,
        false,
    ));
    lines.push(field_line(
        "Last name: ",
        &app.register_last_name,
        app.register_focus == RegisterFocus::LastName,
        false,
    ));
    lines.push(field_line(
        "Email:     ",
        &app.register_email,
        app.register_focus == RegisterFocus::Email,
        false,
    ));
    lines.push(field_line(
        "Password:  ",
        &app.register_password,
        app.register_focus == RegisterFocus::Password,
        true,
    ));

    lines.push(Line::from(""));
    render_genre_picker(app, &mut lines);

    // Submit button
    let button_focused = app.register_focus == RegisterFocus::Button;
    lines.push(Line::from(""));
    if button_focused {
        lines.push(Line::from(vec![
            Span::raw("               ["),
            Span::styled(" ▶ Create Account ◀ ", styles::input_style(true)),
            Span::raw("]"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("               ["),
            Span::styled("   Create Account   ", Style::default()),
            Span::raw("]"),
        ]));
    }

    if let Some(ref error) = app.register_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("   {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .title(" Register ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, form);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool, masked: bool) -> Line<'a> {
    let shown = if masked {
        "*".repeat(value.chars().count().min(FIELD_WIDTH))
    } else {
        field_tail(value, FIELD_WIDTH).to_string()
    };
    let display = format!("{:<width$}", shown, width = FIELD_WIDTH);
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("{} [", label), styles::muted_style()),
        Span::styled(format!("{}{}", display, cursor), styles::input_style(focused)),
        Span::styled("]", styles::muted_style()),
    ])
}

fn render_genre_picker(app: &App, lines: &mut Vec<Line<'_>>) {
    let picker_focused = app.register_focus == RegisterFocus::Genres;

    let header = format!(
        "   Favourite genres ({} picked)",
        app.register_genres.len()
    );
    lines.push(Line::from(Span::styled(
        header,
        if picker_focused {
            styles::highlight_style()
        } else {
            styles::muted_style()
        },
    )));

    if app.genres.is_empty() {
        lines.push(Line::from(Span::styled(
            "   Loading genres...",
            styles::muted_style(),
        )));
        return;
    }

    // Scroll window around the cursor
    let start = app
        .register_genre_cursor
        .saturating_sub(GENRE_WINDOW / 2)
        .min(app.genres.len().saturating_sub(GENRE_WINDOW));
    for (i, genre) in app.genres.iter().enumerate().skip(start).take(GENRE_WINDOW) {
        let mark = if app.genre_picked(genre.genre_id) {
            "x"
        } else {
            " "
        };
        let row = format!("   [{}] {}", mark, genre.genre_name);
        let style = if picker_focused && i == app.register_genre_cursor {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        lines.push(Line::from(Span::styled(row, style)));
    }
}
