// Allow dead code: Style functions defined for consistent UI
#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const PRIMARY: Color = Color::Rgb(176, 108, 224);
pub const SECONDARY: Color = Color::Rgb(88, 176, 120);
pub const ACCENT: Color = Color::Rgb(224, 176, 80);
pub const ERROR: Color = Color::Rgb(208, 72, 72);
pub const MUTED: Color = Color::Rgb(128, 128, 140);
pub const HIGHLIGHT: Color = Color::Rgb(56, 40, 72);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn nav_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn input_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(36, 28, 44)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Color a ranking label by how strong the recommendation is.
pub fn ranking_style(ranking_value: i32) -> Style {
    match ranking_value {
        1..=2 => Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD),
        3..=4 => Style::default().fg(ACCENT),
        5.. => Style::default().fg(MUTED),
        _ => Style::default().fg(Color::White),
    }
}
