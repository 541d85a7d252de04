//! Main frame rendering and layout.
//!
//! Draws the header (brand + signed-in identity), the per-route content
//! area, and the status bar, plus the help and quit overlays.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use magicstream_core::{Access, Route};

use crate::app::{App, AppState};

use super::screens::{browse, centered_rect_fixed, login, recommended, register, review, stream};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let brand = "  Magic Stream";
    let screen = format!(" · {}", app.route.title());
    let identity = format!("{}  [?] Help ", app.session_label());

    let mut spans = vec![
        Span::styled(brand, styles::title_style()),
        Span::styled(screen.clone(), styles::muted_style()),
    ];

    // Nav shortcuts, only useful outside the forms
    let nav = match app.route {
        Route::Home | Route::Recommended => {
            let mut nav = vec![
                Span::raw("   "),
                Span::styled("[1] Browse", styles::nav_style(app.route == Route::Home)),
                Span::styled(" | ", styles::muted_style()),
                Span::styled(
                    "[2] Recommended",
                    styles::nav_style(app.route == Route::Recommended),
                ),
            ];
            if !app.signed_in() {
                nav.push(Span::styled(" | ", styles::muted_style()));
                nav.push(Span::styled("[l] Sign in", styles::muted_style()));
            }
            nav
        }
        _ => vec![],
    };
    let nav_len: usize = nav.iter().map(|s| s.content.chars().count()).sum();
    spans.extend(nav);

    let used = brand.len() + screen.chars().count() + nav_len;
    let padding = (area.width as usize)
        .saturating_sub(used)
        .saturating_sub(identity.chars().count());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(identity, styles::muted_style()));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    // Hold back protected content until the session store has hydrated.
    // Only reachable if a frame is drawn before startup hydration settles.
    if app.route.access(&app.store) == Access::Pending {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            " Loading session...",
            styles::muted_style(),
        )));
        frame.render_widget(paragraph, area);
        return;
    }

    match app.route {
        Route::Home => browse::render(frame, app, area),
        Route::Recommended => recommended::render(frame, app, area),
        Route::Login => login::render(frame, app, area),
        Route::Register => register::render(frame, app, area),
        Route::Review(_) => review::render(frame, app, area),
        Route::Stream(_) => stream::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if app.pending_fetches > 0 {
        " Loading... ".to_string()
    } else {
        String::from(" ")
    };

    let shortcuts = match app.route {
        Route::Home | Route::Recommended => {
            if app.signed_in() {
                "[Enter] watch | [v] review | [r] refresh | [L] sign out | [q] quit"
            } else {
                "[Enter] watch | [r] refresh | [l] sign in | [q] quit"
            }
        }
        Route::Login => "[Tab] next field | [Enter] submit | [Ctrl+N] register | [Esc] back",
        Route::Register => "[Tab] next field | [Space] pick genre | [Enter] submit | [Esc] back",
        Route::Review(_) => {
            if app.is_admin() {
                "[Ctrl+S] save review | [Enter] watch | [Esc] back"
            } else {
                "[Enter] watch | [Esc] back | [q] quit"
            }
        }
        Route::Stream(_) => "[v] review | [Esc] back | [q] quit",
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(54, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let mut help_text = vec![
        Line::from(Span::styled(
            "         ╔╦╗╔═╗╔═╗╦╔═╗  ╔═╗╔╦╗╦═╗╔═╗╔═╗╔╦╗",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "         ║║║╠═╣║ ╦║║    ╚═╗ ║ ╠╦╝║╣ ╠═╣║║║",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "         ╩ ╩╩ ╩╚═╝╩╚═╝  ╚═╝ ╩ ╩╚═╚═╝╩ ╩╩ ╩",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("                version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  1 / 2     ", styles::help_key_style()),
            Span::styled("Browse / Recommended", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓ j/k   ", styles::help_key_style()),
            Span::styled("Navigate list", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", styles::help_key_style()),
            Span::styled("Switch focus (list ↔ detail)", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", styles::help_key_style()),
            Span::styled("Stream the selected movie", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  v         ", styles::help_key_style()),
            Span::styled("Open the review screen", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Esc       ", styles::help_key_style()),
            Span::styled("Go back", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  r         ", styles::help_key_style()),
            Span::styled("Refresh the current screen", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  L         ", styles::help_key_style()),
            Span::styled("Sign out", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  q         ", styles::help_key_style()),
            Span::styled("Quit", styles::help_desc_style()),
        ]),
    ];

    if app.is_admin() {
        help_text.push(Line::from(vec![
            Span::styled("  Ctrl+S    ", styles::help_key_style()),
            Span::styled("Save the review draft (review screen)", styles::help_desc_style()),
        ]));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("        Press ", styles::muted_style()),
        Span::styled("?", styles::help_key_style()),
        Span::styled(" or ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" to close", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "    Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("    Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
