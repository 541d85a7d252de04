//! The movie review screen. Everyone sees the movie facts and the saved
//! review; ADMIN accounts additionally get an editable draft.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use magicstream_core::models::Movie;

use crate::app::App;
use crate::ui::screens::movie_facts;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref movie) = app.current_movie else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            " Loading movie...",
            styles::muted_style(),
        )));
        frame.render_widget(paragraph, area);
        return;
    };

    if app.is_admin() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(7)])
            .split(area);
        render_facts(frame, chunks[0], movie);
        render_editor(frame, app, chunks[1]);
    } else {
        render_facts(frame, area, movie);
    }
}

fn render_facts(frame: &mut Frame, area: Rect, movie: &Movie) {
    let block = Block::default()
        .title(format!(" {} ", movie.title))
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(movie_facts(movie))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_editor(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::styled(app.review_draft.as_str(), styles::list_item_style()),
        Span::styled("▌", styles::highlight_style()),
    ])];

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Ctrl+S]", styles::help_key_style()),
        Span::styled(
            " save (the server rates the movie from the review text)",
            styles::muted_style(),
        ),
    ]));

    let block = Block::default()
        .title(" Your review (admin) ")
        .title_style(styles::highlight_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
