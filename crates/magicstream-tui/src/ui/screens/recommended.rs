//! Personalized recommendations, matched to the favourite genres the user
//! picked when registering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::screens::movie_facts;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_list(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::List);

    let header = Row::new([
        Cell::from("Title"),
        Cell::from("Genres"),
        Cell::from("Rating"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app
        .recommended
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            let style = if i == app.recommended_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(movie.title.as_str()),
                Cell::from(movie.genre_names()),
                Cell::from(movie.ranking_label()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(45),
        Constraint::Fill(1),
        Constraint::Length(14),
    ];

    let title = format!(" Recommended for you ({}) ", app.recommended.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.recommended_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, Focus::Detail);

    let lines = match app.selected_movie() {
        Some(movie) => {
            let mut lines = movie_facts(movie);
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("[Enter]", styles::help_key_style()),
                Span::styled(" watch   ", styles::muted_style()),
                Span::styled("[v]", styles::help_key_style()),
                Span::styled(" review", styles::muted_style()),
            ]));
            lines
        }
        None => vec![
            Line::from(Span::styled(
                "Nothing to recommend yet",
                styles::muted_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Recommendations follow the favourite genres on your account.",
                styles::muted_style(),
            )),
        ],
    };

    let block = Block::default()
        .title(" Details ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
