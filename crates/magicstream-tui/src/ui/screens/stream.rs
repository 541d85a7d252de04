//! The stream screen. Playback happens in the browser; this screen
//! surfaces the watch URL for the movie.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

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

    let mut lines = movie_facts(movie);
    lines.push(Line::from(""));

    match movie.watch_url() {
        Some(url) => {
            lines.push(Line::from(Span::styled(
                "Watch now",
                styles::highlight_style(),
            )));
            lines.push(Line::from(Span::styled(url, styles::success_style())));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Open the link in your browser to start streaming.",
                styles::muted_style(),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No stream is available for this title yet.",
                styles::error_style(),
            )));
        }
    }

    let block = Block::default()
        .title(format!(" Stream · {} ", movie.title))
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
