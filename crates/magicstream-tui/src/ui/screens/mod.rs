//! Screen content rendering, one module per route.

pub mod browse;
pub mod login;
pub mod recommended;
pub mod register;
pub mod review;
pub mod stream;

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use magicstream_core::models::Movie;

use crate::ui::styles;

/// Create a centered rectangle with fixed dimensions
pub(crate) fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Trailing slice of a field value that fits the given display width, so
/// the cursor end stays visible while typing.
pub(crate) fn field_tail(value: &str, width: usize) -> &str {
    let chars = value.chars().count();
    if chars <= width {
        return value;
    }
    let skip = chars - width;
    match value.char_indices().nth(skip) {
        Some((idx, _)) => &value[idx..],
        None => value,
    }
}

/// Fact lines shared by the detail panels and the stream screen.
pub(crate) fn movie_facts(movie: &Movie) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(movie.title.as_str(), styles::title_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("IMDb:    ", styles::muted_style()),
            Span::raw(movie.imdb_id.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Genres:  ", styles::muted_style()),
            Span::raw(movie.genre_names()),
        ]),
        Line::from(vec![
            Span::styled("Rating:  ", styles::muted_style()),
            Span::styled(
                movie.ranking_label(),
                styles::ranking_style(movie.ranking_value()),
            ),
        ]),
    ];

    if let Some(review) = movie.admin_review.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Review",
            styles::highlight_style(),
        )));
        lines.push(Line::from(Span::raw(review)));
    }

    lines
}
