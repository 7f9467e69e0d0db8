//! Detail pane — everything known about the highlighted result.

use crate::theme::Theme;
use appfind_core::Software;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

pub struct DetailPane<'a> {
    app: Option<&'a Software>,
    theme: &'a Theme,
}

impl<'a> DetailPane<'a> {
    pub fn new(app: Option<&'a Software>, theme: &'a Theme) -> Self {
        Self { app, theme }
    }
}

impl Widget for DetailPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Details")
            .border_style(self.theme.border_unfocused);

        let Some(app) = self.app else {
            Paragraph::new(Line::from(Span::styled(
                "select a result",
                Style::default().add_modifier(Modifier::DIM),
            )))
            .block(block)
            .render(area, buf);
            return;
        };

        Paragraph::new(detail_lines(app, self.theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

fn detail_lines(app: &Software, theme: &Theme) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let mut lines = vec![
        Line::from(Span::styled(app.track_name.clone(), bold)),
        Line::from(Span::styled(app.artist_name.clone(), dim)),
        Line::default(),
    ];

    let mut field = |key: &'static str, value: String, style: Style| {
        lines.push(Line::from(vec![
            Span::styled(format!("{key:<10}"), dim),
            Span::styled(value, style),
        ]));
    };

    field("bundle", app.bundle_id.clone(), Style::default());
    if let Some(v) = &app.version {
        field("version", v.clone(), Style::default());
    }
    if let Some(price) = app.price_label() {
        field("price", price, theme.price);
    }
    if let Some(rating) = app.average_user_rating {
        let count = app.user_rating_count.unwrap_or(0);
        field("rating", format!("{} {rating:.1} ({count})", stars(rating)), theme.rating);
    }
    if !app.genres.is_empty() {
        field(
            "genres",
            app.genres.join(", "),
            theme.genre_style(app.primary_genre_name.as_deref()),
        );
    }
    if let Some(size) = app.file_size() {
        field("size", human_size(size), Style::default());
    }
    if let Some(os) = &app.minimum_os_version {
        field("requires", format!("{os}+"), Style::default());
    }
    if let Some(age) = &app.content_advisory_rating {
        field("age", age.clone(), Style::default());
    }
    if let Some(date) = app.current_version_release_date.or(app.release_date) {
        field("updated", date.format("%Y-%m-%d").to_string(), Style::default());
    }

    if let Some(notes) = &app.release_notes {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("What's new", bold)));
        lines.extend(notes.lines().map(|l| Line::from(l.to_string())));
    }
    if let Some(desc) = &app.description {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Description", bold)));
        lines.extend(desc.lines().map(|l| Line::from(l.to_string())));
    }
    lines
}

/// Five-slot star bar, rounded to the nearest whole star.
fn stars(rating: f64) -> String {
    let full = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
