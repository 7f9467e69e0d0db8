//! Results list widget — the scrollable list of apps on the left.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row (scrolls view if needed) |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//! | `g` / `G` | First / last result |
//!
//! # Scroll semantics
//!
//! `offset` = index of the first visible row. `cursor` = absolute index into
//! the result list. The cursor is always kept within the visible window.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use appfind_core::Software;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;
const NAME_WIDTH: usize = 28;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ResultsListState {
    /// Absolute index of the highlighted result.
    pub cursor: usize,
    /// Index of the first visible row.
    pub offset: usize,
    /// Cached from the last render so `handle()` can keep the cursor visible.
    last_height: Cell<usize>,
}

impl Default for ResultsListState {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            last_height: Cell::new(20),
        }
    }
}

impl ResultsListState {
    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Back to the top. Call whenever a new result list arrives.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    /// Index of the highlighted result, if the list is non-empty.
    pub fn selected(&self, total: usize) -> Option<usize> {
        (self.cursor < total).then_some(self.cursor)
    }

    /// Handle a navigation event against a list of `total` results.
    pub fn handle(&mut self, event: &AppEvent, total: usize) {
        if total == 0 {
            self.reset();
            return;
        }
        let last = total - 1;

        self.cursor = match event {
            AppEvent::Nav(Direction::Up) => self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => (self.cursor + PAGE_STEP).min(last),
            AppEvent::ScrollToTop => 0,
            AppEvent::ScrollToBottom => last,
            _ => return,
        };
        self.keep_cursor_visible();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "results: moved");
    }

    fn keep_cursor_visible(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsList<'a> {
    state: &'a ResultsListState,
    results: &'a [Software],
    loading: bool,
    show_prices: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultsList<'a> {
    pub fn new(
        state: &'a ResultsListState,
        results: &'a [Software],
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            results,
            loading: false,
            show_prices: true,
            focused,
            theme,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn show_prices(mut self, show: bool) -> Self {
        self.show_prices = show;
        self
    }
}

impl Widget for ResultsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = format!("Results ({})", self.results.len());
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        // Cached for handle(); draw always runs before handle()
        self.state.last_height.set(height);

        let total = self.results.len();
        if total == 0 {
            let hint = if self.loading { "searching…" } else { "no results" };
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(inner, buf);
            return;
        }

        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + height).min(total);

        let lines: Vec<Line<'static>> = self.results[start..end]
            .iter()
            .enumerate()
            .map(|(row, app)| {
                let line = render_row(app, self.show_prices, self.theme);
                if start + row == self.state.cursor {
                    let highlight = if self.focused {
                        self.theme.selected
                    } else {
                        Style::default().add_modifier(Modifier::REVERSED)
                    };
                    line.patch_style(highlight)
                } else {
                    line
                }
            })
            .collect();

        // Text plus a 1-column scrollbar strip inside the borders.
        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

fn render_row(app: &Software, show_price: bool, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    spans.push(Span::styled(
        format!("{:<width$} ", truncate(&app.track_name, NAME_WIDTH), width = NAME_WIDTH),
        theme.genre_style(app.primary_genre_name.as_deref()),
    ));

    if let Some(rating) = app.average_user_rating {
        spans.push(Span::styled(format!("★{rating:.1} "), theme.rating));
    }

    if show_price {
        if let Some(price) = app.price_label() {
            spans.push(Span::styled(format!("{price} "), theme.price));
        }
    }

    spans.push(Span::styled(
        app.artist_name.clone(),
        Style::default().add_modifier(Modifier::DIM),
    ));

    Line::from(spans)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
