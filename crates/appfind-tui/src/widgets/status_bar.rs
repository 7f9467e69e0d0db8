//! Status bar widget — the 1-line strip at the top of the screen.

use crate::theme::Theme;
use appfind_core::SearchState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The kind of store call behind the current state.
///
/// A lookup ignores the search term, so the status line names the bundle id
/// instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Activity {
    #[default]
    Search,
    Lookup(String),
}

/// Renders the title, the store's loading / error / result summary, and
/// right-aligned keybinding hints.
pub struct StatusBar<'a> {
    state: &'a SearchState,
    activity: &'a Activity,
    tick: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        state: &'a SearchState,
        activity: &'a Activity,
        tick: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            activity,
            tick,
            theme,
        }
    }
}

/// One-line summary of the store state.
pub fn status_text(state: &SearchState, activity: &Activity) -> String {
    if state.loading {
        return match activity {
            Activity::Search => format!("searching \"{}\"…", state.term),
            Activity::Lookup(bundle_id) => format!("looking up {bundle_id}…"),
        };
    }
    if let Some(err) = &state.error {
        return err.clone();
    }
    if let Activity::Lookup(bundle_id) = activity {
        return if state.results.is_empty() {
            format!("no app with bundle id {bundle_id}")
        } else {
            format!("bundle id {bundle_id}")
        };
    }
    if state.term.is_empty() && state.results.is_empty() {
        return "type a search term and press Enter".to_string();
    }
    let country = if state.country.is_empty() { "--" } else { state.country.as_str() };
    format!(
        "{} result{} for \"{}\" [{}/{}]",
        state.results.len(),
        if state.results.len() == 1 { "" } else { "s" },
        state.term,
        country,
        state.entity,
    )
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (glyph, style) = if self.state.loading {
            (SPINNER[(self.tick / 4) % SPINNER.len()], self.theme.status_loading)
        } else if self.state.error.is_some() {
            ("✗", self.theme.status_error)
        } else {
            ("●", self.theme.status_ok)
        };

        let line = Line::from(vec![
            Span::styled(" appfind ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("{glyph} "), style),
            Span::styled(status_text(self.state, self.activity), style),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        let hint = " /:search  L:lookup  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
