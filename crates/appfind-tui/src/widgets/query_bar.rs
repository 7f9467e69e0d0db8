//! Query bar widget — search term, country, and entity filter at the bottom
//! of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor, or cycle the entity filter
//!   when that field is focused (`Space` cycles too).
//! - The country field accepts at most two ASCII letters.
//!
//! Every edit that changes a value is returned as a [`SearchParamUpdate`] so
//! the app shell can push it into the store.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use appfind_core::{Entity, SearchParamUpdate, SearchState};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const COUNTRY_LABEL: &str = " cc:";
const ENTITY_LABEL: &str = " type:";
const COUNTRY_MAX: usize = 2;

// ---------------------------------------------------------------------------
// TextInput
// ---------------------------------------------------------------------------

/// Single-line editable text with a byte-offset cursor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    /// Byte offset of the cursor within `text`.
    pub cursor: usize,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Replace the contents and park the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing event. Returns `true` when the text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.text.remove(prev);
                self.cursor = prev;
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.text.len() {
                    self.cursor = self.text[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.text.len());
                }
                false
            }
            _ => false,
        }
    }

    /// Column of the cursor in characters from the start of the text.
    pub fn cursor_col(&self) -> u16 {
        self.text[..self.cursor].chars().count() as u16
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Which of the three query fields an event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    Term,
    Country,
    Entity,
}

#[derive(Debug, Default)]
pub struct QueryBarState {
    pub term: TextInput,
    pub country: TextInput,
    pub entity: Entity,
}

impl QueryBarState {
    pub fn from_state(state: &SearchState) -> Self {
        Self {
            term: TextInput::new(state.term.as_str()),
            country: TextInput::new(state.country.as_str()),
            entity: state.entity,
        }
    }

    /// Adopt values changed in the store by something other than typing (a
    /// `:search` command, for instance). Fields already in agreement keep
    /// their cursor.
    pub fn sync(&mut self, state: &SearchState) {
        if self.term.text != state.term {
            self.term.set(state.term.as_str());
        }
        if self.country.text != state.country {
            self.country.set(state.country.as_str());
        }
        self.entity = state.entity;
    }

    /// Handle a key event for `field`. Returns the store update to apply when
    /// a value changed.
    pub fn handle(&mut self, field: QueryField, event: &AppEvent) -> Option<SearchParamUpdate> {
        match field {
            QueryField::Term => {
                if self.term.handle(event) {
                    tracing::debug!(term = %self.term.text, "query: term edited");
                    return Some(SearchParamUpdate::default().term(self.term.text.clone()));
                }
                None
            }
            QueryField::Country => {
                if let AppEvent::Char(c) = event {
                    if !c.is_ascii_alphabetic() || self.country.text.len() >= COUNTRY_MAX {
                        return None;
                    }
                    let lower = AppEvent::Char(c.to_ascii_lowercase());
                    self.country.handle(&lower);
                } else if !self.country.handle(event) {
                    return None;
                }
                tracing::debug!(country = %self.country.text, "query: country edited");
                Some(SearchParamUpdate::default().country(self.country.text.clone()))
            }
            QueryField::Entity => {
                self.entity = match event {
                    AppEvent::Nav(Direction::Right) | AppEvent::Char(' ') => self.entity.next(),
                    AppEvent::Nav(Direction::Left) => self.entity.prev(),
                    _ => return None,
                };
                tracing::debug!(entity = %self.entity, "query: entity cycled");
                Some(SearchParamUpdate::default().entity(self.entity))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: Option<QueryField>,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: Option<QueryField>, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    /// Absolute terminal position of the text cursor, if a text field is
    /// focused. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        let chunks = split(Block::bordered().inner(area));
        let (x, col) = match self.focused? {
            QueryField::Term => (chunks[0].x, self.state.term.cursor_col()),
            QueryField::Country => (
                chunks[1].x + COUNTRY_LABEL.len() as u16 + 1,
                self.state.country.cursor_col(),
            ),
            QueryField::Entity => return None,
        };
        Some(((x + col).min(area.right().saturating_sub(2)), area.y + 1))
    }

    fn label_style(&self, field: QueryField) -> Style {
        if self.focused == Some(field) {
            self.theme.border_focused
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    }
}

/// term (fill) | country (fixed) | entity (fixed)
fn split(inner: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(16),
        ])
        .split(inner);
    [chunks[0], chunks[1], chunks[2]]
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused.is_some() {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Search").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let [term_area, country_area, entity_area] = split(inner);

        let term_line = if self.state.term.text.is_empty() && self.focused != Some(QueryField::Term) {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.term.text.as_str())
        };
        Paragraph::new(term_line).render(term_area, buf);

        let country = if self.state.country.text.is_empty() {
            "--"
        } else {
            self.state.country.text.as_str()
        };
        Paragraph::new(Line::from(vec![
            Span::styled(COUNTRY_LABEL, self.label_style(QueryField::Country)),
            Span::raw(" "),
            Span::raw(country),
        ]))
        .render(country_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled(ENTITY_LABEL, self.label_style(QueryField::Entity)),
            Span::raw(format!(" ‹{}›", self.state.entity)),
        ]))
        .render(entity_area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn type_str(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            input.handle(&AppEvent::Char(c));
        }
    }

    #[test]
    fn insert_and_backspace() {
        let mut input = TextInput::default();
        type_str(&mut input, "maps");
        assert_eq!(input.text, "maps");
        assert!(input.handle(&AppEvent::Backspace));
        assert_eq!(input.text, "map");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut input = TextInput::new("café");
        input.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(input.cursor, 3);
        assert_eq!(input.cursor_col(), 3);
        input.handle(&AppEvent::Char('x'));
        assert_eq!(input.text, "cafxé");
        input.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(input.cursor, input.text.len());
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = TextInput::new("a");
        input.handle(&AppEvent::Nav(Direction::Left));
        assert!(!input.handle(&AppEvent::Backspace));
        assert_eq!(input.text, "a");
    }

    proptest! {
        #[test]
        fn typing_then_erasing_everything_leaves_empty(s in "\\PC{0,24}") {
            let mut input = TextInput::default();
            type_str(&mut input, &s);
            prop_assert_eq!(&input.text, &s);
            for _ in 0..s.chars().count() {
                input.handle(&AppEvent::Backspace);
            }
            prop_assert!(input.text.is_empty());
            prop_assert_eq!(input.cursor, 0);
        }
    }

    #[test]
    fn term_edit_emits_update() {
        let mut bar = QueryBarState::default();
        let update = bar.handle(QueryField::Term, &AppEvent::Char('x'));
        assert_eq!(update, Some(SearchParamUpdate::default().term("x")));
        assert_eq!(bar.handle(QueryField::Term, &AppEvent::Nav(Direction::Left)), None);
    }

    #[test]
    fn country_accepts_two_letters_lowercased() {
        let mut bar = QueryBarState::default();
        bar.handle(QueryField::Country, &AppEvent::Char('G'));
        bar.handle(QueryField::Country, &AppEvent::Char('1'));
        bar.handle(QueryField::Country, &AppEvent::Char('b'));
        let third = bar.handle(QueryField::Country, &AppEvent::Char('r'));
        assert_eq!(bar.country.text, "gb");
        assert_eq!(third, None);
    }

    #[test]
    fn entity_cycles_both_ways() {
        let mut bar = QueryBarState::default();
        bar.handle(QueryField::Entity, &AppEvent::Nav(Direction::Right));
        assert_eq!(bar.entity, Entity::IPadSoftware);
        let update = bar.handle(QueryField::Entity, &AppEvent::Nav(Direction::Left));
        assert_eq!(bar.entity, Entity::Software);
        assert_eq!(update, Some(SearchParamUpdate::default().entity(Entity::Software)));
    }

    #[test]
    fn sync_adopts_store_values() {
        let mut bar = QueryBarState::default();
        let state = SearchState {
            term: "pages".into(),
            country: "de".into(),
            entity: Entity::MacSoftware,
            ..SearchState::default()
        };
        bar.sync(&state);
        assert_eq!(bar.term, TextInput::new("pages"));
        assert_eq!(bar.country.text, "de");
        assert_eq!(bar.entity, Entity::MacSoftware);
    }
}
