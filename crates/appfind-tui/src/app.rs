//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! The app is a dependent view of a [`SearchStore`]: searches and lookups run
//! as tasks on a tokio runtime, and every loop iteration pulls the latest
//! store state through a watch receiver before drawing.

use crate::{
    commands::Command,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState, CommandOutcome},
        detail::DetailPane,
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState, QueryField},
        results_list::{ResultsList, ResultsListState},
        status_bar::{Activity, StatusBar},
    },
};
use appfind_core::{config::Config, AppCatalog, SearchParamUpdate, SearchState, SearchStore};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::{runtime::Handle, sync::watch};

/// The store as the TUI holds it: any catalogue behind a trait object.
pub type Store = SearchStore<dyn AppCatalog>;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Term,
    Country,
    Entity,
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

impl Focus {
    /// Tab-cycle: Term → Country → Entity → Results → Term
    fn next(self) -> Self {
        match self {
            Focus::Term => Focus::Country,
            Focus::Country => Focus::Entity,
            Focus::Entity => Focus::Results,
            Focus::Results | Focus::Command => Focus::Term,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Term => Focus::Results,
            Focus::Country => Focus::Term,
            Focus::Entity => Focus::Country,
            Focus::Results | Focus::Command => Focus::Entity,
        }
    }

    fn query_field(self) -> Option<QueryField> {
        match self {
            Focus::Term => Some(QueryField::Term),
            Focus::Country => Some(QueryField::Country),
            Focus::Entity => Some(QueryField::Entity),
            Focus::Results | Focus::Command => None,
        }
    }

    /// Alphabetic keys produce characters rather than shortcuts.
    fn is_insert_mode(self) -> bool {
        !matches!(self, Focus::Results)
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    /// Store state as of the last sync; what gets drawn.
    pub view: SearchState,
    pub query: QueryBarState,
    pub results: ResultsListState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Which store call the app last started, for the status line.
    pub activity: Activity,
    /// Loop iteration counter, drives the spinner.
    pub tick: usize,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    store: Store,
    changes: watch::Receiver<SearchState>,
    runtime: Handle,
}

impl App {
    pub fn new(store: Store, runtime: Handle, config: Config, theme: Theme) -> Self {
        let changes = store.subscribe();
        let view = store.snapshot();

        let state = AppState {
            query: QueryBarState::from_state(&view),
            view,
            results: ResultsListState::default(),
            focus: Focus::Term,
            prev_focus: Focus::Term,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            activity: Activity::default(),
            tick: 0,
            quit: false,
        };

        App { state, store, changes, runtime }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.tick = self.state.tick.wrapping_add(1);
            self.sync();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if self.state.focus.is_insert_mode() {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Pull the latest store state into the view. Returns `true` when the
    /// store changed since the last sync.
    pub fn sync(&mut self) -> bool {
        if !self.changes.has_changed().unwrap_or(false) {
            return false;
        }
        let snap = self.changes.borrow_and_update().clone();
        let s = &mut self.state;
        if snap.results != s.view.results {
            tracing::debug!(count = snap.results.len(), "new result list");
            s.results.reset();
        }
        s.query.sync(&snap);
        s.view = snap;
        true
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.state.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.state.show_help = false;
            }
            return;
        }

        // Command mode intercepts all events.
        if self.state.focus == Focus::Command {
            match self.state.command_bar.handle(&event) {
                CommandOutcome::Editing => {}
                CommandOutcome::Cancelled => self.state.focus = self.state.prev_focus,
                CommandOutcome::Run(cmd) => {
                    self.state.focus = self.state.prev_focus;
                    self.execute_command(cmd);
                }
            }
            return;
        }

        let focus = self.state.focus;
        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.state.quit = true;
            }

            // `?` and `:` are typed characters inside the query fields
            AppEvent::Char('?') if focus == Focus::Results => {
                tracing::debug!("help popup opened");
                self.state.show_help = true;
            }
            AppEvent::Char(':') if focus == Focus::Results => {
                tracing::debug!(prev_focus = ?focus, "entering command mode");
                self.state.prev_focus = focus;
                self.state.command_bar.clear();
                self.state.focus = Focus::Command;
            }

            AppEvent::Escape => {
                if focus.query_field().is_some() {
                    self.state.focus = Focus::Results;
                }
            }
            AppEvent::FocusNext => self.state.focus = focus.next(),
            AppEvent::FocusPrev => self.state.focus = focus.prev(),
            AppEvent::QueryFocus => self.state.focus = Focus::Term,

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            AppEvent::Enter if focus.query_field().is_some() => self.spawn_search(None),
            AppEvent::Enter | AppEvent::Lookup if focus == Focus::Results => {
                self.lookup_selected()
            }

            other => self.dispatch_to_focused(other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        let s = &mut self.state;
        match s.focus.query_field() {
            Some(field) => {
                if let Some(update) = s.query.handle(field, &event) {
                    self.store.set_search_param(update);
                }
            }
            None if s.focus == Focus::Results => s.results.handle(&event, s.view.results.len()),
            None => {}
        }
    }

    /// Execute a parsed [`Command`] against the application state.
    fn execute_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.state.quit = true,
            Command::Help => self.state.show_help = !self.state.show_help,
            Command::Theme(name) => self.state.theme = Theme::by_name(&name),
            Command::Search(term) => self.spawn_search(Some(term)),
            Command::Lookup(bundle_id) => self.spawn_lookup(bundle_id),
            Command::Country(cc) => {
                self.store
                    .set_search_param(SearchParamUpdate::default().country(cc))
            }
            Command::Entity(entity) => {
                self.store
                    .set_search_param(SearchParamUpdate::default().entity(entity))
            }
        }
    }

    /// Search with the store's current query, optionally replacing the term.
    fn spawn_search(&mut self, term: Option<String>) {
        let mut query = self.store.snapshot().query();
        if let Some(term) = term {
            query.term = term;
        }
        tracing::debug!(?query, "spawning search");
        self.state.activity = Activity::Search;
        let store = self.store.clone();
        self.runtime.spawn(async move {
            store.search(query.term, query.country, query.entity).await;
        });
    }

    fn spawn_lookup(&mut self, bundle_id: String) {
        let country = self.store.snapshot().country;
        tracing::debug!(%bundle_id, %country, "spawning lookup");
        self.state.activity = Activity::Lookup(bundle_id.clone());
        let store = self.store.clone();
        self.runtime.spawn(async move {
            store.lookup(&bundle_id, &country).await;
        });
    }

    fn lookup_selected(&mut self) {
        let s = &self.state;
        let bundle_id = s
            .results
            .selected(s.view.results.len())
            .map(|idx| s.view.results[idx].bundle_id.clone());
        if let Some(bundle_id) = bundle_id {
            self.spawn_lookup(bundle_id);
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    // Horizontal body split: results | details
    let pct = state.config.ui.detail_pane_width_pct.min(90);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Percentage(pct)])
        .split(vert[1]);

    let results = &state.view.results;
    let selected = state
        .results
        .selected(results.len())
        .map(|i| &results[i]);

    frame.render_widget(
        StatusBar::new(&state.view, &state.activity, state.tick, &state.theme),
        vert[0],
    );
    frame.render_widget(
        ResultsList::new(
            &state.results,
            results,
            state.focus == Focus::Results,
            &state.theme,
        )
        .loading(state.view.loading)
        .show_prices(state.config.ui.show_prices),
        horiz[0],
    );
    frame.render_widget(DetailPane::new(selected, &state.theme), horiz[1]);

    let query_bar = QueryBar::new(&state.query, state.focus.query_field(), &state.theme);
    let cursor = query_bar.cursor_position(vert[2]);
    frame.render_widget(query_bar, vert[2]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if let Some(pos) = cursor {
        frame.set_cursor_position(pos);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
