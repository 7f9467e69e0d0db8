//! Headless mode: run one search or lookup through the [`SearchStore`] and
//! render the final state for a pipe instead of a terminal UI.

use appfind_core::{AppCatalog, Entity, SearchState, SearchStore, Software};
use std::fmt::Write as _;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns, one app per line.
    #[default]
    Table,
    /// The raw result records as a JSON array.
    Json,
}

/// A single headless request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Search {
        term: String,
        country: String,
        entity: Entity,
    },
    Lookup {
        bundle_id: String,
        country: String,
    },
}

/// Drive `store` through `request` and return the state it settles in.
///
/// Errors from the catalogue are not returned here; they end up in
/// [`SearchState::error`] exactly as the TUI would see them.
pub async fn execute<C>(store: &SearchStore<C>, request: &Request) -> SearchState
where
    C: AppCatalog + ?Sized,
{
    match request {
        Request::Search { term, country, entity } => {
            store.search(term.as_str(), country.as_str(), *entity).await
        }
        Request::Lookup { bundle_id, country } => store.lookup(bundle_id, country).await,
    }
    store.snapshot()
}

/// Render the results of a settled state.
pub fn render(state: &SearchState, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&state.results)?),
        OutputFormat::Table => Ok(table(&state.results)),
    }
}

const HEADERS: [&str; 5] = ["NAME", "BUNDLE ID", "VERSION", "PRICE", "RATING"];

fn row(app: &Software) -> [String; 5] {
    [
        app.track_name.clone(),
        app.bundle_id.clone(),
        app.version.clone().unwrap_or_else(|| "-".into()),
        app.price_label().unwrap_or_else(|| "-".into()),
        app.average_user_rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".into()),
    ]
}

fn table(apps: &[Software]) -> String {
    let rows: Vec<[String; 5]> = apps.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[String]| {
        let mut line = String::new();
        for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
            if i + 1 == cells.len() {
                line.push_str(cell);
            } else {
                let _ = write!(line, "{cell:<w$}  ");
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_line(&HEADERS.map(String::from));
    for r in &rows {
        push_line(r);
    }
    out
}
