//! Store — the search state container.
//!
//! [`SearchStore`] owns the current query parameters, the last result list,
//! a loading flag, and an error string. State lives in a
//! [`tokio::sync::watch`] channel: every mutation is one atomic transition,
//! readers take cheap snapshots, and dependent views wake on change via
//! [`SearchStore::subscribe`].
//!
//! There is exactly one request model: a call sets `loading`, awaits the
//! catalogue, writes the outcome, and clears `loading`. Concurrent calls are
//! not coordinated. Whichever resolves last owns `results`, and the first to
//! finish clears `loading`.

use crate::{
    catalog::AppCatalog,
    error::CatalogError,
    types::{Entity, Query},
    Software,
};
use std::sync::Arc;
use tokio::sync::watch;

const SEARCH_FAILED: &str = "Search failed";
const LOOKUP_FAILED: &str = "Lookup failed";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// A snapshot of everything the store tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub term: String,
    pub country: String,
    pub entity: Entity,
    pub results: Vec<Software>,
    /// True only while a search or lookup is awaiting the catalogue.
    pub loading: bool,
    /// Message from the last failed call; cleared when the next call starts.
    pub error: Option<String>,
}

impl SearchState {
    fn from_query(query: Query) -> Self {
        Self {
            term: query.term,
            country: query.country,
            entity: query.entity,
            ..Self::default()
        }
    }

    /// The query parameters currently held in state.
    pub fn query(&self) -> Query {
        Query::new(self.term.clone(), self.country.clone(), self.entity)
    }
}

/// A partial update to the query parameters. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParamUpdate {
    pub term: Option<String>,
    pub country: Option<String>,
    pub entity: Option<Entity>,
}

impl SearchParamUpdate {
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Shared handle to the search state. Cloning is cheap; all clones see the
/// same state.
pub struct SearchStore<C: AppCatalog + ?Sized> {
    catalog: Arc<C>,
    state: Arc<watch::Sender<SearchState>>,
}

impl<C: AppCatalog + ?Sized> Clone for SearchStore<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C: AppCatalog + ?Sized> SearchStore<C> {
    /// Create a store with empty query parameters.
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_query(catalog, Query::default())
    }

    /// Create a store whose query parameters start at `query`.
    pub fn with_query(catalog: Arc<C>, query: Query) -> Self {
        let (tx, _rx) = watch::channel(SearchState::from_query(query));
        Self {
            catalog,
            state: Arc::new(tx),
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver that is marked changed on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Merge a partial update into the query parameters. Subscribers are only
    /// notified when something actually changed.
    pub fn set_search_param(&self, update: SearchParamUpdate) {
        self.state.send_if_modified(|s| {
            let mut changed = false;
            if let Some(term) = update.term {
                changed |= s.term != term;
                s.term = term;
            }
            if let Some(country) = update.country {
                changed |= s.country != country;
                s.country = country;
            }
            if let Some(entity) = update.entity {
                changed |= s.entity != entity;
                s.entity = entity;
            }
            changed
        });
    }

    /// Run a search and record its outcome.
    ///
    /// The query parameters are stored immediately, before the request is
    /// made, so the UI reflects what is being searched for while it loads.
    pub async fn search(&self, term: impl Into<String>, country: impl Into<String>, entity: Entity) {
        let query = Query::new(term, country, entity);
        tracing::debug!(term = %query.term, country = %query.country, entity = %query.entity, "search: start");

        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
            s.term = query.term.clone();
            s.country = query.country.clone();
            s.entity = query.entity;
        });

        let outcome = self.catalog.search_apps(&query).await;

        self.state.send_modify(|s| match outcome {
            Ok(apps) => {
                tracing::debug!(count = apps.len(), "search: resolved");
                s.results = apps;
            }
            Err(err) => {
                tracing::warn!(error = %err, "search: failed");
                s.error = Some(describe(&err, SEARCH_FAILED));
                s.results.clear();
            }
        });
        self.state.send_modify(|s| s.loading = false);
    }

    /// Look up a single app by bundle identifier and replace the results
    /// with it (or with nothing when the storefront has no match).
    ///
    /// The query parameters are left untouched.
    pub async fn lookup(&self, bundle_id: &str, country: &str) {
        tracing::debug!(bundle_id, country, "lookup: start");

        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let outcome = self.catalog.lookup_app(bundle_id, country).await;

        self.state.send_modify(|s| match outcome {
            Ok(app) => {
                tracing::debug!(found = app.is_some(), "lookup: resolved");
                s.results = app.into_iter().collect();
            }
            Err(err) => {
                tracing::warn!(error = %err, bundle_id, "lookup: failed");
                s.error = Some(describe(&err, LOOKUP_FAILED));
                s.results.clear();
            }
        });
        self.state.send_modify(|s| s.loading = false);
    }
}

/// Human-readable message for an error, or `fallback` when the error has
/// nothing useful to say.
fn describe(err: &CatalogError, fallback: &str) -> String {
    let msg = err.to_string();
    if msg.trim().is_empty() {
        fallback.to_string()
    } else {
        msg
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
