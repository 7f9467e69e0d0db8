//! appfind TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use appfind_api::ItunesClient;
use appfind_core::{config::Config, AppCatalog, SearchStore};
use std::sync::Arc;

/// Start the TUI against the iTunes Search API described by `config.api`.
///
/// The terminal loop runs on the calling thread; searches and lookups run on
/// a tokio runtime owned by this function.
pub fn run(config: Config) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    let client = ItunesClient::new(&config.api)?;
    tracing::info!(base_url = client.base_url(), "catalogue client ready");

    let catalog: Arc<dyn AppCatalog> = Arc::new(client);
    let store = SearchStore::with_query(catalog, config.search.initial_query());
    let theme = theme::Theme::by_name(&config.ui.theme);

    App::new(store, runtime.handle().clone(), config, theme).run()
}
