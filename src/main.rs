use anyhow::Context;
use appfind::headless::{self, OutputFormat, Request};
use appfind_api::ItunesClient;
use appfind_core::{config::Config, Entity, SearchStore};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "appfind", version, about = "Search the App Store from a terminal")]
struct Cli {
    /// Write debug logs to /tmp/appfind-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Read configuration from this file instead of ~/.config/appfind/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override `[api].base_url`.
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Search by term and print the results.
    Search {
        term: String,
        /// Two-letter storefront code (defaults to `[search].country`).
        #[arg(long)]
        country: Option<String>,
        /// iphone, ipad, mac or all (defaults to `[search].entity`).
        #[arg(long)]
        entity: Option<Entity>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Fetch one app by bundle identifier and print it.
    Lookup {
        bundle_id: String,
        #[arg(long)]
        country: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/appfind-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("appfind debug log started — tail -f /tmp/appfind-debug.log");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("reading config from {}", path.display()))?,
        None => Config::load().context("loading ~/.config/appfind/config.toml")?,
    };
    if let Some(url) = cli.base_url {
        config.api.base_url = url;
    }

    let Some(cmd) = cli.command else {
        return appfind_tui::run(config);
    };

    let initial = config.search.initial_query();
    let (request, format) = match cmd {
        Cmd::Search { term, country, entity, format } => (
            Request::Search {
                term,
                country: country.unwrap_or(initial.country).to_ascii_lowercase(),
                entity: entity.unwrap_or(initial.entity),
            },
            format,
        ),
        Cmd::Lookup { bundle_id, country, format } => (
            Request::Lookup {
                bundle_id,
                country: country.unwrap_or(initial.country).to_ascii_lowercase(),
            },
            format,
        ),
    };

    let client = ItunesClient::new(&config.api)?;
    let store = SearchStore::new(Arc::new(client));

    let runtime = tokio::runtime::Runtime::new()?;
    let state = runtime.block_on(headless::execute(&store, &request));

    if let Some(err) = &state.error {
        eprintln!("appfind: {err}");
        std::process::exit(1);
    }
    print!("{}", headless::render(&state, format)?);
    Ok(())
}
