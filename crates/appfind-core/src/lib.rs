//! appfind-core — core library for appfind.
//!
//! This crate holds the search state container and everything it needs that
//! is independent of the transport and the front end.
//!
//! # Architecture
//!
//! ```text
//! TUI / CLI ──► SearchStore ──► AppCatalog ──► (appfind-api) HTTP
//!     ▲              │
//!     └── watch ─────┘
//! ```
//!
//! Front ends call the store's async mutators on a tokio runtime and render
//! from [`SearchStore::snapshot`](store::SearchStore::snapshot).

pub mod catalog;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use catalog::AppCatalog;
pub use error::CatalogError;
pub use store::{SearchParamUpdate, SearchState, SearchStore};
pub use types::{Entity, Query, Software};
