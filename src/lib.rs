//! appfind — terminal search for the App Store catalogue.
//!
//! The workspace is split into three layers, re-exported here so integration
//! harnesses and benches can reach them through one crate:
//!
//! ```text
//! appfind-api (ItunesClient) ──► appfind-core (SearchStore) ──► appfind-tui
//!                                        │
//!                                        └──► headless (search / lookup subcommands)
//! ```

pub mod headless;

pub use appfind_api;
pub use appfind_core;
