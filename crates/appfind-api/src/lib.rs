//! appfind-api — catalogue adapters for appfind.
//!
//! [`ItunesClient`] implements [`appfind_core::AppCatalog`] over HTTPS so the
//! store never sees a URL or a status code, only records and
//! [`CatalogError`](appfind_core::CatalogError)s.

pub mod client;
pub mod wire;

pub use client::ItunesClient;
