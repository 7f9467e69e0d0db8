//! The seam between the store and whatever answers catalogue requests.

use crate::{error::CatalogError, types::Query, Software};
use async_trait::async_trait;

/// A source of software records: search by term, lookup by bundle id.
///
/// `appfind-api` provides the HTTP implementation; tests plug in fakes.
#[async_trait]
pub trait AppCatalog: Send + Sync {
    /// Search the catalogue for `query.term`, filtered by country and entity.
    async fn search_apps(&self, query: &Query) -> Result<Vec<Software>, CatalogError>;

    /// Fetch a single record by bundle identifier. `Ok(None)` when the
    /// storefront has no such app.
    async fn lookup_app(
        &self,
        bundle_id: &str,
        country: &str,
    ) -> Result<Option<Software>, CatalogError>;
}

