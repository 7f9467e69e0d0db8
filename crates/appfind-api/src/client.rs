//! HTTP client for the iTunes Search API.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | search | `GET {base}/search?term=..&media=software&limit=..[&entity=..][&country=..]` |
//! | lookup | `GET {base}/lookup?bundleId=..[&country=..]` |

use crate::wire;
use appfind_core::{config::ApiConfig, AppCatalog, CatalogError, Query, Software};
use async_trait::async_trait;
use std::time::Duration;

/// The API refuses limits above this.
const MAX_LIMIT: u32 = 200;

/// [`AppCatalog`] backed by the public iTunes Search API.
#[derive(Debug, Clone)]
pub struct ItunesClient {
    http: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl ItunesClient {
    /// Build a client from the `[api]` config section.
    pub fn new(cfg: &ApiConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .user_agent(concat!("appfind/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            limit: cfg.limit.clamp(1, MAX_LIMIT),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<Software>, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, ?params, "itunes: request");

        let resp = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "itunes: non-success status");
        }
        wire::decode(status, &body)
    }
}

#[async_trait]
impl AppCatalog for ItunesClient {
    async fn search_apps(&self, query: &Query) -> Result<Vec<Software>, CatalogError> {
        let term = query.term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let mut params = vec![
            ("term", term.to_string()),
            ("media", "software".to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(entity) = query.entity.wire_name() {
            params.push(("entity", entity.to_string()));
        }
        if let Some(country) = normalize_country(&query.country)? {
            params.push(("country", country));
        }

        self.get("search", &params).await
    }

    async fn lookup_app(
        &self,
        bundle_id: &str,
        country: &str,
    ) -> Result<Option<Software>, CatalogError> {
        let bundle_id = bundle_id.trim();
        if bundle_id.is_empty() {
            return Err(CatalogError::InvalidQuery("bundle id is empty".to_string()));
        }

        let mut params = vec![("bundleId", bundle_id.to_string())];
        if let Some(country) = normalize_country(country)? {
            params.push(("country", country));
        }

        Ok(self.get("lookup", &params).await?.into_iter().next())
    }
}

/// Lowercased two-letter storefront code, or `None` for the API default.
fn normalize_country(country: &str) -> Result<Option<String>, CatalogError> {
    let code = country.trim().to_ascii_lowercase();
    if code.is_empty() {
        return Ok(None);
    }
    if code.len() == 2 && code.bytes().all(|b| b.is_ascii_lowercase()) {
        Ok(Some(code))
    } else {
        Err(CatalogError::InvalidQuery(format!(
            "country must be a two-letter code, got {:?}",
            country.trim()
        )))
    }
}

fn transport(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        CatalogError::Transport("request timed out".to_string())
    } else {
        CatalogError::Transport(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
