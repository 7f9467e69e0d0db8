//! Core types for appfind-core.
//!
//! This module defines the value records shared across all layers: the
//! [`Software`] result record returned by the catalogue, the [`Query`] that
//! drives a search, and the [`Entity`] filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single software entry returned by the catalogue.
///
/// Field names follow the remote JSON (camelCase on the wire). Only the
/// identity fields are required; everything else is best-effort and left as
/// `None` when the API omits it. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Software {
    pub track_id: u64,
    pub track_name: String,
    pub bundle_id: String,
    pub artist_name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub formatted_price: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, rename = "artworkUrl100")]
    pub artwork_url_100: Option<String>,
    #[serde(default, rename = "artworkUrl512")]
    pub artwork_url_512: Option<String>,
    #[serde(default)]
    pub track_view_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_notes: Option<String>,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_version_release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub average_user_rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<u64>,
    #[serde(default)]
    pub primary_genre_name: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Size of the download in bytes. The API sends this as a decimal string.
    #[serde(default)]
    pub file_size_bytes: Option<String>,
    #[serde(default)]
    pub minimum_os_version: Option<String>,
    #[serde(default)]
    pub content_advisory_rating: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
}

impl Software {
    /// Parsed download size, if the API sent a valid number.
    pub fn file_size(&self) -> Option<u64> {
        self.file_size_bytes.as_deref()?.trim().parse().ok()
    }

    /// Human-readable price. Falls back to `"Free"` for a zero price with no
    /// formatted label.
    pub fn price_label(&self) -> Option<String> {
        if let Some(label) = &self.formatted_price {
            return Some(label.clone());
        }
        match self.price {
            Some(p) if p == 0.0 => Some("Free".to_string()),
            Some(p) => Some(match &self.currency {
                Some(cur) => format!("{p:.2} {cur}"),
                None => format!("{p:.2}"),
            }),
            None => None,
        }
    }
}

/// Entity-type filter sent with a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Entity {
    /// iPhone apps.
    #[default]
    #[serde(rename = "software")]
    Software,
    #[serde(rename = "iPadSoftware")]
    IPadSoftware,
    #[serde(rename = "macSoftware")]
    MacSoftware,
    /// No entity parameter; the API decides.
    #[serde(rename = "all")]
    All,
}

impl Entity {
    pub const ALL: [Entity; 4] = [
        Entity::Software,
        Entity::IPadSoftware,
        Entity::MacSoftware,
        Entity::All,
    ];

    /// Value of the `entity` query parameter, or `None` when it is omitted.
    pub fn wire_name(self) -> Option<&'static str> {
        match self {
            Entity::Software => Some("software"),
            Entity::IPadSoftware => Some("iPadSoftware"),
            Entity::MacSoftware => Some("macSoftware"),
            Entity::All => None,
        }
    }

    /// Next variant in display order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous variant in display order, wrapping around.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Software => write!(f, "iphone"),
            Entity::IPadSoftware => write!(f, "ipad"),
            Entity::MacSoftware => write!(f, "mac"),
            Entity::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "software" | "iphone" | "ios" => Ok(Entity::Software),
            "ipadsoftware" | "ipad" => Ok(Entity::IPadSoftware),
            "macsoftware" | "mac" | "macos" => Ok(Entity::MacSoftware),
            "" | "all" | "any" => Ok(Entity::All),
            other => Err(format!("unknown entity: {other}")),
        }
    }
}

/// The combination of search term, country code, and entity filter driving a
/// search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub term: String,
    /// Two-letter storefront code. Empty means the API default.
    pub country: String,
    pub entity: Entity,
}

impl Query {
    pub fn new(term: impl Into<String>, country: impl Into<String>, entity: Entity) -> Self {
        Self {
            term: term.into(),
            country: country.into(),
            entity,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
