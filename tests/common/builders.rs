//! Test builders — ergonomic constructors for `Software` records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use appfind_core::Software;
use serde_json::{json, Map, Value};

/// Fluent builder for [`Software`] fixtures.
///
/// The record is built through its JSON form so it exercises the same serde
/// path the API client does.
///
/// # Example
///
/// ```rust
/// let app = SoftwareBuilder::new(42, "Notebook")
///     .bundle_id("com.example.notebook")
///     .price(4.99, "USD")
///     .rating(4.6, 1200)
///     .build();
/// ```
pub struct SoftwareBuilder {
    fields: Map<String, Value>,
}

impl SoftwareBuilder {
    pub fn new(track_id: u64, name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("trackId".into(), json!(track_id));
        fields.insert("trackName".into(), json!(name));
        fields.insert(
            "bundleId".into(),
            json!(format!("com.example.{}", name.to_lowercase().replace(' ', "-"))),
        );
        fields.insert("artistName".into(), json!("Example Developer"));
        fields.insert("kind".into(), json!("software"));
        Self { fields }
    }

    pub fn bundle_id(self, id: &str) -> Self {
        self.field("bundleId", id)
    }

    pub fn artist(self, name: &str) -> Self {
        self.field("artistName", name)
    }

    pub fn version(self, v: &str) -> Self {
        self.field("version", v)
    }

    pub fn price(self, price: f64, currency: &str) -> Self {
        self.field("price", price).field("currency", currency)
    }

    pub fn rating(self, avg: f64, count: u64) -> Self {
        self.field("averageUserRating", avg)
            .field("userRatingCount", count)
    }

    pub fn genre(self, genre: &str) -> Self {
        self.field("primaryGenreName", genre)
            .field("genres", json!([genre]))
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// JSON object as the API would send it.
    pub fn json(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn build(self) -> Software {
        serde_json::from_value(Value::Object(self.fields))
            .expect("SoftwareBuilder produced an invalid record")
    }
}

/// `count` distinct apps named `"{prefix} {i}"`.
pub fn apps(prefix: &str, count: usize) -> Vec<Software> {
    (0..count)
        .map(|i| SoftwareBuilder::new(1_000 + i as u64, &format!("{prefix} {i}")).build())
        .collect()
}
