//! Canned iTunes Search API response bodies.

use super::builders::SoftwareBuilder;
use serde_json::{json, Value};

/// Wrap records in the `{resultCount, results}` envelope.
pub fn envelope(results: &[Value]) -> String {
    json!({ "resultCount": results.len(), "results": results }).to_string()
}

/// Body the API returns for a query that matches nothing.
pub fn empty_envelope() -> String {
    envelope(&[])
}

/// Error body the API returns for a rejected parameter.
pub fn error_body(message: &str) -> String {
    json!({ "errorMessage": message }).to_string()
}

/// A realistic three-app search response.
pub fn notes_search_body() -> String {
    envelope(&[
        SoftwareBuilder::new(1, "Notebook")
            .bundle_id("com.example.notebook")
            .version("3.2.1")
            .price(0.0, "USD")
            .rating(4.7, 15_210)
            .genre("Productivity")
            .json(),
        SoftwareBuilder::new(2, "Quick Notes")
            .bundle_id("com.example.quicknotes")
            .version("1.0")
            .price(2.99, "USD")
            .field("formattedPrice", "$2.99")
            .genre("Productivity")
            .json(),
        SoftwareBuilder::new(3, "Notes Widget")
            .bundle_id("com.example.noteswidget")
            .field("releaseDate", "2021-06-01T07:00:00Z")
            .field("fileSizeBytes", "25165824")
            .json(),
    ])
}

/// `n` minimal records in one envelope, for throughput checks.
pub fn large_body(n: usize) -> String {
    let results: Vec<Value> = (0..n)
        .map(|i| {
            SoftwareBuilder::new(i as u64, &format!("App {i}"))
                .version("1.0")
                .price(0.99, "USD")
                .rating(4.0, 10)
                .genre("Utilities")
                .field("description", "A moderately long description. ".repeat(8))
                .json()
        })
        .collect();
    envelope(&results)
}
