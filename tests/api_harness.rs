//! ItunesClient integration harness.
//!
//! # What this covers
//!
//! - **Request shape**: `/search` carries `term`, `media=software`, `limit`,
//!   and the optional `entity` / `country`; `/lookup` carries `bundleId` and
//!   the optional `country`.
//! - **Response decoding**: envelopes decode into `Software` records with
//!   their optional fields intact.
//! - **Failure mapping**: API error bodies, non-success statuses, malformed
//!   bodies, timeouts and refused connections become `CatalogError`s, and
//!   surface in the store as human-readable messages.
//!
//! All traffic goes to [`FakeItunesApi`](common::fake_itunes_api::FakeItunesApi)
//! on localhost.
//!
//! # Running
//!
//! ```sh
//! cargo test --test api_harness
//! ```

mod common;
use common::fake_itunes_api::FakeItunesApi;
use common::*;

use appfind_api::ItunesClient;
use appfind_core::{config::ApiConfig, AppCatalog, CatalogError, Entity, Query, SearchStore};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn client_for(api: &FakeItunesApi) -> ItunesClient {
    ItunesClient::new(&ApiConfig {
        base_url: api.base_url(),
        timeout_secs: 5,
        limit: 25,
    })
    .unwrap()
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_sends_expected_parameters() {
    let api = FakeItunesApi::start().await.unwrap();
    let client = client_for(&api);

    client
        .search_apps(&Query::new("note taking", "GB", Entity::IPadSoftware))
        .await
        .unwrap();

    let requests = api.requests().await;
    assert_eq!(requests.len(), 1);
    let (path, params) = &requests[0];
    assert_eq!(path, "/search");
    assert_param!(params, "term", "note taking");
    assert_param!(params, "media", "software");
    assert_param!(params, "limit", "25");
    assert_param!(params, "entity", "iPadSoftware");
    assert_param!(params, "country", "gb");
}

#[tokio::test]
async fn entity_all_and_empty_country_are_omitted() {
    let api = FakeItunesApi::start().await.unwrap();
    let client = client_for(&api);

    client
        .search_apps(&Query::new("maps", "", Entity::All))
        .await
        .unwrap();

    let params = api.last_params().await;
    assert!(!params.contains_key("entity"), "params: {params:?}");
    assert!(!params.contains_key("country"), "params: {params:?}");
}

#[tokio::test]
async fn blank_term_makes_no_request() {
    let api = FakeItunesApi::start().await.unwrap();
    let client = client_for(&api);

    let apps = client
        .search_apps(&Query::new("", "us", Entity::Software))
        .await
        .unwrap();

    assert!(apps.is_empty());
    assert!(api.requests().await.is_empty());
}

#[tokio::test]
async fn lookup_sends_bundle_id() {
    let api = FakeItunesApi::start().await.unwrap();
    api.respond_lookup(
        200,
        envelope(&[SoftwareBuilder::new(9, "Pages")
            .bundle_id("com.apple.Pages")
            .json()]),
    )
    .await;
    let client = client_for(&api);

    let app = client.lookup_app("com.apple.Pages", "de").await.unwrap();

    assert_eq!(app.map(|a| a.track_id), Some(9));
    let requests = api.requests().await;
    let (path, params) = &requests[0];
    assert_eq!(path, "/lookup");
    assert_param!(params, "bundleId", "com.apple.Pages");
    assert_param!(params, "country", "de");
}

#[tokio::test]
async fn lookup_without_match_is_none() {
    let api = FakeItunesApi::start().await.unwrap();
    let client = client_for(&api);

    let app = client.lookup_app("com.example.missing", "us").await.unwrap();
    assert_eq!(app, None);
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_decodes_records() {
    let api = FakeItunesApi::start().await.unwrap();
    api.respond_search(200, notes_search_body()).await;
    let client = client_for(&api);

    let apps = client
        .search_apps(&Query::new("notes", "us", Entity::Software))
        .await
        .unwrap();

    let names: Vec<&str> = apps.iter().map(|a| a.track_name.as_str()).collect();
    assert_eq!(names, vec!["Notebook", "Quick Notes", "Notes Widget"]);
    assert_eq!(apps[0].price_label().as_deref(), Some("Free"));
    assert_eq!(apps[0].average_user_rating, Some(4.7));
    assert_eq!(apps[1].price_label().as_deref(), Some("$2.99"));
    assert_eq!(apps[2].file_size(), Some(25_165_824));
    assert!(apps[2].release_date.is_some());
}

// ---------------------------------------------------------------------------
// Failure mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_body_becomes_status_error() {
    let api = FakeItunesApi::start().await.unwrap();
    api.respond_search(400, error_body("Invalid value(s) for key(s): [entity]"))
        .await;
    let client = client_for(&api);

    let err = client
        .search_apps(&Query::new("x", "us", Entity::Software))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CatalogError::Status {
            status: 400,
            message: "Invalid value(s) for key(s): [entity]".into()
        }
    );
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let api = FakeItunesApi::start().await.unwrap();
    api.respond_search(200, "not json").await;
    let client = client_for(&api);

    let err = client
        .search_apps(&Query::new("x", "us", Entity::Software))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_server_times_out() {
    let api = FakeItunesApi::start().await.unwrap();
    api.delay_search(Duration::from_secs(3)).await;
    let client = ItunesClient::new(&ApiConfig {
        base_url: api.base_url(),
        timeout_secs: 1,
        limit: 10,
    })
    .unwrap();

    let err = client
        .search_apps(&Query::new("x", "us", Entity::Software))
        .await
        .unwrap_err();
    assert_eq!(err, CatalogError::Transport("request timed out".into()));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let client = ItunesClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:9".into(),
        timeout_secs: 2,
        limit: 10,
    })
    .unwrap();

    let err = client
        .lookup_app("com.example.x", "us")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)), "got {err:?}");
}

// ---------------------------------------------------------------------------
// End to end through the store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_over_http_success_then_failure() {
    let api = FakeItunesApi::start().await.unwrap();
    api.respond_search(200, notes_search_body()).await;
    let store = SearchStore::new(Arc::new(client_for(&api)));

    store.search("notes", "us", Entity::Software).await;
    assert_settled_ok!(
        store.snapshot(),
        [
            "com.example.notebook",
            "com.example.quicknotes",
            "com.example.noteswidget"
        ]
    );

    api.respond_search(500, "").await;
    store.search("notes", "us", Entity::Software).await;
    assert_settled_err!(store.snapshot(), "server returned 500: Internal Server Error");
}

#[tokio::test]
async fn store_surfaces_invalid_country() {
    let api = FakeItunesApi::start().await.unwrap();
    let store = SearchStore::new(Arc::new(client_for(&api)));

    store.search("notes", "usa", Entity::Software).await;

    assert_settled_err!(store.snapshot(), "two-letter");
    assert!(api.requests().await.is_empty());
}
