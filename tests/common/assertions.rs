//! Domain-specific assertion macros for appfind harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which store transition went wrong.

/// Assert that a `SearchState` settled successfully with the given bundle ids,
/// in order.
///
/// ```rust
/// assert_settled_ok!(state, ["com.example.a", "com.example.b"]);
/// ```
#[macro_export]
macro_rules! assert_settled_ok {
    ($state:expr, [$($bundle:expr),* $(,)?]) => {{
        let state: &appfind_core::SearchState = &$state;
        assert!(!state.loading, "assert_settled_ok! failed: still loading");
        if let Some(err) = &state.error {
            panic!("assert_settled_ok! failed: error set to {:?}", err);
        }
        let actual: Vec<&str> = state.results.iter().map(|a| a.bundle_id.as_str()).collect();
        let expected: Vec<&str> = vec![$($bundle),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_settled_ok! results differ");
    }};
}

/// Assert that a `SearchState` settled in an error state whose message
/// contains `needle`. Results must be empty.
#[macro_export]
macro_rules! assert_settled_err {
    ($state:expr, $needle:expr) => {{
        let state: &appfind_core::SearchState = &$state;
        let needle: &str = $needle;
        assert!(!state.loading, "assert_settled_err! failed: still loading");
        match &state.error {
            Some(err) if err.contains(needle) => {}
            Some(err) => panic!(
                "assert_settled_err! failed:\n  expected error containing {:?}\n  actual: {:?}",
                needle, err
            ),
            None => panic!(
                "assert_settled_err! failed: no error; {} results",
                state.results.len()
            ),
        }
        assert!(
            state.results.is_empty(),
            "assert_settled_err! failed: {} results left after an error",
            state.results.len()
        );
    }};
}

/// Assert a query string captured by the fake API carries `key=value`.
#[macro_export]
macro_rules! assert_param {
    ($params:expr, $key:expr, $value:expr) => {{
        let params: &std::collections::HashMap<String, String> = &$params;
        let key: &str = $key;
        match params.get(key) {
            Some(actual) if actual == $value => {}
            Some(actual) => panic!(
                "assert_param! failed:\n  {}\n  expected: {:?}\n  actual:   {:?}",
                key, $value, actual
            ),
            None => panic!(
                "assert_param! failed: {:?} missing.\n  Present: {:?}",
                key, params
            ),
        }
    }};
}
