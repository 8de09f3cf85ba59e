//! Resolver classification tests against the mock backend
//!
//! Covers the outcome taxonomy: blank input short-circuit, single match,
//! zero matches, backend error messages, multi-match policies, and the
//! per-request timeout.

mod common;

use common::{record, MockBackend};
use givtrack_client::{BackendClient, Resolver};
use givtrack_common::config::MultiMatchPolicy;
use givtrack_common::Error;

async fn resolver_for(backend: &MockBackend, policy: MultiMatchPolicy) -> Resolver {
    let base = backend.spawn().await;
    let client = BackendClient::new(&base, 5).unwrap();
    Resolver::new(client, policy)
}

#[tokio::test]
async fn resolves_single_match() {
    let backend = MockBackend::new();
    backend.set_code("Q1", vec![record("r1", "Q1")]);
    let resolver = resolver_for(&backend, MultiMatchPolicy::First).await;

    let resolved = resolver.resolve("Q1").await.unwrap();
    assert_eq!(resolved.id, "r1");
    assert_eq!(resolved.qr_code.as_deref(), Some("Q1"));
}

#[tokio::test]
async fn blank_code_short_circuits_without_network() {
    // Unroutable base: a network attempt would surface as a backend error
    let client = BackendClient::new("http://127.0.0.1:1", 1).unwrap();
    let resolver = Resolver::new(client, MultiMatchPolicy::First);

    assert!(matches!(resolver.resolve("").await, Err(Error::NoCode)));
    assert!(matches!(resolver.resolve("   ").await, Err(Error::NoCode)));
}

#[tokio::test]
async fn zero_matches_is_empty_result() {
    let backend = MockBackend::new();
    backend.set_code("Q1", vec![]);
    let resolver = resolver_for(&backend, MultiMatchPolicy::First).await;

    let err = resolver.resolve("Q1").await.unwrap_err();
    assert!(matches!(err, Error::EmptyResult));
    assert!(err.is_empty_state());
}

#[tokio::test]
async fn non_2xx_reports_body_message() {
    let backend = MockBackend::new();
    // No mapping for this code => 404 with {"message": "not found"}
    let resolver = resolver_for(&backend, MultiMatchPolicy::First).await;

    match resolver.resolve("unknown").await.unwrap_err() {
        Error::Backend(message) => assert_eq!(message, "not found"),
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn multi_match_first_takes_backend_order() {
    let backend = MockBackend::new();
    backend.set_code("Q1", vec![record("r1", "Q1"), record("r2", "Q1")]);
    let resolver = resolver_for(&backend, MultiMatchPolicy::First).await;

    let resolved = resolver.resolve("Q1").await.unwrap();
    assert_eq!(resolved.id, "r1");
}

#[tokio::test]
async fn multi_match_reject_reports_count() {
    let backend = MockBackend::new();
    backend.set_code("Q1", vec![record("r1", "Q1"), record("r2", "Q1")]);
    let resolver = resolver_for(&backend, MultiMatchPolicy::Reject).await;

    match resolver.resolve("Q1").await.unwrap_err() {
        Error::MultiMatch(n) => assert_eq!(n, 2),
        other => panic!("expected multi-match error, got {:?}", other),
    }
}

#[tokio::test]
async fn slow_response_times_out_as_backend_error() {
    let backend = MockBackend::new();
    backend.set_code("Q1", vec![record("r1", "Q1")]);
    backend.set_delay("Q1", 1500);

    let base = backend.spawn().await;
    let client = BackendClient::new(&base, 1).unwrap();
    let resolver = Resolver::new(client, MultiMatchPolicy::First);

    assert!(matches!(resolver.resolve("Q1").await, Err(Error::Backend(_))));
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let backend = MockBackend::new();
    backend.set_code("Q1", vec![record("r1", "Q1")]);
    let resolver = resolver_for(&backend, MultiMatchPolicy::First).await;

    let first = resolver.resolve("Q1").await.unwrap();
    let second = resolver.resolve("Q1").await.unwrap();
    assert_eq!(first, second);
}
