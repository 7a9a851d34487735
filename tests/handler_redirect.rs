mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use mail_relay::api::handlers::{missing_id_handler, redirect_handler};
use mail_relay::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_redirect_found_returns_302() {
    let (state, links, _queue) = common::memory_state();
    common::seed_link(&links, "abc123XYZ-_0", "https://example.com/target").await;

    let app = Router::new()
        .route("/r/{id}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/r/abc123XYZ-_0").await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_counts_every_resolution() {
    let (state, links, _queue) = common::memory_state();
    common::seed_link(&links, "counted00001", "https://example.com").await;

    let app = Router::new()
        .route("/r/{id}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    for _ in 0..3 {
        let response = server.get("/r/counted00001").await;
        assert_eq!(response.status_code(), 302);
    }

    let link = links.find("counted00001").await.unwrap().unwrap();
    assert_eq!(link.clicks, 3);
}

#[tokio::test]
async fn test_redirect_unknown_id_not_found() {
    let (state, links, _queue) = common::memory_state();

    let app = Router::new()
        .route("/r/{id}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/r/unknownid001").await;

    response.assert_status_not_found();
    assert_eq!(response.text(), "Tracking link not found");

    // Never a redirect, and no phantom row is created.
    assert!(response.maybe_header("location").is_none());
    assert!(links.is_empty());
}

#[tokio::test]
async fn test_redirect_malformed_id_bad_request() {
    let (state, _links, _queue) = common::memory_state();

    let app = Router::new()
        .route("/r/{id}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/r/not.a.valid.id").await;

    response.assert_status_bad_request();
    assert_eq!(response.text(), "Invalid tracking id");
}

#[tokio::test]
async fn test_redirect_rejects_percent_encoded_id() {
    let (state, _links, _queue) = common::memory_state();

    let app = Router::new()
        .route("/r/{id}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    // Path extraction decodes %20 into a space, which the id gate rejects.
    let response = server.get("/r/abc%20def").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_redirect_without_id_bad_request() {
    let (state, _links, _queue) = common::memory_state();

    let app = Router::new()
        .route("/r", get(missing_id_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/r").await;

    response.assert_status_bad_request();
    assert_eq!(response.text(), "Missing tracking id");
}
