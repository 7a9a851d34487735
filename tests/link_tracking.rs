mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use mail_relay::api::handlers::redirect_handler;
use mail_relay::application::services::LinkRewriter;
use mail_relay::domain::repositories::LinkRepository;

const BASE: &str = "https://track.example.com";

/// Extracts tracking ids from a rewritten body, in order of appearance.
fn tracking_ids(body: &str) -> Vec<String> {
    let marker = format!("{BASE}/r/");
    let mut ids = Vec::new();
    let mut rest = body;

    while let Some(pos) = rest.find(&marker) {
        let tail = &rest[pos + marker.len()..];
        let id: String = tail
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        ids.push(id);
        rest = tail;
    }

    ids
}

#[tokio::test]
async fn test_rewritten_link_resolves_to_original() {
    let (state, links, _queue) = common::memory_state();
    let rewriter = LinkRewriter::new(links.clone(), BASE);

    let rewritten = rewriter
        .rewrite("Click https://shop.example.com/sale?id=42 before Friday")
        .await;

    assert!(!rewritten.body.contains("shop.example.com"));
    let ids = tracking_ids(&rewritten.body);
    assert_eq!(ids.len(), 1);

    let app = Router::new()
        .route("/r/{id}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get(&format!("/r/{}", ids[0])).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(
        response.header("location"),
        "https://shop.example.com/sale?id=42"
    );

    let link = links.find(&ids[0]).await.unwrap().unwrap();
    assert_eq!(link.clicks, 1);
}

#[tokio::test]
async fn test_repeated_url_shares_one_tracking_link() {
    let (_state, links, _queue) = common::memory_state();
    let rewriter = LinkRewriter::new(links.clone(), BASE);

    let rewritten = rewriter
        .rewrite("First https://example.com/page then https://example.com/page again")
        .await;

    let ids = tracking_ids(&rewritten.body);
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[0], ids[1]);
    assert_eq!(rewritten.links_created, 1);
    assert_eq!(links.len(), 1);
}

#[tokio::test]
async fn test_distinct_urls_resolve_independently() {
    let (state, links, _queue) = common::memory_state();
    let rewriter = LinkRewriter::new(links.clone(), BASE);

    let rewritten = rewriter
        .rewrite("Docs: https://docs.example.com and blog: https://blog.example.com/post")
        .await;

    // Ids are minted in first-occurrence order.
    let ids = tracking_ids(&rewritten.body);
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);

    let app = Router::new()
        .route("/r/{id}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let first = server.get(&format!("/r/{}", ids[0])).await;
    assert_eq!(first.header("location"), "https://docs.example.com");

    let second = server.get(&format!("/r/{}", ids[1])).await;
    assert_eq!(second.header("location"), "https://blog.example.com/post");
}

#[tokio::test]
async fn test_second_pass_leaves_tracking_links_untouched() {
    let (_state, links, _queue) = common::memory_state();
    let rewriter = LinkRewriter::new(links.clone(), BASE);

    let first = rewriter.rewrite("Visit https://example.com/docs now").await;
    let second = rewriter.rewrite(&first.body).await;

    assert_eq!(second.body, first.body);
    assert_eq!(second.links_created, 0);
    assert_eq!(links.len(), 1);
}

#[tokio::test]
async fn test_body_without_urls_passes_through() {
    let (_state, links, _queue) = common::memory_state();
    let rewriter = LinkRewriter::new(links.clone(), BASE);

    let body = "No links here, just words.";
    let rewritten = rewriter.rewrite(body).await;

    assert_eq!(rewritten.body, body);
    assert_eq!(rewritten.links_created, 0);
    assert!(links.is_empty());
}
