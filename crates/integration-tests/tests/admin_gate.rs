//! View gating: the three listing pages require a session, everything
//! else is open.

use axum::http::StatusCode;
use fakestore_integration_tests::{TestContext, body_text, location};

#[tokio::test]
async fn test_listings_redirect_anonymous_to_login() {
    let ctx = TestContext::new().await;

    for path in ["/products", "/carts", "/users"] {
        let response = ctx.get(path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {path}");
        assert_eq!(location(&response), "/login", "path {path}");
    }

    // The gate decides before any upstream call is made.
    assert!(ctx.upstream.requests().is_empty());
}

#[tokio::test]
async fn test_home_and_detail_are_open() {
    let ctx = TestContext::new().await;
    ctx.upstream.respond("GET", "/products", 200, "[]");

    let response = ctx.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx.get("/product/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Product not found."));
}

#[tokio::test]
async fn test_forms_are_open() {
    let ctx = TestContext::new().await;

    for path in ["/products/new", "/carts/new", "/users/new"] {
        let response = ctx.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }

    // Blank forms start from the default record without any fetch.
    assert!(ctx.upstream.requests().is_empty());
}

#[tokio::test]
async fn test_gated_listing_fetches_once_with_bearer() {
    let ctx = TestContext::new().await;
    ctx.login("tok-123");
    ctx.upstream.respond("GET", "/products", 200, "[]");

    let response = ctx.get("/products").await;
    assert_eq!(response.status(), StatusCode::OK);

    let requests = ctx.upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/products");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_bearer() {
    let ctx = TestContext::new().await;
    ctx.upstream.respond("GET", "/products", 200, "[]");

    let response = ctx.get("/product/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let requests = ctx.upstream.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].authorization.is_none());
}

#[tokio::test]
async fn test_health_is_open() {
    let ctx = TestContext::new().await;
    let response = ctx.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}
