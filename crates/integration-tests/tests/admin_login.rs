//! Login and logout flows against the stub upstream.

use axum::http::StatusCode;
use fakestore_integration_tests::{TestContext, body_text, location};
use serde_json::json;

#[tokio::test]
async fn test_login_success_stores_token_and_redirects() {
    let ctx = TestContext::new().await;
    ctx.upstream
        .respond("POST", "/auth/login", 200, r#"{"token":"tok-abc"}"#);

    let response = ctx
        .post_form("/login", "username=johnd&password=m38rmF%24")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/products");
    assert!(ctx.state.session().is_authenticated());
}

#[tokio::test]
async fn test_login_submits_exactly_the_entered_credentials() {
    let ctx = TestContext::new().await;
    ctx.upstream
        .respond("POST", "/auth/login", 200, r#"{"token":"tok-abc"}"#);

    ctx.post_form("/login", "username=mor_2314&password=83r5%5E_")
        .await;

    let requests = ctx.upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body_json(),
        json!({"username": "mor_2314", "password": "83r5^_"})
    );
}

#[tokio::test]
async fn test_login_rejection_shows_upstream_message() {
    let ctx = TestContext::new().await;
    ctx.upstream.respond(
        "POST",
        "/auth/login",
        401,
        "username or password is incorrect",
    );

    let response = ctx.post_form("/login", "username=johnd&password=wrong").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("username or password is incorrect"));
    // The entered username stays in the form.
    assert!(body.contains("johnd"));
    assert!(!ctx.state.session().is_authenticated());
}

#[tokio::test]
async fn test_login_blank_rejection_falls_back_to_stock_message() {
    let ctx = TestContext::new().await;
    ctx.upstream.respond("POST", "/auth/login", 401, "");

    let response = ctx.post_form("/login", "username=johnd&password=wrong").await;
    let body = body_text(response).await;
    assert!(body.contains("Login failed. Invalid username or password."));
}

#[tokio::test]
async fn test_login_network_failure_message() {
    let ctx = TestContext::with_dead_upstream().await;

    let response = ctx.post_form("/login", "username=johnd&password=pw").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Network error. Please check your connection."));
    assert!(!ctx.state.session().is_authenticated());
}

#[tokio::test]
async fn test_login_malformed_token_payload_message() {
    let ctx = TestContext::new().await;
    ctx.upstream
        .respond("POST", "/auth/login", 200, r#"{"unexpected":true}"#);

    let response = ctx.post_form("/login", "username=johnd&password=pw").await;
    let body = body_text(response).await;
    assert!(body.contains("An unexpected error occurred during login."));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let ctx = TestContext::new().await;
    ctx.login("tok-abc");

    let response = ctx.post("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(!ctx.state.session().is_authenticated());

    // The gate closes again immediately.
    let response = ctx.get("/products").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
