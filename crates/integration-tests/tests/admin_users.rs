//! User management flows: listing and the flattened name/address form.

use axum::http::StatusCode;
use fakestore_integration_tests::{TestContext, body_text, input_value, location};
use serde_json::json;

fn user_json(id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "email": "john@gmail.com",
        "username": "johnd",
        "password": "m38rmF$",
        "name": {"firstname": "john", "lastname": "doe"},
        "address": {
            "city": "kilcoole",
            "street": "new road",
            "number": 7682,
            "zipcode": "12926-3874",
            "geolocation": {"lat": "-37.3159", "long": "81.1496"}
        },
        "phone": "1-570-236-7033",
        "__v": 0
    })
}

const JANE_FORM: &str = "email=jane%40example.test&username=janed&password=secret\
&firstname=Jane&lastname=Doe&city=cork&street=main+street&number=12\
&zipcode=1234&phone=555-0100";

#[tokio::test]
async fn test_listing_renders_users() {
    let ctx = TestContext::new().await;
    ctx.login("tok");
    ctx.upstream
        .respond("GET", "/users", 200, &json!([user_json(1)]).to_string());

    let response = ctx.get("/users").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("johnd"));
    assert!(body.contains("john doe"));
}

#[tokio::test]
async fn test_listing_failure_shows_message() {
    let ctx = TestContext::new().await;
    ctx.login("tok");
    ctx.upstream.respond("GET", "/users", 500, "boom");

    let body = body_text(ctx.get("/users").await).await;
    assert!(body.contains("Failed to load users. Please try again."));
}

#[tokio::test]
async fn test_create_nests_name_and_address() {
    let ctx = TestContext::new().await;
    ctx.upstream
        .respond("POST", "/users", 200, &user_json(11).to_string());

    let response = ctx.post_form("/users/new", JANE_FORM).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/users");

    let requests = ctx.upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body_json(),
        json!({
            "email": "jane@example.test",
            "username": "janed",
            "password": "secret",
            "name": {"firstname": "Jane", "lastname": "Doe"},
            "address": {
                "city": "cork",
                "street": "main street",
                "number": "12",
                "zipcode": "1234"
            },
            "phone": "555-0100"
        })
    );
}

#[tokio::test]
async fn test_update_replaces_full_record_including_id() {
    let ctx = TestContext::new().await;
    ctx.upstream
        .respond("PUT", "/users/4", 200, &user_json(4).to_string());

    let response = ctx.post_form("/users/4", JANE_FORM).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let requests = ctx.upstream.requests();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].body_json()["id"], json!(4));
    assert_eq!(requests[0].body_json()["name"]["firstname"], json!("Jane"));
}

#[tokio::test]
async fn test_edit_form_loads_numeric_address_number() {
    let ctx = TestContext::new().await;
    ctx.upstream
        .respond("GET", "/users", 200, &json!([user_json(4)]).to_string());

    let body = body_text(ctx.get("/users/4").await).await;
    assert!(body.contains("Edit User"));
    // The upstream serves the house number as a JSON number.
    assert!(body.contains("7682"));
}

#[tokio::test]
async fn test_load_then_unmodified_submit_replaces_with_equal_record() {
    let ctx = TestContext::new().await;
    ctx.upstream
        .respond("GET", "/users", 200, &json!([user_json(4)]).to_string());
    ctx.upstream
        .respond("PUT", "/users/4", 200, &user_json(4).to_string());

    // Load the edit form and resubmit exactly what it rendered.
    let page = body_text(ctx.get("/users/4").await).await;
    let mut form = url::form_urlencoded::Serializer::new(String::new());
    for field in [
        "email", "username", "password", "firstname", "lastname", "city", "street", "number",
        "zipcode", "phone",
    ] {
        form.append_pair(field, &input_value(&page, field));
    }

    let response = ctx.post_form("/users/4", &form.finish()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The record as modeled: the numeric house number normalized to a
    // string, upstream-only fields (geolocation, __v) not round-tripped.
    let put = ctx
        .upstream
        .requests()
        .into_iter()
        .find(|request| request.method == "PUT")
        .expect("no replace request issued");
    assert_eq!(
        put.body_json(),
        json!({
            "id": 4,
            "email": "john@gmail.com",
            "username": "johnd",
            "password": "m38rmF$",
            "name": {"firstname": "john", "lastname": "doe"},
            "address": {
                "city": "kilcoole",
                "street": "new road",
                "number": "7682",
                "zipcode": "12926-3874"
            },
            "phone": "1-570-236-7033"
        })
    );
}

#[tokio::test]
async fn test_save_failure_keeps_entered_values() {
    let ctx = TestContext::new().await;

    let response = ctx.post_form("/users/new", JANE_FORM).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Failed to save user. Please try again."));
    assert!(body.contains("janed"));
}

#[tokio::test]
async fn test_delete_calls_upstream_and_redirects() {
    let ctx = TestContext::new().await;
    ctx.upstream.respond("DELETE", "/users/4", 200, "{}");

    let response = ctx.post("/users/4/delete").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/users");
}
