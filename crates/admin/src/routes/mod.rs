//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (product search)
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//!
//! # Products
//! GET  /products               - Product listing (gated)
//! GET  /products/new           - Create form
//! POST /products/new           - Create action
//! GET  /products/{id}          - Edit form
//! POST /products/{id}          - Update action
//! POST /products/{id}/delete   - Delete action
//! GET  /product/{id}           - Product detail
//! POST /product/{id}/add-to-cart - Add-to-cart action
//!
//! # Carts
//! GET  /carts                  - Cart listing with totals (gated)
//! GET  /carts/new              - Create form
//! POST /carts/new              - Create action / append line
//! GET  /carts/{id}             - Edit form
//! POST /carts/{id}             - Update action / append line
//! POST /carts/{id}/delete      - Delete action
//!
//! # Users
//! GET  /users                  - User listing (gated)
//! GET  /users/new              - Create form
//! POST /users/new              - Create action
//! GET  /users/{id}             - Edit form
//! POST /users/{id}             - Update action
//! POST /users/{id}/delete      - Delete action
//! ```
//!
//! Only the three listing pages are gated; detail and form pages are open
//! by design, and the mutating actions rely on the upstream API for any
//! enforcement.

pub mod auth;
pub mod carts;
pub mod home;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/new", get(products::new_form).post(products::create))
        .route("/{id}", get(products::edit_form).post(products::update))
        .route("/{id}/delete", post(products::delete))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(carts::index))
        .route("/new", get(carts::new_form).post(carts::create))
        .route("/{id}", get(carts::edit_form).post(carts::update))
        .route("/{id}/delete", post(carts::delete))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index))
        .route("/new", get(users::new_form).post(users::create))
        .route("/{id}", get(users::edit_form).post(users::update))
        .route("/{id}/delete", post(users::delete))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Read-only product detail
        .route("/product/{id}", get(products::show))
        .route("/product/{id}/add-to-cart", post(products::add_to_cart))
        // Cart routes
        .nest("/carts", cart_routes())
        // User routes
        .nest("/users", user_routes())
        // Auth routes
        .merge(auth_routes())
}
