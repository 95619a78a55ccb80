//! Authentication gating extractor.
//!
//! The list views (products, carts, users) require a held session token;
//! everything else - home, login, detail and form views, and the mutating
//! actions - is open by design. The gate controls visibility only: the
//! upstream API is the actual enforcement point for the operations
//! themselves.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::state::AppState;

/// Extractor that requires a held session token.
///
/// Runs before the handler body, so a gated view issues no catalog fetch
/// when the credential is absent - the request is answered with a redirect
/// to the login page instead.
///
/// # Example
///
/// ```rust,ignore
/// async fn index(_auth: RequireAuth, State(state): State<AppState>) -> impl IntoResponse {
///     // only reached with a held token
/// }
/// ```
pub struct RequireAuth;

/// Rejection when the session token is absent.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.session().is_authenticated() {
            Ok(Self)
        } else {
            Err(AuthRejection)
        }
    }
}
