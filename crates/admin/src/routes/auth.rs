//! Authentication route handlers.
//!
//! Login exchanges the submitted credentials for a bearer token and stores
//! it in the session holder; logout clears the held token. Both leave the
//! upstream API as the sole authority on credential validity.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::catalog::Credentials;
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
    pub username: String,
}

/// Display the login page.
pub async fn login_page(State(state): State<AppState>) -> impl IntoResponse {
    LoginTemplate {
        logged_in: state.session().is_authenticated(),
        error: None,
        username: String::new(),
    }
}

/// Handle a login submission.
///
/// On success the token is persisted and the operator lands on the product
/// listing. On failure the form re-renders with the error message matching
/// what went wrong - invalid credentials, network failure, or an
/// unexpected response - and the token stays unset.
pub async fn login(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Result<Response, AppError> {
    match state.catalog().login(&credentials).await {
        Ok(token) => {
            state.session().set(token)?;
            tracing::info!(username = %credentials.username, "login succeeded");
            Ok(Redirect::to("/products").into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            Ok(LoginTemplate {
                logged_in: state.session().is_authenticated(),
                error: Some(err.to_string()),
                username: credentials.username,
            }
            .into_response())
        }
    }
}

/// Handle a logout submission: clear the held token and go home.
pub async fn logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.session().clear()?;
    tracing::info!("session cleared");
    Ok(Redirect::to("/"))
}
