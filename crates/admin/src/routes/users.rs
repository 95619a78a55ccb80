//! User route handlers: gated listing plus create/edit forms. The form
//! flattens the nested name and address groups into plain fields.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use fakestore_core::{Address, Name, NewUser, User, UserId};

use crate::error::AppError;
use crate::filters;
use crate::forms::{FormMode, FormState, load_or_default};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// User listing template.
#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub logged_in: bool,
    pub error: Option<String>,
    pub users: Vec<User>,
}

/// User create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "users/form.html")]
pub struct UserFormTemplate {
    pub logged_in: bool,
    pub verb: &'static str,
    pub action: String,
    pub error: Option<String>,
    pub record: NewUser,
}

impl UserFormTemplate {
    fn new(logged_in: bool, state: FormState<UserId, NewUser>) -> Self {
        let (mode, record, error) = state.into_parts();
        Self {
            logged_in,
            verb: mode.verb(),
            action: mode.action("/users"),
            error,
            record,
        }
    }
}

/// Flat user form submission.
#[derive(Debug, Deserialize)]
pub struct UserFormData {
    pub email: String,
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub city: String,
    pub street: String,
    pub number: String,
    pub zipcode: String,
    pub phone: String,
}

impl From<UserFormData> for NewUser {
    fn from(form: UserFormData) -> Self {
        Self {
            email: form.email,
            username: form.username,
            password: form.password,
            name: Name {
                firstname: form.firstname,
                lastname: form.lastname,
            },
            address: Address {
                city: form.city,
                street: form.street,
                number: form.number,
                zipcode: form.zipcode,
            },
            phone: form.phone,
        }
    }
}

/// Display the user listing. Requires an authenticated session.
pub async fn index(_auth: RequireAuth, State(state): State<AppState>) -> Response {
    list_page(&state, None).await
}

async fn list_page(state: &AppState, message: Option<String>) -> Response {
    let logged_in = state.session().is_authenticated();
    match state.catalog().list_users().await {
        Ok(users) => UsersIndexTemplate {
            logged_in,
            error: message,
            users,
        }
        .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "user listing failed");
            UsersIndexTemplate {
                logged_in,
                error: Some("Failed to load users. Please try again.".to_string()),
                users: Vec::new(),
            }
            .into_response()
        }
    }
}

/// Display a blank create form.
pub async fn new_form(State(state): State<AppState>) -> impl IntoResponse {
    UserFormTemplate::new(
        state.session().is_authenticated(),
        FormState::editing(FormMode::Create, NewUser::default()),
    )
}

/// Display the edit form for a user.
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<UserId>) -> impl IntoResponse {
    let logged_in = state.session().is_authenticated();
    let state_tag = match state.catalog().list_users().await {
        Ok(users) => FormState::editing(
            FormMode::Edit(id),
            load_or_default(users, id, |user: &User| user.id),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "user load failed");
            FormState::rejected(
                FormMode::Edit(id),
                NewUser::default(),
                "Failed to load user. Please try again.".to_string(),
            )
        }
    };
    UserFormTemplate::new(logged_in, state_tag)
}

/// Handle a create submission.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<UserFormData>,
) -> Result<Response, AppError> {
    let draft = NewUser::from(form);
    match state.catalog().create_user(&draft).await {
        Ok(created) => {
            tracing::info!(id = %created.id, "user created");
            Ok(Redirect::to("/users").into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "user create failed");
            Ok(UserFormTemplate::new(
                state.session().is_authenticated(),
                FormState::rejected(
                    FormMode::Create,
                    draft,
                    "Failed to save user. Please try again.".to_string(),
                ),
            )
            .into_response())
        }
    }
}

/// Handle an update submission.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Form(form): Form<UserFormData>,
) -> Result<Response, AppError> {
    let draft = NewUser::from(form);
    let user = draft.clone().with_id(id);
    match state.catalog().update_user(id, &user).await {
        Ok(_) => {
            tracing::info!(id = %id, "user updated");
            Ok(Redirect::to("/users").into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "user update failed");
            Ok(UserFormTemplate::new(
                state.session().is_authenticated(),
                FormState::rejected(
                    FormMode::Edit(id),
                    draft,
                    "Failed to save user. Please try again.".to_string(),
                ),
            )
            .into_response())
        }
    }
}

/// Handle a delete action from the listing.
pub async fn delete(State(state): State<AppState>, Path(id): Path<UserId>) -> Response {
    match state.catalog().delete_user(id).await {
        Ok(()) => {
            tracing::info!(id = %id, "user deleted");
            Redirect::to("/users").into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "user delete failed");
            list_page(
                &state,
                Some("Failed to delete user. Please try again.".to_string()),
            )
            .await
        }
    }
}
