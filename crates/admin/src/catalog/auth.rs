//! Authentication exchange.
//!
//! Sends exactly the operator-supplied username and password to the
//! upstream login endpoint and returns the bearer token. Error variants
//! carry the user-facing message directly: which variant applies depends
//! on whether a response was received at all.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::CatalogClient;

/// Operator-supplied login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Authentication failures, each displaying its user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The upstream answered with a non-success status.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a response.
    #[error("Network error. Please check your connection.")]
    Network(#[source] reqwest::Error),

    /// A success response that carried no usable token.
    #[error("An unexpected error occurred during login.")]
    Unexpected,
}

impl CatalogClient {
    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// - `AuthError::Rejected` when the upstream refuses the credentials,
    ///   carrying the server-supplied message when the body has one
    /// - `AuthError::Network` when no response was received
    /// - `AuthError::Unexpected` when a success response has no token
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &Credentials) -> Result<SecretString, AuthError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(credentials)
            .send()
            .await
            .map_err(AuthError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(AuthError::Network)?;

        if !status.is_success() {
            tracing::warn!(status = %status, "login rejected by upstream");
            return Err(AuthError::Rejected(rejection_message(&body)));
        }

        let token = serde_json::from_str::<TokenResponse>(&body)
            .ok()
            .map(|payload| payload.token)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::Unexpected)?;

        Ok(SecretString::from(token))
    }
}

/// Resolve the user-facing message for a rejected login.
///
/// The upstream answers rejections with either a JSON object carrying a
/// `msg`/`message` field or a bare text body; an empty body falls back to
/// the generic invalid-credentials message.
fn rejection_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg"] {
            if let Some(message) = value.get(key).and_then(serde_json::Value::as_str) {
                return message.to_string();
            }
        }
        if let Some(message) = value.as_str() {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Login failed. Invalid username or password.".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_prefers_server_json() {
        assert_eq!(
            rejection_message(r#"{"message":"username or password is incorrect"}"#),
            "username or password is incorrect"
        );
        assert_eq!(
            rejection_message(r#"{"msg":"no such user"}"#),
            "no such user"
        );
    }

    #[test]
    fn test_rejection_message_uses_plain_text_body() {
        assert_eq!(
            rejection_message("username or password is incorrect"),
            "username or password is incorrect"
        );
    }

    #[test]
    fn test_rejection_message_falls_back_when_body_empty() {
        assert_eq!(
            rejection_message("  "),
            "Login failed. Invalid username or password."
        );
    }
}
