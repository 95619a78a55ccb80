//! User catalog calls.

use fakestore_core::{NewUser, User, UserId};
use reqwest::Method;
use tracing::instrument;

use super::{CatalogClient, CatalogError};

const RESOURCE: &str = "user";

impl CatalogClient {
    /// Fetch the full user collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, CatalogError> {
        self.get_list(RESOURCE, "/users").await
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self, draft))]
    pub async fn create_user(&self, draft: &NewUser) -> Result<User, CatalogError> {
        self.send_json(RESOURCE, Method::POST, "/users", draft).await
    }

    /// Replace a user record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    #[instrument(skip(self, user), fields(id = %id))]
    pub async fn update_user(&self, id: UserId, user: &User) -> Result<User, CatalogError> {
        self.send_json(RESOURCE, Method::PUT, &format!("/users/{id}"), user)
            .await
    }

    /// Delete a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), CatalogError> {
        self.delete(RESOURCE, &format!("/users/{id}")).await
    }
}
