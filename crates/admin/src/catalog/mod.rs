//! Remote catalog client for the Fake Store API.
//!
//! A stateless wrapper issuing CRUD requests for the three resource
//! collections (products, carts, users) plus the authentication exchange.
//! Every outgoing request attaches the currently held bearer credential,
//! if any; requests without one proceed unauthenticated and the upstream
//! decides whether to reject them. No retries, no timeout overrides -
//! failures propagate immediately to the caller.

mod auth;
mod carts;
mod products;
mod users;

pub use auth::{AuthError, Credentials};

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::watch;
use url::Url;

/// Errors from catalog requests.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response.
    #[error("network error reaching the catalog: {0}")]
    Network(#[source] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("catalog rejected {resource} request with status {status}")]
    Rejected {
        resource: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode {resource} response: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Client for the Fake Store catalog API.
///
/// Cheaply cloneable via `Arc`. Holds a `watch` receiver onto the session
/// token so each request reads the most recent credential.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    token: watch::Receiver<Option<SecretString>>,
}

impl CatalogClient {
    /// Create a new catalog client against the given origin.
    #[must_use]
    pub fn new(base_url: &Url, token: watch::Receiver<Option<SecretString>>) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.as_str().trim_end_matches('/').to_string(),
                token,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Build a request with the current bearer credential attached, if any.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.inner.client.request(method, self.url(path));
        let token = self.inner.token.borrow().clone();
        match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a request and decode a JSON response body.
    async fn execute<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, CatalogError> {
        let body = self.execute_raw(resource, builder).await?;
        serde_json::from_str(&body).map_err(|source| {
            tracing::error!(
                resource,
                body = %body.chars().take(500).collect::<String>(),
                "failed to decode catalog response"
            );
            CatalogError::Decode { resource, source }
        })
    }

    /// Send a request, returning the raw success body.
    async fn execute_raw(
        &self,
        resource: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<String, CatalogError> {
        let response = builder.send().await.map_err(CatalogError::Network)?;
        let status = response.status();
        let body = response.text().await.map_err(CatalogError::Network)?;

        if !status.is_success() {
            tracing::warn!(
                resource,
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "catalog returned non-success status"
            );
            return Err(CatalogError::Rejected {
                resource,
                status,
                body,
            });
        }

        Ok(body)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
    ) -> Result<Vec<T>, CatalogError> {
        self.execute(resource, self.request(Method::GET, path)).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        resource: &'static str,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        self.execute(resource, self.request(method, path).json(body))
            .await
    }

    async fn delete(&self, resource: &'static str, path: &str) -> Result<(), CatalogError> {
        self.execute_raw(resource, self.request(Method::DELETE, path))
            .await?;
        Ok(())
    }
}
