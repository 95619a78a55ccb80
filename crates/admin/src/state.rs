//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::AdminConfig;
use crate::session::{SessionError, SessionHolder};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog client and the session holder. The catalog client subscribes
/// to the session holder, so every request it issues carries the most
/// recently set credential.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    session: SessionHolder,
    catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state, loading any persisted session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file exists but cannot be read.
    pub fn new(config: AdminConfig) -> Result<Self, SessionError> {
        let session = SessionHolder::load(&config.session_file)?;
        let catalog = CatalogClient::new(&config.api_base_url, session.subscribe());

        Ok(Self {
            inner: Arc::new(AppStateInner { session, catalog }),
        })
    }

    /// Get a reference to the session holder.
    #[must_use]
    pub fn session(&self) -> &SessionHolder {
        &self.inner.session
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}
