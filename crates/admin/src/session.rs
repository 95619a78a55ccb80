//! Process-wide session token holder.
//!
//! The upstream API authenticates with a single bearer token. The holder
//! owns the current value, persists it to a file so it survives a restart,
//! and broadcasts every change over a `watch` channel so dependent parts
//! (the catalog client, gated views) always observe the most recent
//! `set`/`clear`. Last write wins; a token is trusted until explicitly
//! cleared - the upstream's own rejection is the only freshness check.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::watch;

/// Errors reading or writing the persisted session token.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Holder of the single bearer credential.
///
/// Cheaply cloneable; all clones share one value and one broadcast channel.
#[derive(Clone)]
pub struct SessionHolder {
    inner: Arc<SessionHolderInner>,
}

struct SessionHolderInner {
    token: watch::Sender<Option<SecretString>>,
    path: PathBuf,
}

impl SessionHolder {
    /// Load the holder, reading a previously persisted token if one exists.
    ///
    /// A missing file means no session - a valid, common state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Read` if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let token = match std::fs::read_to_string(path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(SecretString::from(trimmed.to_string()))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(SessionError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let (sender, _) = watch::channel(token);
        Ok(Self {
            inner: Arc::new(SessionHolderInner {
                token: sender,
                path: path.to_path_buf(),
            }),
        })
    }

    /// The currently held token, if any.
    #[must_use]
    pub fn current(&self) -> Option<SecretString> {
        self.inner.token.borrow().clone()
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.borrow().is_some()
    }

    /// Store a new token, persist it, and notify all observers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Write` if persisting fails; the in-memory
    /// value is not changed in that case.
    pub fn set(&self, token: SecretString) -> Result<(), SessionError> {
        std::fs::write(&self.inner.path, token.expose_secret()).map_err(|source| {
            SessionError::Write {
                path: self.inner.path.clone(),
                source,
            }
        })?;
        self.inner.token.send_replace(Some(token));
        Ok(())
    }

    /// Drop the held token, remove the persisted copy, and notify observers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Write` if the persisted copy cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.inner.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(SessionError::Write {
                    path: self.inner.path.clone(),
                    source,
                });
            }
        }
        self.inner.token.send_replace(None);
        Ok(())
    }

    /// Subscribe to token changes.
    ///
    /// The receiver always reflects the latest `set`/`clear`, so independent
    /// observers (e.g. the catalog client) never hold a stale credential.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<SecretString>> {
        self.inner.token.subscribe()
    }
}
