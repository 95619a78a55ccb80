//! Admin panel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults point the panel at the public
//! Fake Store API on localhost port 3000.
//!
//! - `FAKESTORE_API_URL` - Upstream API origin (default: `https://fakestoreapi.com`)
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3000)
//! - `FAKESTORE_SESSION_FILE` - Path of the persisted session token
//!   (default: `.fakestore-session`)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Upstream Fake Store API origin
    pub api_base_url: Url,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// File the session token is persisted to across restarts
    pub session_file: PathBuf,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("FAKESTORE_API_URL", "https://fakestoreapi.com")
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("FAKESTORE_API_URL".to_string(), e.to_string())
            })?;
        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let session_file =
            PathBuf::from(get_env_or_default("FAKESTORE_SESSION_FILE", ".fakestore-session"));

        Ok(Self {
            api_base_url,
            host,
            port,
            session_file,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            api_base_url: "https://fakestoreapi.com".parse().unwrap(),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            session_file: PathBuf::from(".fakestore-session"),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("FAKESTORE_ADMIN_DOES_NOT_EXIST", "fallback"),
            "fallback"
        );
    }
}
