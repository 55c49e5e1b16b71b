// Transport configuration for building reqwest::Client instances.
//
// The bearer token travels as a default header on the built client, so
// every request issued through it is authenticated without the endpoint
// code touching credentials.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Transport settings shared by every request a client issues.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` carrying `authorization: Bearer {token}`
    /// as a default header.
    ///
    /// The header value is marked sensitive so it never appears in logs.
    pub fn build_client(&self, token: &SecretString) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::InvalidToken {
                message: e.to_string(),
            })?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("canvas-rs/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}
