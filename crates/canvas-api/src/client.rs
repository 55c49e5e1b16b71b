// Core HTTP client for the Canvas REST API.
//
// Wraps `reqwest::Client` with Canvas-specific URL construction and
// response handling. Endpoint modules (users, activity) are implemented
// as inherent methods via separate files to keep this module focused on
// transport mechanics.

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Async client for a Canvas LMS instance.
///
/// Holds the institution subdomain and an authenticated HTTP client;
/// immutable after construction. All accessors issue single-shot GET
/// requests under `/api/v1/` and decode the JSON response.
pub struct CanvasClient {
    http: reqwest::Client,
    domain: String,
    root: Url,
}

impl CanvasClient {
    /// Create a client for `https://{domain}.instructure.com` with the
    /// given access token.
    ///
    /// Neither the domain nor the token is validated against the API;
    /// a bad token surfaces as HTTP 401 on the first request.
    pub fn new(domain: impl Into<String>, token: &SecretString) -> Result<Self, Error> {
        Self::with_transport(domain, token, &TransportConfig::default())
    }

    /// Create a client with explicit transport settings.
    pub fn with_transport(
        domain: impl Into<String>,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let domain = domain.into();
        let http = transport.build_client(token)?;
        let root = Url::parse(&format!("https://{domain}.instructure.com/"))?;
        Ok(Self { http, domain, root })
    }

    /// Wrap a pre-built `reqwest::Client` and point it at an arbitrary
    /// root URL (caller manages auth headers).
    ///
    /// Used by tests to target a mock server instead of Instructure.
    pub fn from_reqwest(domain: impl Into<String>, root: Url, http: reqwest::Client) -> Self {
        Self {
            http,
            domain: domain.into(),
            root,
        }
    }

    /// The institution subdomain this client was built for.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The canonical base URL for this domain:
    /// `https://{domain}.instructure.com`.
    pub fn base_url(&self) -> String {
        format!("https://{}.instructure.com", self.domain)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an endpoint path (e.g. `"users/self/activity_stream"`) onto
    /// the API root.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.root.join(&format!("api/v1/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON response body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    /// Send a GET request with query parameters and decode the response.
    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Verify HTTP 200 and decode the body; the body is always fully
    /// consumed here regardless of decode outcome.
    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = truncate_on_char_boundary(&body, 200);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

/// Truncate to at most `max` bytes without splitting a multibyte
/// character.
fn truncate_on_char_boundary(text: &str, max: usize) -> &str {
    let mut end = text.len().min(max);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
