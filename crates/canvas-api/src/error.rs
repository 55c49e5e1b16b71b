use thiserror::Error;

/// Top-level error type for the `canvas-api` crate.
///
/// Covers every failure mode: request construction, transport, non-200
/// responses, JSON decoding, query-option validation, and per-item
/// activity-stream classification. `canvas-cli` maps these into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The supplied access token is not a valid header value.
    #[error("Invalid access token: {message}")]
    InvalidToken { message: String },

    // ── API ─────────────────────────────────────────────────────────
    /// Non-200 HTTP response from the Canvas API.
    #[error("Canvas API returned HTTP {status}")]
    Status { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// An activity-stream item matched a known `type` discriminator but
    /// one of its fields had an unexpected shape. `field` is the path to
    /// the offending field (`.` when the item itself is malformed).
    #[error("Malformed {item_type} stream item at {field}: {message}")]
    Stream {
        item_type: String,
        field: String,
        message: String,
    },

    // ── Options ─────────────────────────────────────────────────────
    /// A query option was given a value outside its allowed set.
    #[error("Invalid value for {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

impl Error {
    /// The HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Transport(e) => e.status().map(|code| code.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if this error indicates the token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
