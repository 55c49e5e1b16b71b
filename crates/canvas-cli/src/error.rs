//! CLI error types with miette diagnostics.
//!
//! Maps `canvas_api::Error` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use canvas_api::Error as ApiError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("No Canvas domain configured")]
    #[diagnostic(
        code(canvas::no_domain),
        help(
            "Pass --domain, set CANVAS_DOMAIN, or add `domain` to the config file.\n\
             Expected at: {path}"
        )
    )]
    NoDomain { path: String },

    #[error("No API token configured")]
    #[diagnostic(
        code(canvas::no_token),
        help(
            "Pass --token, set CANVAS_TOKEN, or add `token` to the config file.\n\
             Generate one under Account > Settings > New Access Token.\n\
             Expected at: {path}"
        )
    )]
    NoToken { path: String },

    #[error(transparent)]
    #[diagnostic(code(canvas::config))]
    Config(Box<figment::Error>),

    // ── Authentication ───────────────────────────────────────────────

    #[error("Canvas rejected the API token")]
    #[diagnostic(
        code(canvas::auth_failed),
        help("Verify the token is current; revoked or expired tokens return HTTP 401.")
    )]
    AuthFailed,

    // ── Resources ────────────────────────────────────────────────────

    #[error("Resource not found")]
    #[diagnostic(
        code(canvas::not_found),
        help("Check the user id and that your token is allowed to see it.")
    )]
    NotFound,

    // ── API ──────────────────────────────────────────────────────────

    #[error("Canvas API returned HTTP {status}")]
    #[diagnostic(code(canvas::api_error))]
    Api { status: u16 },

    #[error("Malformed response from the Canvas API: {message}")]
    #[diagnostic(code(canvas::bad_response))]
    BadResponse { message: String },

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the Canvas API")]
    #[diagnostic(
        code(canvas::connection_failed),
        help("Check the domain spelling and your network connection.")
    )]
    Connection {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(canvas::validation))]
    Validation { field: String, reason: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(canvas::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoDomain { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::NoToken { .. } | Self::AuthFailed => exit_code::AUTH,
            Self::NotFound => exit_code::NOT_FOUND,
            Self::Connection { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── canvas_api::Error → CliError mapping ─────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 401 } => Self::AuthFailed,
            ApiError::Status { status: 404 } => Self::NotFound,
            ApiError::Status { status } => Self::Api { status },

            ApiError::Transport(e) => Self::Connection {
                source: Box::new(e),
            },

            ApiError::InvalidOption { field, reason } => Self::Validation {
                field: field.into(),
                reason,
            },

            ApiError::InvalidToken { message } => Self::Validation {
                field: "token".into(),
                reason: message,
            },

            ApiError::InvalidUrl(e) => Self::Validation {
                field: "domain".into(),
                reason: e.to_string(),
            },

            err @ (ApiError::Deserialization { .. } | ApiError::Stream { .. }) => {
                Self::BadResponse {
                    message: err.to_string(),
                }
            }
        }
    }
}
