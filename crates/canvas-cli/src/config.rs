//! CLI-owned configuration: a TOML file layered under `CANVAS_*`
//! environment variables, with command-line flags taking precedence.
//!
//! The library never sees these types -- it receives a domain and a
//! token.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::cli::GlobalOpts;
use crate::error::CliError;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Institution subdomain.
    pub domain: Option<String>,

    /// API access token (plaintext -- prefer the CANVAS_TOKEN env var).
    pub token: Option<String>,
}

/// Path to the config file (`~/.config/canvas/config.toml` on Linux).
pub fn config_path() -> PathBuf {
    match ProjectDirs::from("", "", "canvas") {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("canvas.toml"),
    }
}

/// Load configuration from the TOML file and `CANVAS_*` env vars.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("CANVAS_"));
    Ok(figment.extract()?)
}

/// Load configuration, falling back to defaults on a malformed file.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|err| {
        tracing::warn!("failed to load config file: {err}");
        Config::default()
    })
}

/// Resolve the domain and token from CLI flags and configuration.
/// Flags (and their env vars, via clap) win over the config file.
pub fn resolve_credentials(global: &GlobalOpts) -> Result<(String, SecretString), CliError> {
    let cfg = load_config_or_default();

    let domain = global
        .domain
        .clone()
        .or(cfg.domain)
        .ok_or_else(|| CliError::NoDomain {
            path: config_path().display().to_string(),
        })?;

    let token = global
        .token
        .clone()
        .or(cfg.token)
        .ok_or_else(|| CliError::NoToken {
            path: config_path().display().to_string(),
        })?;

    Ok((domain, SecretString::from(token)))
}
