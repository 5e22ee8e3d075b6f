//! Configuration loading from disk.
//!
//! The operator's JSON document is laid over the compiled-in defaults field by
//! field: objects are merged recursively, while scalars and arrays that are
//! present replace the default. `null` counts as absent. The merged tree is
//! then deserialized into the typed model, so shape and range mistakes show up
//! as parse errors.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::schema::Configuration;
use crate::crypto::integrity::sha256_hex;
use crate::paths::{expand_path, PathError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} unreadable: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse failed: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("config invalid: {0}")]
    Validation(#[from] ValidationError),
    #[error("config path invalid: {0}")]
    Path(#[from] PathError),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("HMAC secret not found, please fill the 'secret' configuration field")]
    MissingSecret,
    #[error("'port' must be between 1 and 65535")]
    InvalidPort,
    #[error("'token_duration' must be greater than zero")]
    InvalidTokenDuration,
}

impl ValidationError {
    /// Name of the offending document field.
    pub fn field(self) -> &'static str {
        match self {
            ValidationError::MissingSecret => "secret",
            ValidationError::InvalidPort => "port",
            ValidationError::InvalidTokenDuration => "token_duration",
        }
    }
}

/// Loads, merges and validates the configuration at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<Configuration, ConfigError> {
    load_config_with_fingerprint(path).map(|(config, _)| config)
}

/// Like [`load_config`], also returning the SHA-256 fingerprint of the raw
/// document.
pub fn load_config_with_fingerprint(path: impl AsRef<Path>) -> Result<(Configuration, String), ConfigError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading configuration");

    let raw = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let fingerprint = sha256_hex(&raw);

    let mut config = overlay(&Configuration::default(), &raw)?;
    validate(&config)?;
    // Expanded even when backups are disabled; a bad folder still fails the load.
    config.backups.folder = expand_path(&config.backups.folder)?;

    info!(path = %path.display(), fingerprint = %fingerprint, "configuration loaded");
    Ok((config, fingerprint))
}

/// Lays the JSON `document` over `base` and returns the merged configuration.
pub fn overlay(base: &Configuration, document: &[u8]) -> Result<Configuration, ConfigError> {
    let patch: Value = serde_json::from_slice(document)?;
    let mut merged = serde_json::to_value(base)?;
    merge(&mut merged, patch, "");
    Ok(serde_json::from_value(merged)?)
}

fn merge(base: &mut Value, patch: Value, at: &str) {
    match (base, patch) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                let field = if at.is_empty() { key.clone() } else { format!("{at}.{key}") };
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value, &field),
                    None => debug!(field = %field, "ignoring unknown configuration field"),
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Checks the fields that have no safe default.
pub fn validate(config: &Configuration) -> Result<(), ValidationError> {
    if config.secret.is_empty() {
        return Err(ValidationError::MissingSecret);
    }
    if config.port == 0 {
        return Err(ValidationError::InvalidPort);
    }
    if config.token_duration == 0 {
        return Err(ValidationError::InvalidTokenDuration);
    }
    Ok(())
}

impl Configuration {
    /// Load configuration from disk on top of the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_config(path)
    }
}
