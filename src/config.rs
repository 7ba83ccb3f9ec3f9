// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Configuration Lookup
//!
//! Every value the client needs is looked up through a [`ConfigProvider`]
//! injected at construction time, and re-resolved on each call. Values are
//! resolved through an ordered chain of keys: the service-specific key is
//! tried first, then the shared fallback.
//!
//! ## Keys
//!
//! | Service key | Fallback | Required |
//! |-------------|----------|----------|
//! | `loginservice.protocol` | `tooltwist.protocol` | yes |
//! | `loginservice.host` | `tooltwist.host` | yes |
//! | `loginservice.port` | `tooltwist.port` | yes (integer) |
//! | `loginservice.version` | literal `2.0` | no |
//! | `loginservice.apikey` | `tooltwist.apikey` | yes |
//! | `loginservice.returnURL` | - | yes |
//! | `loginservice.secret` | `tooltwist.secret` | yes |
//!
//! With [`EnvConfig`] the keys map to environment variables, e.g.
//! `loginservice.returnURL` is read from `LOGINSERVICE_RETURNURL`.

use std::{collections::HashMap, fs, path::Path};

use serde_json::Value;

/// Configuration key names.
pub mod keys {
    pub const PROTOCOL: &[&str] = &["loginservice.protocol", "tooltwist.protocol"];
    pub const HOST: &[&str] = &["loginservice.host", "tooltwist.host"];
    pub const PORT: &[&str] = &["loginservice.port", "tooltwist.port"];
    pub const VERSION: &[&str] = &["loginservice.version"];
    pub const APIKEY: &[&str] = &["loginservice.apikey", "tooltwist.apikey"];
    pub const RETURN_URL: &[&str] = &["loginservice.returnURL"];
    pub const SECRET: &[&str] = &["loginservice.secret", "tooltwist.secret"];

    /// API version used when `loginservice.version` is not set.
    pub const DEFAULT_VERSION: &str = "2.0";
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing mandatory configuration value (tried {keys})")]
    Missing { keys: String },

    #[error("Configuration value {key} is not a valid integer: {value}")]
    InvalidInteger { key: String, value: String },

    #[error("Login service endpoint is not a valid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load configuration file: {0}")]
    Load(String),
}

/// Whether a lookup chain must produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mandatory,
    Optional,
}

/// Source of configuration values.
pub trait ConfigProvider: Send + Sync {
    /// Look up a string value. Blank values are reported as absent.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Look up an integer value.
    fn get_int(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.get_string(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::InvalidInteger {
                    key: key.to_string(),
                    value: raw,
                }),
            None => Ok(None),
        }
    }
}

/// Resolve a string through a fallback chain.
pub fn string(
    provider: &dyn ConfigProvider,
    keys: &[&str],
    mode: Mode,
) -> Result<Option<String>, ConfigError> {
    let value = keys.iter().find_map(|key| provider.get_string(key));
    require(value, keys, mode)
}

/// Resolve a string through a fallback chain, ending in a literal default.
pub fn string_or(provider: &dyn ConfigProvider, keys: &[&str], default: &str) -> String {
    keys.iter()
        .find_map(|key| provider.get_string(key))
        .unwrap_or_else(|| default.to_string())
}

/// Resolve an integer through a fallback chain.
///
/// A key holding a non-integer value is an error rather than a miss.
pub fn int(
    provider: &dyn ConfigProvider,
    keys: &[&str],
    mode: Mode,
) -> Result<Option<i64>, ConfigError> {
    for key in keys {
        if let Some(value) = provider.get_int(key)? {
            return Ok(Some(value));
        }
    }
    require(None, keys, mode)
}

/// Resolve a mandatory string; absence is an error.
pub fn required_string(provider: &dyn ConfigProvider, keys: &[&str]) -> Result<String, ConfigError> {
    string(provider, keys, Mode::Mandatory)?.ok_or_else(|| missing(keys))
}

fn require<T>(value: Option<T>, keys: &[&str], mode: Mode) -> Result<Option<T>, ConfigError> {
    match (value, mode) {
        (None, Mode::Mandatory) => Err(missing(keys)),
        (value, _) => Ok(value),
    }
}

fn missing(keys: &[&str]) -> ConfigError {
    ConfigError::Missing {
        keys: keys.join(", "),
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// In-memory configuration, typically loaded from a JSON document.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: HashMap<String, String>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.values.insert(key.into(), value.to_string());
        self
    }

    /// Build from a JSON object, flattening nested objects into dotted keys.
    ///
    /// `{"loginservice": {"port": 443}}` yields `loginservice.port = "443"`.
    /// Arrays and nulls are skipped.
    pub fn from_json(document: &Value) -> Self {
        let mut config = Self::new();
        flatten_into(&mut config.values, "", document);
        config
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("failed to read {}: {e}", path.display())))?;
        let document: Value = serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Load(format!("invalid JSON in {}: {e}", path.display())))?;
        if !document.is_object() {
            return Err(ConfigError::Load(format!(
                "{} must contain a JSON object",
                path.display()
            )));
        }
        Ok(Self::from_json(&document))
    }
}

fn flatten_into(values: &mut HashMap<String, String>, prefix: &str, node: &Value) {
    let scalar = match node {
        Value::Object(map) => {
            for (name, child) in map {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                flatten_into(values, &key, child);
            }
            return;
        }
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) => return,
    };
    if !prefix.is_empty() {
        values.insert(prefix.to_string(), scalar);
    }
}

impl ConfigProvider for MapConfig {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(|v| non_blank(v))
    }
}

/// Configuration read from environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl EnvConfig {
    /// Environment variable name for a configuration key.
    pub fn var_name(key: &str) -> String {
        key.replace('.', "_").to_ascii_uppercase()
    }
}

impl ConfigProvider for EnvConfig {
    fn get_string(&self, key: &str) -> Option<String> {
        std::env::var(Self::var_name(key))
            .ok()
            .and_then(|v| non_blank(&v))
    }
}
