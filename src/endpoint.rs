// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login service endpoint resolution.

use url::Url;

use crate::config::{self, keys, ConfigError, ConfigProvider, Mode};

/// Base address of the login service API:
/// `{protocol}://{host}:{port}/{version}/{apikey}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub version: String,
    pub apikey: String,
}

impl Endpoint {
    /// Resolve the endpoint from configuration.
    pub fn resolve(provider: &dyn ConfigProvider) -> Result<Self, ConfigError> {
        let protocol = config::required_string(provider, keys::PROTOCOL)?;
        let host = config::required_string(provider, keys::HOST)?;
        let port = config::int(provider, keys::PORT, Mode::Mandatory)?.ok_or_else(|| {
            ConfigError::Missing {
                keys: keys::PORT.join(", "),
            }
        })?;
        let port = u16::try_from(port).map_err(|_| ConfigError::InvalidInteger {
            key: keys::PORT.join(", "),
            value: port.to_string(),
        })?;
        let version = config::string_or(provider, keys::VERSION, keys::DEFAULT_VERSION);
        let apikey = config::required_string(provider, keys::APIKEY)?;

        Ok(Self {
            protocol,
            host,
            port,
            version,
            apikey,
        })
    }

    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/{}/{}",
            self.protocol, self.host, self.port, self.version, self.apikey
        )
    }

    /// Full URL of an API path below the base, e.g. `email/register`.
    pub fn url(&self, path: &str) -> Result<Url, ConfigError> {
        let raw = format!("{}/{}", self.base_url(), path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(format!("{raw}: {e}")))
    }
}
