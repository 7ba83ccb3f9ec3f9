// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! LoginService Client - delegate identity to a remote login service
//!
//! This crate lets a service hand user registration and transactional email
//! to an external login provider over HTTP, and verify the JWTs it issues.
//!
//! ## Modules
//!
//! - `auth` - Bearer extraction, JWT verification and decoding, Axum extractors
//! - `client` - `LoginServiceClient` (registration, email, token checks)
//! - `config` - Configuration providers and fallback-chain lookup
//! - `endpoint` - Login service base URL resolution
//! - `telemetry` - Log subscriber setup

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod telemetry;

pub use auth::{decode_jwt, jwt_from_authorization, Authenticated, BearerToken, Claims, TokenRejection};
pub use client::LoginServiceClient;
pub use config::{ConfigError, ConfigProvider, EnvConfig, MapConfig, Mode};
pub use endpoint::Endpoint;
pub use error::LoginServiceError;
pub use models::{RegisterUserRequest, Registration, SendEmailRequest};
