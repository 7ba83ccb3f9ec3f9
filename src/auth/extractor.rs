// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for login service tokens.
//!
//! Use the `Authenticated` extractor in handlers to require a valid token:
//!
//! ```rust,ignore
//! async fn profile(Authenticated { claims, .. }: Authenticated) -> impl IntoResponse {
//!     Json(claims)
//! }
//! ```
//!
//! The router state must provide a [`LoginServiceClient`] through
//! [`FromRef`]; a `LoginServiceClient` used directly as state works.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{jwt_from_authorization, Claims, TokenRejection};
use crate::client::LoginServiceClient;
use crate::error::LoginServiceError;

/// Bearer token from the `Authorization` header.
///
/// Empty when the header is missing, not valid UTF-8, or not of the form
/// `Bearer <token>`. Never rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(jwt_from_authorization)
            .unwrap_or_default();
        Ok(BearerToken(token))
    }
}

/// A request carrying a validated login service token.
#[derive(Debug, Clone)]
pub struct Authenticated {
    /// The raw bearer token
    pub token: String,
    /// Claims decoded from the token
    pub claims: Claims,
}

impl<S> FromRequestParts<S> for Authenticated
where
    LoginServiceClient: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = LoginServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let client = LoginServiceClient::from_ref(state);

        let Ok(BearerToken(token)) = BearerToken::from_request_parts(parts, state).await;
        client.validate_jwt(&token)?;

        // A token that verified but has no object payload is not usable.
        let claims = client
            .decode_jwt(&token)
            .ok_or(LoginServiceError::Unauthorized(TokenRejection::Malformed))?;

        Ok(Authenticated { token, claims })
    }
}
