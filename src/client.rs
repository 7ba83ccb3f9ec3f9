// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login service client.
//!
//! Configuration is read from the injected [`ConfigProvider`] on every call,
//! so changes to the underlying source take effect without rebuilding the
//! client. Each HTTP operation makes exactly one request with no retry.

use std::{sync::Arc, time::Duration};

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::auth::{self, jwt, Claims};
use crate::config::{self, keys, ConfigProvider};
use crate::endpoint::Endpoint;
use crate::error::LoginServiceError;
use crate::models::{RegisterUserRequest, Registration, SendEmailRequest};

/// Per-request timeout unless overridden with [`LoginServiceClient::with_timeout`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct LoginServiceClient {
    config: Arc<dyn ConfigProvider>,
    http: Client,
    timeout: Duration,
    leeway: u64,
}

impl std::fmt::Debug for LoginServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginServiceClient")
            .field("timeout", &self.timeout)
            .field("leeway", &self.leeway)
            .finish_non_exhaustive()
    }
}

impl LoginServiceClient {
    pub fn new(config: impl ConfigProvider + 'static) -> Result<Self, LoginServiceError> {
        let http = Client::builder()
            .build()
            .map_err(|e| LoginServiceError::HttpClient(e.to_string()))?;
        Ok(Self::with_http_client(config, http))
    }

    /// Use an existing HTTP client (shared connection pool, custom TLS).
    pub fn with_http_client(config: impl ConfigProvider + 'static, http: Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            leeway: 0,
        }
    }

    /// Set the per-request timeout for registration and email calls.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the clock skew tolerance (seconds) applied to `exp` and `nbf`.
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    /// Resolve the login service endpoint from current configuration.
    pub fn endpoint(&self) -> Result<Endpoint, LoginServiceError> {
        Ok(Endpoint::resolve(self.config.as_ref())?)
    }

    /// Get the access token from an `Authorization` header value.
    ///
    /// See [`auth::jwt_from_authorization`].
    pub fn jwt_from_authorization(&self, authorization: &str) -> String {
        auth::jwt_from_authorization(authorization)
    }

    /// Register a user with the login service.
    ///
    /// Sends `PUT {endpoint}/email/register`; the user is sent to
    /// `loginservice.returnURL` after confirming their email. Anything other
    /// than a 200 response is reported as [`LoginServiceError::Upstream`].
    pub async fn register_user(
        &self,
        user: RegisterUserRequest<'_>,
    ) -> Result<Registration, LoginServiceError> {
        let endpoint = self.endpoint()?;
        let return_url = config::required_string(self.config.as_ref(), keys::RETURN_URL)?;
        let url = endpoint.url("email/register")?;

        let body = self
            .call(Method::PUT, url, &user.payload(&return_url), "register", user.email)
            .await?;

        Ok(Registration {
            response: serde_json::from_str(&body).ok(),
        })
    }

    /// Send a templated email through the login service.
    ///
    /// Sends `POST {endpoint}/sendmail`. Anything other than a 200 response
    /// is reported as [`LoginServiceError::Upstream`].
    pub async fn send_email(&self, email: SendEmailRequest<'_>) -> Result<(), LoginServiceError> {
        let endpoint = self.endpoint()?;
        let url = endpoint.url("sendmail")?;

        self.call(Method::POST, url, &email.payload(), "sendEmail", email.to_email)
            .await?;
        Ok(())
    }

    /// Validate a token issued by the login service.
    ///
    /// Checks the signature against `loginservice.secret` (falling back to
    /// `tooltwist.secret`) and the token's expiry.
    pub fn validate_jwt(&self, token: &str) -> Result<(), LoginServiceError> {
        let secret = config::required_string(self.config.as_ref(), keys::SECRET)?;
        jwt::verify(token, secret.as_bytes(), self.leeway).map_err(LoginServiceError::Unauthorized)
    }

    /// Decode a token's claims without verifying it.
    ///
    /// See [`auth::decode_jwt`].
    pub fn decode_jwt(&self, token: &str) -> Option<Claims> {
        auth::decode_jwt(token)
    }

    /// Issue one request and return the body of a 200 response.
    async fn call(
        &self,
        method: Method,
        url: url::Url,
        payload: &Value,
        operation: &'static str,
        address: &str,
    ) -> Result<String, LoginServiceError> {
        debug!(%method, path = %url.path(), operation, "Calling login service");

        let response = self
            .http
            .request(method, url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, operation, address, "Login service request failed");
                LoginServiceError::upstream(operation, address)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, operation, address, "Login service rejected request");
            return Err(LoginServiceError::upstream(operation, address));
        }

        response.text().await.map_err(|e| {
            error!(error = %e, operation, address, "Failed to read login service response");
            LoginServiceError::upstream(operation, address)
        })
    }
}
