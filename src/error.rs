// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::TokenRejection;
use crate::config::ConfigError;

/// Errors returned by [`crate::LoginServiceClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum LoginServiceError {
    /// A mandatory configuration value could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The login service call failed or did not return 200
    #[error("(LoginService.io) Failed to {operation} {target}.")]
    Upstream {
        operation: &'static str,
        target: String,
    },

    /// Token verification failed
    #[error("{0}")]
    Unauthorized(TokenRejection),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: String,
}

impl LoginServiceError {
    pub(crate) fn upstream(operation: &'static str, target: impl Into<String>) -> Self {
        Self::Upstream {
            operation,
            target: target.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LoginServiceError::Config(_) => "configuration_error",
            LoginServiceError::Upstream { .. } => "internal_error",
            LoginServiceError::Unauthorized(reason) => reason.error_code(),
            LoginServiceError::HttpClient(_) => "http_client_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            LoginServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LoginServiceError::Config(_)
            | LoginServiceError::Upstream { .. }
            | LoginServiceError::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LoginServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
