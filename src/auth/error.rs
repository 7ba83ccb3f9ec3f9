// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token rejection reasons.

use jsonwebtoken::errors::ErrorKind;

/// Why a token failed verification.
///
/// Each reason maps to a fixed message returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Signature is valid but the token's expiry has passed
    Expired,
    /// Token is malformed, unparseable, or its signature does not verify
    Malformed,
    /// Any other verification failure
    Other,
}

impl TokenRejection {
    /// Classify a verification error reported by `jsonwebtoken`.
    pub fn from_kind(kind: &ErrorKind) -> Self {
        match kind {
            ErrorKind::ExpiredSignature => TokenRejection::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm
            | ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidSubject
            | ErrorKind::InvalidClaimFormat(_)
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenRejection::Malformed,
            _ => TokenRejection::Other,
        }
    }

    /// Message shown to the caller.
    pub fn message(&self) -> &'static str {
        match self {
            TokenRejection::Expired => "Authorization token has expired",
            TokenRejection::Malformed => "Invalid JWT",
            TokenRejection::Other => "Authorization token is invalid",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TokenRejection::Expired => "token_expired",
            TokenRejection::Malformed => "invalid_jwt",
            TokenRejection::Other => "invalid_token",
        }
    }
}

impl std::fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
