// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT verification and decoding.
//!
//! Login service tokens are HMAC-signed with a shared secret. Verification
//! checks the signature, then `exp` and `nbf` when the token carries them.

use std::collections::HashSet;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use super::TokenRejection;

/// Decoded token payload, claim name to value.
pub type Claims = Map<String, Value>;

/// Algorithms accepted for the shared secret.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Verify a token's signature and time claims against `secret`.
pub fn verify(token: &str, secret: &[u8], leeway: u64) -> Result<(), TokenRejection> {
    let key = DecodingKey::from_secret(secret);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = HMAC_ALGORITHMS.to_vec();
    validation.required_spec_claims = HashSet::new();
    validation.validate_nbf = true;
    validation.validate_aud = false;
    validation.leeway = leeway;
    // Expired from the `exp` second onwards, not one second after it.
    validation.reject_tokens_expiring_in_less_than = 1;

    decode::<Claims>(token, &key, &validation)
        .map(|_| ())
        .map_err(|e| {
            let rejection = TokenRejection::from_kind(e.kind());
            tracing::warn!(error = %e, reason = %rejection, "Invalid token");
            rejection
        })
}

/// Decode a token's payload without verifying signature or expiry.
///
/// The token must be `header.payload` or `header.payload.signature` with a
/// JSON object header; the header's algorithm is not inspected. Returns
/// `None` when the token is not well-formed enough to parse or its payload
/// is not a JSON object. Never use this in place of validation: the claims
/// are not authenticated.
pub fn decode_jwt(token: &str) -> Option<Claims> {
    let segments: Vec<&str> = token.split('.').collect();
    if !(2..=3).contains(&segments.len()) {
        return None;
    }

    decode_segment::<Map<String, Value>>(segments[0])?;
    decode_segment::<Claims>(segments[1])
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Option<T> {
    if segment.is_empty() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}
