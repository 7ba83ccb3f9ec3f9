// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer credential extraction.

/// Authorization scheme accepted by [`jwt_from_authorization`].
const BEARER_SCHEME: &str = "Bearer";

/// Get the access token from an `Authorization` header value.
///
/// The header must be exactly `<scheme> <token>` separated by a single
/// space, with the scheme matching `Bearer` case-insensitively. Any other
/// shape yields an empty string, which callers treat as "no credential".
pub fn jwt_from_authorization(authorization: &str) -> String {
    let mut parts = authorization.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(credentials), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            credentials.to_string()
        }
        _ => String::new(),
    }
}
