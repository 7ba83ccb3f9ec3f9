// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer token handling for tokens issued by the login service.
//!
//! ## Auth Flow
//!
//! 1. The user signs in with the login service and receives a JWT
//! 2. The caller sends `Authorization: Bearer <JWT>`
//! 3. This service:
//!    - Extracts the token from the header ([`jwt_from_authorization`])
//!    - Verifies signature and expiry against the shared secret
//!    - Decodes the claims for the handler
//!
//! ## Security
//!
//! - Tokens are HMAC-signed with the shared `loginservice.secret`
//! - [`decode_jwt`] never checks authenticity; only use it on tokens that
//!   have already been validated

pub mod bearer;
pub mod error;
pub mod extractor;
pub mod jwt;

pub use bearer::jwt_from_authorization;
pub use error::TokenRejection;
pub use extractor::{Authenticated, BearerToken};
pub use jwt::{decode_jwt, Claims};
