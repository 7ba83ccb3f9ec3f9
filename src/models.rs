// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request and response shapes for the login service API.

use serde_json::{json, Map, Value};

/// A user to register with the login service.
pub struct RegisterUserRequest<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

impl RegisterUserRequest<'_> {
    /// Body for `PUT {endpoint}/email/register`. The username mirrors the email.
    pub(crate) fn payload(&self, return_url: &str) -> Value {
        json!({
            "email": self.email,
            "username": self.email,
            "first_name": self.first_name,
            "last_name": self.last_name,
            "resume": return_url,
        })
    }
}

/// A templated email to send through the login service.
pub struct SendEmailRequest<'a> {
    pub template: &'a str,
    pub params: &'a Map<String, Value>,
    pub to_email: &'a str,
    pub from_email: &'a str,
    pub from_name: &'a str,
    pub subject: &'a str,
}

impl SendEmailRequest<'_> {
    /// Body for `POST {endpoint}/sendmail`.
    pub(crate) fn payload(&self) -> Value {
        json!({
            "template": self.template,
            "params": self.params,
            "to_email": self.to_email,
            "from_email": self.from_email,
            "from_name": self.from_name,
            "subject": self.subject,
        })
    }
}

/// Outcome of a successful registration.
///
/// Holds the provider's response body when it was JSON. The login service
/// does not document a response shape, so nothing beyond [`Self::user_id`]
/// is interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub response: Option<Value>,
}

impl Registration {
    /// Identifier assigned by the login service, if the response carried one.
    pub fn user_id(&self) -> Option<&str> {
        let response = self.response.as_ref()?;
        response
            .pointer("/id")
            .and_then(Value::as_str)
            .or_else(|| response.pointer("/user_id").and_then(Value::as_str))
            .or_else(|| response.pointer("/user/id").and_then(Value::as_str))
    }
}
