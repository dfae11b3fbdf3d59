// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON message protocol spoken by the hosted web app.
//
//   { "type": "ROUTE_CHANGE", "path": "<string>", "userId": "<string>" }
//   { "type": "LOGIN" }
//
// Unknown fields are ignored and missing string fields read as "". Any
// other `type`, including none at all, parses to `BridgeMessage::Ignored`.

use serde_json::{Map, Value};

use webshell_core::error::{Result, ShellError};

pub const TYPE_ROUTE_CHANGE: &str = "ROUTE_CHANGE";
pub const TYPE_LOGIN: &str = "LOGIN";

/// One decoded message from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    /// The SPA navigated. Carries who (if anyone) is logged in.
    RouteChange { path: String, user_id: String },
    /// Login completed; pre-login history should go.
    Login,
    /// Well-formed, but not a type this shell acts on.
    Ignored { message_type: Option<String> },
}

impl BridgeMessage {
    /// Parse a raw payload. Only a JSON object is accepted.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(obj) = value else {
            return Err(ShellError::MalformedMessage(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        };

        let message_type = opt_string(&obj, "type");
        Ok(match message_type.as_str() {
            TYPE_ROUTE_CHANGE => Self::RouteChange {
                path: opt_string(&obj, "path"),
                user_id: opt_string(&obj, "userId"),
            },
            TYPE_LOGIN => Self::Login,
            "" => Self::Ignored { message_type: None },
            _ => Self::Ignored {
                message_type: Some(message_type),
            },
        })
    }

    /// Short name for logs.
    pub fn kind(&self) -> &str {
        match self {
            Self::RouteChange { .. } => TYPE_ROUTE_CHANGE,
            Self::Login => TYPE_LOGIN,
            Self::Ignored { message_type } => message_type.as_deref().unwrap_or("<none>"),
        }
    }
}

/// Logged in iff a user id is present and the page is not the login page.
pub fn route_is_logged_in(path: &str, user_id: &str, login_path: &str) -> bool {
    !user_id.is_empty() && path != login_path
}

/// Read `key` as a string, coercing scalars; absent or null gives "".
fn opt_string(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
