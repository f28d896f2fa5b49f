//! # Session identity
//!
//! [`UserInfo`] is the only piece of identity the front end ever holds. It is produced by
//! the `get_current_user` and `login` server functions from whatever the external API
//! reports, and crosses the server/client boundary as plain JSON.
//!
//! The external API has shipped two shapes for the `user` field over time: a bare email
//! string (`{"user": "a@b.co"}`) and an object (`{"user": {"id": 3, "email": "a@b.co"}}`).
//! [`UserPayload`] accepts both and normalises them into a [`UserInfo`].

use serde::{Deserialize, Serialize};

/// User identity safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: Option<String>,
    pub email: String,
}

impl UserInfo {
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
        }
    }

    /// The part of the email before `@`, used for greetings.
    pub fn handle(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// The `user` field as sent by the external API.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserPayload {
    Email(String),
    Record {
        #[serde(default)]
        id: Option<serde_json::Value>,
        email: String,
    },
}

impl From<UserPayload> for UserInfo {
    fn from(payload: UserPayload) -> Self {
        match payload {
            UserPayload::Email(email) => UserInfo::from_email(email),
            UserPayload::Record { id, email } => UserInfo {
                id: id.and_then(|v| match v {
                    serde_json::Value::String(s) => Some(s),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                }),
                email,
            },
        }
    }
}
