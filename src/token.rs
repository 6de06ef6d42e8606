use serde::{Deserialize, Serialize};
use std::fmt;

/// Access token sent as `Authorization: Bearer <token>`.
///
/// Works for personal access tokens and OAuth access tokens alike.
#[derive(Clone, Serialize, Deserialize)]
pub struct Token {
    /// Access token for API requests
    pub access_token: String,

    /// Token type (usually "Bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    /// Create a new bearer Token
    pub fn new(access_token: impl Into<String>) -> Self {
        Token {
            access_token: access_token.into(),
            token_type: default_token_type(),
        }
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

// Keep the secret out of debug logs
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}
