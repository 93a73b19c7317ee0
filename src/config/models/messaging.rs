//! Messaging platform configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default LINE Messaging API base URL
pub fn default_line_api_base() -> String {
    "https://api.line.me".to_string()
}

/// LINE channel credentials
#[derive(Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Channel access token used for the reply API
    #[serde(default)]
    pub channel_access_token: Option<String>,
    /// Channel secret used to verify webhook signatures
    #[serde(default)]
    pub channel_secret: Option<String>,
    /// Messaging API base URL
    #[serde(default = "default_line_api_base")]
    pub api_base: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            channel_access_token: None,
            channel_secret: None,
            api_base: default_line_api_base(),
        }
    }
}

impl MessagingConfig {
    /// Both the token and the secret are present
    pub fn is_configured(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.channel_access_token) && present(&self.channel_secret)
    }
}

impl fmt::Debug for MessagingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagingConfig")
            .field("channel_access_token", &redact(&self.channel_access_token))
            .field("channel_secret", &redact(&self.channel_secret))
            .field("api_base", &self.api_base)
            .finish()
    }
}
