//! LINE Messaging API client

use crate::config::MessagingConfig;
use crate::utils::error::{RelayError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Longest text LINE accepts in one text message
pub const MAX_MESSAGE_CHARS: usize = 5000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: [TextMessage<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Reply-API client for one channel
#[derive(Clone)]
pub struct LineClient {
    client: Client,
    api_base: String,
    access_token: String,
}

impl LineClient {
    pub fn new(api_base: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    /// Client for the configured channel, if its token is present
    pub fn from_config(config: &MessagingConfig) -> Result<Option<Self>> {
        match config.channel_access_token.as_deref() {
            Some(token) if !token.is_empty() => Ok(Some(Self::new(&config.api_base, token)?)),
            _ => Ok(None),
        }
    }

    /// Send `text` as the reply to one event
    ///
    /// Text over the platform limit is cut to [`MAX_MESSAGE_CHARS`].
    pub async fn reply_message(&self, reply_token: &str, text: &str) -> Result<()> {
        let text = truncate_chars(text, MAX_MESSAGE_CHARS);
        let body = ReplyRequest {
            reply_token,
            messages: [TextMessage { kind: "text", text }],
        };

        let response = self
            .client
            .post(format!("{}/v2/bot/message/reply", self.api_base))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(chars = text.chars().count(), "Reply delivered");
            return Ok(());
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&raw)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(raw);
        Err(RelayError::messaging(format!(
            "Reply API returned {}: {}",
            status.as_u16(),
            message
        )))
    }
}

impl fmt::Debug for LineClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

/// Cut `text` to at most `max` characters on a char boundary
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
