//! LINE webhook payload
//!
//! Only the parts the relay acts on are modeled; every other event or
//! message type deserializes into an `Other` variant and is skipped.

use serde::Deserialize;

/// Body of one webhook delivery
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    Message(MessageEvent),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub message: EventMessage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventMessage {
    Text { id: String, text: String },
    #[serde(other)]
    Other,
}

/// A text message the relay should answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundText {
    pub reply_token: String,
    pub text: String,
    pub user_id: Option<String>,
}

impl WebhookPayload {
    /// Text messages that carry a reply token, in delivery order
    pub fn text_messages(&self) -> Vec<InboundText> {
        self.events
            .iter()
            .filter_map(|event| match event {
                WebhookEvent::Message(MessageEvent {
                    reply_token: Some(reply_token),
                    source,
                    message: EventMessage::Text { text, .. },
                    ..
                }) => Some(InboundText {
                    reply_token: reply_token.clone(),
                    text: text.clone(),
                    user_id: source.as_ref().and_then(|s| s.user_id.clone()),
                }),
                _ => None,
            })
            .collect()
    }
}
