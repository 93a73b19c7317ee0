//! Shared test utilities
//!
//! Scripted providers stand in for vendor adapters so orchestrator and
//! webhook tests control exactly which provider answers.

#![allow(dead_code)]


use line_relay::config::Config;

/// Config carrying LINE credentials that point the reply client at `api_base`
pub fn messaging_config(api_base: &str) -> Config {
    let mut config = Config::default();
    config.messaging.channel_secret = Some("channel-secret".into());
    config.messaging.channel_access_token = Some("channel-token".into());
    config.messaging.api_base = api_base.to_string();
    config
}

/// Webhook body carrying one text message per entry
pub fn text_delivery(messages: &[(&str, &str)]) -> String {
    let events: Vec<serde_json::Value> = messages
        .iter()
        .map(|(reply_token, text)| {
            serde_json::json!({
                "type": "message",
                "replyToken": reply_token,
                "timestamp": 1_700_000_000_000_i64,
                "source": {"type": "user", "userId": "U4af4980629"},
                "message": {"type": "text", "id": "1", "text": text}
            })
        })
        .collect();
    serde_json::json!({"destination": "Udeadbeef", "events": events}).to_string()
}
