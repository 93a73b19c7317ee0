//! Orchestrator configuration

use crate::core::health::{DEFAULT_COOLDOWN, DEFAULT_DISABLE_THRESHOLD, HealthPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_disable_threshold() -> u32 {
    DEFAULT_DISABLE_THRESHOLD
}

fn default_cooldown_secs() -> u64 {
    DEFAULT_COOLDOWN.as_secs()
}

fn default_provider_timeout_secs() -> u64 {
    10
}

/// Reply sent when every provider failed or none is configured
pub fn default_fallback_message() -> String {
    "抱歉，AI 服務目前無法使用。請稍後再試或聯絡管理員。".to_string()
}

/// Reply sent for empty or whitespace-only messages
pub fn default_apology_message() -> String {
    "抱歉，我沒有收到任何文字內容。請再輸入一次你的問題。".to_string()
}

/// Persona prompt sent to every provider
pub fn default_system_prompt() -> String {
    "你是一個友善且樂於助人的聊天機器人。請用繁體中文回應用戶。\n\
     特點：\n\
     - 友善、有禮貌\n\
     - 提供有用的資訊和建議\n\
     - 保持對話自然流暢\n\
     - 如果不確定答案，會誠實告知\n\
     - 避免提供有害或不當的內容"
        .to_string()
}

/// Failover and reply policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Consecutive failures before a provider is benched
    #[serde(default = "default_disable_threshold")]
    pub disable_threshold: u32,
    /// Seconds a benched provider waits before its probe attempt
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Time budget for one provider call, in seconds
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
    /// Fixed reply when no provider succeeds
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
    /// Fixed reply for empty input
    #[serde(default = "default_apology_message")]
    pub apology_message: String,
    /// Persona prompt forwarded to the providers
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            disable_threshold: default_disable_threshold(),
            cooldown_secs: default_cooldown_secs(),
            provider_timeout_secs: default_provider_timeout_secs(),
            fallback_message: default_fallback_message(),
            apology_message: default_apology_message(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl OrchestratorConfig {
    pub fn health_policy(&self) -> HealthPolicy {
        HealthPolicy {
            disable_threshold: self.disable_threshold,
            cooldown: Duration::from_secs(self.cooldown_secs),
        }
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}
