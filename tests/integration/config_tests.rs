//! Configuration integration tests
//!
//! A YAML file plus environment overrides should produce the provider chain
//! the orchestrator actually runs with.

use line_relay::config::{Config, ProviderKind};
use line_relay::{Orchestrator, ProviderId};
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const CONFIG_YAML: &str = r#"
server:
  host: 127.0.0.1
  port: 8081
orchestrator:
  disable_threshold: 2
  cooldown_secs: 60
  provider_timeout_secs: 4
  fallback_message: "Try again later."
providers:
  - name: local
    kind: ollama
    base_url: http://gpu-box:11434
    model: mistral
    timeout_secs: 30
  - name: gemini
    kind: gemini
    api_key: gm-test
  - name: openai
    kind: openai
"#;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_yaml_order_becomes_attempt_order() {
    let file = write_config(CONFIG_YAML);
    let config = Config::from_file(file.path()).await.unwrap();

    assert_eq!(config.server.address(), "127.0.0.1:8081");
    assert_eq!(config.orchestrator.provider_timeout(), Duration::from_secs(4));
    assert_eq!(config.providers[0].kind, ProviderKind::Ollama);
    assert_eq!(config.providers[0].timeout(), Some(Duration::from_secs(30)));

    let orchestrator = Orchestrator::from_config(&config).unwrap();

    // openai has no key and stays out of the rotation
    assert_eq!(
        orchestrator.health().ordered_providers(),
        [ProviderId::from("local"), ProviderId::from("gemini")]
    );
    assert!(!orchestrator.registry().contains(&ProviderId::from("openai")));
    assert_eq!(orchestrator.health().policy().disable_threshold, 2);
    assert_eq!(orchestrator.health().policy().cooldown, Duration::from_secs(60));

    let unconfigured: Vec<_> = config.unconfigured_providers().map(|p| p.name.as_str()).collect();
    assert_eq!(unconfigured, ["openai"]);
}

#[tokio::test]
async fn test_environment_layers_over_file() {
    let file = write_config(CONFIG_YAML);
    let mut config = Config::from_file(file.path()).await.unwrap();

    let env: HashMap<&str, &str> = HashMap::from([
        ("OPENAI_API_KEY", "sk-env"),
        ("HUGGINGFACE_TOKEN", "hf-env"),
        ("RELAY_PORT", "9000"),
        ("RELAY_FALLBACK_MESSAGE", "稍後再試"),
    ]);
    config
        .apply_overrides_from(|name| env.get(name).map(|v| v.to_string()))
        .unwrap();
    config.validate().unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.orchestrator.fallback_message, "稍後再試");

    // Existing entry keeps its slot; a new kind is appended
    let names: Vec<_> = config.configured_providers().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["local", "gemini", "openai", "huggingface"]);

    let orchestrator = Orchestrator::from_config(&config).unwrap();
    assert_eq!(orchestrator.registry().len(), 4);
}

#[tokio::test]
async fn test_malformed_override_is_a_config_error() {
    let mut config = Config::default();
    let err = config
        .apply_overrides_from(|name| (name == "RELAY_DISABLE_THRESHOLD").then(|| "three".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("RELAY_DISABLE_THRESHOLD"));
}

#[tokio::test]
async fn test_invalid_file_is_rejected() {
    let file = write_config(
        r#"
orchestrator:
  disable_threshold: 0
"#,
    );
    assert!(Config::from_file(file.path()).await.is_err());
}

#[tokio::test]
async fn test_shipped_example_config_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/relay.yaml.example");
    let config = Config::from_file(&path).await.unwrap();

    let kinds: Vec<_> = config.providers.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, ProviderKind::ALL);
    assert_eq!(config.configured_providers().count(), 0);
}

#[test]
fn test_secrets_do_not_reach_debug_output() {
    let mut config = Config::default();
    config.messaging.channel_secret = Some("line-secret-value".into());
    config.messaging.channel_access_token = Some("line-token-value".into());
    config.providers[0].api_key = Some("sk-secret-value".into());

    let rendered = format!("{:?}", config);
    for secret in ["line-secret-value", "line-token-value", "sk-secret-value"] {
        assert!(!rendered.contains(secret), "{} leaked", secret);
    }
}
