use std::collections::HashMap;

use clarity_assistant::bedrock::DEFAULT_MODEL_ID;
use clarity_assistant::error::AssistantError;
use clarity_assistant::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use clarity_assistant::provider::AssistantSettings;

fn settings(vars: &[(&str, &str)]) -> Result<AssistantSettings, AssistantError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AssistantSettings::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn openai_is_the_default() {
    assert_eq!(
        settings(&[("OPENAI_API_KEY", "sk-test")]).unwrap(),
        AssistantSettings::OpenAi {
            api_key: "sk-test".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    );
}

#[test]
fn openai_requires_a_key() {
    let err = settings(&[("OPENAI_API_KEY", "  ")]).unwrap_err();
    assert!(matches!(err, AssistantError::Config(_)));
}

#[test]
fn overrides_are_applied() {
    let resolved = settings(&[
        ("CLARITY_ASSISTANT", "OpenAI"),
        ("OPENAI_API_KEY", "sk-test"),
        ("CLARITY_OPENAI_ENDPOINT", "http://localhost:4000/v1/chat/completions"),
        ("CLARITY_OPENAI_MODEL", "gpt-4o"),
    ])
    .unwrap();
    assert_eq!(
        resolved,
        AssistantSettings::OpenAi {
            api_key: "sk-test".to_string(),
            endpoint: "http://localhost:4000/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
        }
    );
}

#[test]
fn bedrock_needs_no_key() {
    assert_eq!(
        settings(&[("CLARITY_ASSISTANT", "bedrock")]).unwrap(),
        AssistantSettings::Bedrock {
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    );
}

#[test]
fn unknown_provider_is_rejected() {
    let err = settings(&[("CLARITY_ASSISTANT", "llama")]).unwrap_err();
    assert!(err.to_string().contains("unknown assistant provider: llama"));
}
