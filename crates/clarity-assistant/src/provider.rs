//! Provider selection from environment configuration.
//!
//! | variable | meaning |
//! |---|---|
//! | `CLARITY_ASSISTANT` | `openai` (default) or `bedrock` |
//! | `OPENAI_API_KEY` | required for `openai` |
//! | `CLARITY_OPENAI_ENDPOINT` | chat-completions URL override |
//! | `CLARITY_OPENAI_MODEL` | model override, default `gpt-4o-mini` |
//! | `CLARITY_BEDROCK_MODEL` | inference profile ID for `bedrock` |

use crate::bedrock::{self, BedrockProvider};
use crate::chat::{ChatProvider, ChatRequest};
use crate::error::AssistantError;
use crate::openai::{self, OpenAiProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantSettings {
    OpenAi {
        api_key: String,
        endpoint: String,
        model: String,
    },
    Bedrock {
        model_id: String,
    },
}

impl AssistantSettings {
    pub fn from_env() -> Result<Self, AssistantError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AssistantError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let kind = get("CLARITY_ASSISTANT").unwrap_or_else(|| "openai".to_string());
        match kind.to_ascii_lowercase().as_str() {
            "openai" => {
                let api_key = get("OPENAI_API_KEY").ok_or_else(|| {
                    AssistantError::Config("OPENAI_API_KEY is not set".to_string())
                })?;
                Ok(AssistantSettings::OpenAi {
                    api_key,
                    endpoint: get("CLARITY_OPENAI_ENDPOINT")
                        .unwrap_or_else(|| openai::DEFAULT_ENDPOINT.to_string()),
                    model: get("CLARITY_OPENAI_MODEL")
                        .unwrap_or_else(|| openai::DEFAULT_MODEL.to_string()),
                })
            }
            "bedrock" => Ok(AssistantSettings::Bedrock {
                model_id: get("CLARITY_BEDROCK_MODEL")
                    .unwrap_or_else(|| bedrock::DEFAULT_MODEL_ID.to_string()),
            }),
            other => Err(AssistantError::Config(format!(
                "unknown assistant provider: {other}"
            ))),
        }
    }
}

/// The configured collaborator.
#[derive(Debug, Clone)]
pub enum Provider {
    OpenAi(OpenAiProvider),
    Bedrock(BedrockProvider),
}

impl Provider {
    pub async fn from_settings(settings: AssistantSettings) -> Self {
        match settings {
            AssistantSettings::OpenAi {
                api_key,
                endpoint,
                model,
            } => Provider::OpenAi(
                OpenAiProvider::new(api_key)
                    .with_endpoint(endpoint)
                    .with_model(model),
            ),
            AssistantSettings::Bedrock { model_id } => {
                Provider::Bedrock(BedrockProvider::from_default_chain(model_id).await)
            }
        }
    }

    pub async fn from_env() -> Result<Self, AssistantError> {
        Ok(Self::from_settings(AssistantSettings::from_env()?).await)
    }
}

impl ChatProvider for Provider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, AssistantError> {
        match self {
            Provider::OpenAi(provider) => provider.complete(request).await,
            Provider::Bedrock(provider) => provider.complete(request).await,
        }
    }
}
