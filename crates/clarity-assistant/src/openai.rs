//! OpenAI-compatible `/v1/chat/completions` provider over blocking HTTP.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ureq::Agent;

use crate::chat::{ChatProvider, ChatRequest};
use crate::error::AssistantError;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct OpenAiProvider {
    agent: Agent,
    endpoint: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        Self {
            agent: config.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request body in the chat-completions wire shape.
    pub fn request_body(&self, request: &ChatRequest) -> Result<serde_json::Value, AssistantError> {
        let mut messages = vec![WireMessage {
            role: "system",
            content: &request.system_prompt,
        }];
        messages.extend(request.context().iter().map(|m| WireMessage {
            role: m.role.as_str(),
            content: &m.content,
        }));

        let body = CompletionBody {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };
        Ok(serde_json::to_value(body)?)
    }
}

impl ChatProvider for OpenAiProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, AssistantError> {
        let body = self.request_body(request)?;
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let authorization = format!("Bearer {}", self.api_key);

        let text = tokio::task::spawn_blocking(move || {
            post_completion(&agent, &endpoint, &authorization, &body)
        })
        .await
        .map_err(|e| AssistantError::Invocation(e.to_string()))??;

        debug!(model = %self.model, chars = text.len(), "completion received");
        Ok(text)
    }
}

fn post_completion(
    agent: &Agent,
    endpoint: &str,
    authorization: &str,
    body: &serde_json::Value,
) -> Result<String, AssistantError> {
    let mut response = agent
        .post(endpoint)
        .header("Authorization", authorization)
        .send_json(body)
        .map_err(|e| AssistantError::Invocation(e.to_string()))?;

    let status = response.status();
    let raw = response
        .body_mut()
        .read_to_string()
        .map_err(|e| AssistantError::ResponseParse(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorEnvelope>(&raw)
            .ok()
            .and_then(|envelope| envelope.error)
            .map(|detail| detail.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        return Err(AssistantError::Api {
            status: status.as_u16(),
            message,
        });
    }

    parse_completion(&raw)
}

/// Extract the first choice's text from a chat-completions response body.
pub fn parse_completion(raw: &str) -> Result<String, AssistantError> {
    let parsed: CompletionResponse = serde_json::from_str(raw)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AssistantError::ResponseParse("no message content in response".to_string()))
}
