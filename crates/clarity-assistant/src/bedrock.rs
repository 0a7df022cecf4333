//! Bedrock Converse API provider.
//!
//! The Converse API wants an inference profile ID as its model, e.g.
//! `us.anthropic.claude-sonnet-4-20250514-v1:0`; bare foundation model IDs
//! fail with "on-demand throughput isn't supported". The caller's IAM
//! identity needs `bedrock:InvokeModel` and an accepted Marketplace
//! agreement for the model.

use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ConverseOutput, InferenceConfiguration, Message,
    SystemContentBlock,
};
use tracing::debug;

use crate::chat::{ChatMessage, ChatProvider, ChatRequest, ChatRole};
use crate::error::AssistantError;

pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

#[derive(Debug, Clone)]
pub struct BedrockProvider {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl BedrockProvider {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(config),
            model_id: model_id.into(),
        }
    }

    /// Build from the default AWS credential chain and region.
    pub async fn from_default_chain(model_id: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::new(&config, model_id)
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl ChatProvider for BedrockProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, AssistantError> {
        let messages = converse_messages(request)?;

        let sampling = InferenceConfiguration::builder()
            .max_tokens(i32::try_from(request.max_tokens).unwrap_or(i32::MAX))
            .temperature(request.temperature)
            .build();

        let output = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(request.system_prompt.clone()))
            .set_messages(Some(messages))
            .inference_config(sampling)
            .send()
            .await
            .map_err(|e| AssistantError::Invocation(e.into_service_error().to_string()))?
            .output
            .ok_or_else(|| AssistantError::ResponseParse("converse returned no output".to_string()))?;

        let ConverseOutput::Message(reply) = output else {
            return Err(AssistantError::ResponseParse(
                "converse output is not a message".to_string(),
            ));
        };

        let text: String = reply
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text(text) => Some(text),
                _ => None,
            })
            .collect();

        debug!(model_id = %self.model_id, chars = text.len(), "bedrock reply received");
        Ok(text)
    }
}

/// The request's bounded context as Converse messages. The system prompt
/// travels separately.
pub fn converse_messages(request: &ChatRequest) -> Result<Vec<Message>, AssistantError> {
    request.context().iter().map(to_converse_message).collect()
}

fn to_converse_message(message: &ChatMessage) -> Result<Message, AssistantError> {
    let role = match message.role {
        ChatRole::User => ConversationRole::User,
        ChatRole::Assistant => ConversationRole::Assistant,
    };
    Message::builder()
        .role(role)
        .content(ContentBlock::Text(message.content.clone()))
        .build()
        .map_err(|e| AssistantError::Invocation(e.to_string()))
}
