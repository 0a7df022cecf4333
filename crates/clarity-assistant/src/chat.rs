//! Provider-neutral chat request types and the [`ChatProvider`] seam.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::AssistantError;

/// Most recent messages forwarded to a provider. Older turns are dropped.
pub const MAX_CONTEXT_MESSAGES: usize = 10;

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Everything a provider needs for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// One system instruction and one user turn.
    pub fn single_turn(system_prompt: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: vec![ChatMessage::user(user)],
            temperature: 0.3,
            max_tokens: 500,
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// The tail of the conversation that is actually sent.
    pub fn context(&self) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(MAX_CONTEXT_MESSAGES);
        &self.messages[start..]
    }
}

/// Anything that turns a [`ChatRequest`] into generated text.
pub trait ChatProvider: Send + Sync {
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}
