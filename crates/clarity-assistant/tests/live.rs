//! Live provider checks.
//!
//! These call real model APIs. The OpenAI test needs `OPENAI_API_KEY`; the
//! Bedrock test needs AWS credentials with Converse access.
//!
//! Run with: `cargo test -p clarity-assistant --test live -- --ignored`

use clarity_assistant::bedrock::{BedrockProvider, DEFAULT_MODEL_ID};
use clarity_assistant::chat::{ChatProvider, ChatRequest};
use clarity_assistant::provider::Provider;

fn ping() -> ChatRequest {
    ChatRequest::single_turn("Reply with exactly one word.", "Say hello.").with_sampling(0.0, 16)
}

#[tokio::test]
#[ignore]
async fn openai_round_trip() {
    let provider = Provider::from_env().await.expect("provider from env");
    let reply = provider.complete(&ping()).await.expect("completion");
    println!("reply: {reply}");
    assert!(!reply.trim().is_empty());
}

#[tokio::test]
#[ignore]
async fn bedrock_round_trip() {
    let provider = BedrockProvider::from_default_chain(DEFAULT_MODEL_ID).await;
    let reply = provider.complete(&ping()).await.expect("completion");
    println!("reply: {reply}");
    assert!(!reply.trim().is_empty());
}
