use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderResult;
use crate::models::message::Message;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// What a provider hands back for one completion. `model` and `usage` are
/// only populated when the upstream response carries them.
#[derive(Debug, Clone)]
pub struct Completion {
    pub reply: String,
    pub model: Option<String>,
    pub usage: Option<Usage>,
}

/// Base trait for the upstream LLM APIs (Groq, Gemini, OpenAI).
///
/// `system` is the fixed tutor prompt and is always sent first, ahead of
/// `messages`; implementations must not let any caller-supplied turn
/// displace it.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, system: &str, messages: &[Message]) -> ProviderResult<Completion>;
}
