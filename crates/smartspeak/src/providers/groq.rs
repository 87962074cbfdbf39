use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use super::base::{Completion, Provider};
use super::configs::GroqProviderConfig;
use super::utils::{
    extract_chat_reply, extract_usage, messages_to_chat_spec, upstream_error_message,
};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

pub const GROQ_HOST: &str = "https://api.groq.com";
pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

pub struct GroqProvider {
    client: Client,
    config: GroqProviderConfig,
}

impl GroqProvider {
    pub fn new(config: GroqProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, payload: Value) -> ProviderResult<Value> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey {
                env_var: GROQ_API_KEY_ENV,
            })?;

        // Groq exposes an OpenAI-compatible surface under /openai
        let url = format!(
            "{}/openai/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            Err(ProviderError::Upstream {
                status: status.as_u16(),
                message: upstream_error_message(&body).unwrap_or_else(|| status.to_string()),
            })
        }
    }
}

#[async_trait]
impl Provider for GroqProvider {
    async fn complete(&self, system: &str, messages: &[Message]) -> ProviderResult<Completion> {
        let payload = json!({
            "model": self.config.model,
            "messages": messages_to_chat_spec(system, messages),
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "top_p": 0.95,
            "stream": false
        });

        let response = self.post(payload).await?;

        let reply = extract_chat_reply(&response).ok_or(ProviderError::NoReply)?;
        let model = response["model"].as_str().map(String::from);
        let usage = extract_usage(&response);

        Ok(Completion {
            reply,
            model,
            usage,
        })
    }
}
