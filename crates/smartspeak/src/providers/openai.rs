use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use super::base::{Completion, Provider};
use super::configs::OpenAiProviderConfig;
use super::utils::{
    extract_chat_reply, extract_usage, messages_to_chat_spec, upstream_error_message,
};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

pub const OPENAI_HOST: &str = "https://api.openai.com";
pub const OPENAI_MODEL: &str = "gpt-4o-mini";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> ProviderResult<Self> {
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
                env_var: OPENAI_API_KEY_ENV,
            })?;

        let url = format!(
            "{}/v1/chat/completions",
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
impl Provider for OpenAiProvider {
    async fn complete(&self, system: &str, messages: &[Message]) -> ProviderResult<Completion> {
        let payload = json!({
            "model": self.config.model,
            "messages": messages_to_chat_spec(system, messages),
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens
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
