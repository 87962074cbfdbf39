use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use super::base::{Completion, Provider};
use super::configs::GeminiProviderConfig;
use super::utils::{extract_gemini_reply, messages_to_transcript, upstream_error_message};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Google Generative Language `generateContent` endpoint. Unlike the
/// chat-completions providers this one takes a single flattened transcript
/// and authenticates with the key in a query parameter, and its responses
/// carry no model or usage fields worth surfacing.
pub struct GeminiProvider {
    client: Client,
    config: GeminiProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiProviderConfig) -> ProviderResult<Self> {
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
                env_var: GEMINI_API_KEY_ENV,
            })?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.host.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
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
impl Provider for GeminiProvider {
    async fn complete(&self, system: &str, messages: &[Message]) -> ProviderResult<Completion> {
        let payload = json!({
            "contents": [{
                "parts": [{
                    "text": messages_to_transcript(system, messages)
                }]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_tokens
            }
        });

        let response = self.post(payload).await?;

        let reply = extract_gemini_reply(&response).ok_or(ProviderError::NoReply)?;

        Ok(Completion {
            reply,
            model: None,
            usage: None,
        })
    }
}
