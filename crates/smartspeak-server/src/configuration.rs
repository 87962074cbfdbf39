use crate::error::ConfigError;
use config::{Config, Environment};
use serde::Deserialize;
use smartspeak::keys;
use smartspeak::providers::configs::{
    GeminiProviderConfig, GroqProviderConfig, OpenAiProviderConfig, ProviderConfig,
};
use smartspeak::providers::{gemini, groq, openai};
use std::net::SocketAddr;

#[derive(Debug, Default, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Failed to parse socket address")
    }
}

/// Which upstream provider this deployment talks to, selected once at
/// startup via `SMARTSPEAK_PROVIDER__TYPE` (groq by default). Generation
/// parameters are fixed per deployment; callers cannot override them.
/// API keys are deliberately not part of this tree; each provider reads
/// its canonical env var (GROQ_API_KEY, GEMINI_API_KEY, OPENAI_API_KEY).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ProviderSettings {
    Groq {
        #[serde(default = "default_groq_host")]
        host: String,
        #[serde(default = "default_groq_model")]
        model: String,
        #[serde(default = "default_temperature")]
        temperature: f32,
        #[serde(default = "default_max_tokens")]
        max_tokens: i32,
    },
    Gemini {
        #[serde(default = "default_gemini_host")]
        host: String,
        #[serde(default = "default_gemini_model")]
        model: String,
        #[serde(default = "default_temperature")]
        temperature: f32,
        #[serde(default = "default_max_tokens")]
        max_tokens: i32,
    },
    OpenAi {
        #[serde(default = "default_openai_host")]
        host: String,
        #[serde(default = "default_openai_model")]
        model: String,
        #[serde(default = "default_temperature")]
        temperature: f32,
        #[serde(default = "default_max_tokens")]
        max_tokens: i32,
    },
}

impl ProviderSettings {
    // Convert to the smartspeak ProviderConfig, resolving the API key from
    // the process environment exactly once.
    pub fn into_config(self) -> ProviderConfig {
        match self {
            ProviderSettings::Groq {
                host,
                model,
                temperature,
                max_tokens,
            } => ProviderConfig::Groq(GroqProviderConfig {
                host,
                api_key: keys::api_key_from_env(groq::GROQ_API_KEY_ENV),
                model,
                temperature,
                max_tokens,
            }),
            ProviderSettings::Gemini {
                host,
                model,
                temperature,
                max_tokens,
            } => ProviderConfig::Gemini(GeminiProviderConfig {
                host,
                api_key: keys::api_key_from_env(gemini::GEMINI_API_KEY_ENV),
                model,
                temperature,
                max_tokens,
            }),
            ProviderSettings::OpenAi {
                host,
                model,
                temperature,
                max_tokens,
            } => ProviderConfig::OpenAi(OpenAiProviderConfig {
                host,
                api_key: keys::api_key_from_env(openai::OPENAI_API_KEY_ENV),
                model,
                temperature,
                max_tokens,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub provider: ProviderSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Server defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            // Groq unless the deployment says otherwise
            .set_default("provider.type", "groq")?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("SMARTSPEAK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> i32 {
    500
}

fn default_groq_host() -> String {
    groq::GROQ_HOST.to_string()
}

fn default_groq_model() -> String {
    groq::GROQ_MODEL.to_string()
}

fn default_gemini_host() -> String {
    gemini::GEMINI_HOST.to_string()
}

fn default_gemini_model() -> String {
    gemini::GEMINI_MODEL.to_string()
}

fn default_openai_host() -> String {
    openai::OPENAI_HOST.to_string()
}

fn default_openai_model() -> String {
    openai::OPENAI_MODEL.to_string()
}
