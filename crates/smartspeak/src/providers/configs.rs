/// Unified enum to wrap the per-provider configurations. Built once at
/// startup from the environment; never mutated per request.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Groq(GroqProviderConfig),
    Gemini(GeminiProviderConfig),
    OpenAi(OpenAiProviderConfig),
}

impl ProviderConfig {
    /// The env var the API key for this provider is read from.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderConfig::Groq(_) => super::groq::GROQ_API_KEY_ENV,
            ProviderConfig::Gemini(_) => super::gemini::GEMINI_API_KEY_ENV,
            ProviderConfig::OpenAi(_) => super::openai::OPENAI_API_KEY_ENV,
        }
    }

    pub fn has_api_key(&self) -> bool {
        match self {
            ProviderConfig::Groq(config) => config.api_key.is_some(),
            ProviderConfig::Gemini(config) => config.api_key.is_some(),
            ProviderConfig::OpenAi(config) => config.api_key.is_some(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroqProviderConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: i32,
}

#[derive(Debug, Clone)]
pub struct GeminiProviderConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: i32,
}

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: i32,
}
