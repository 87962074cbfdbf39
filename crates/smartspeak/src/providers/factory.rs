use super::{
    base::Provider, configs::ProviderConfig, gemini::GeminiProvider, groq::GroqProvider,
    openai::OpenAiProvider,
};
use anyhow::Result;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(EnumIter, EnumString, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ProviderType {
    Groq,
    Gemini,
    OpenAi,
}

pub fn get_provider(config: ProviderConfig) -> Result<Box<dyn Provider + Send + Sync>> {
    match config {
        ProviderConfig::Groq(groq_config) => Ok(Box::new(GroqProvider::new(groq_config)?)),
        ProviderConfig::Gemini(gemini_config) => Ok(Box::new(GeminiProvider::new(gemini_config)?)),
        ProviderConfig::OpenAi(openai_config) => Ok(Box::new(OpenAiProvider::new(openai_config)?)),
    }
}
