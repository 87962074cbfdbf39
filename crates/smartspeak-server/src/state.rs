use smartspeak::prompt::TUTOR_SYSTEM_PROMPT;
use smartspeak::providers::configs::ProviderConfig;

/// Shared application state. Immutable after startup; each request gets a
/// clone, so there is no cross-request mutable state anywhere.
#[derive(Clone)]
pub struct AppState {
    pub provider_config: ProviderConfig,
    pub system_prompt: String,
}

impl AppState {
    pub fn new(provider_config: ProviderConfig) -> Self {
        Self {
            provider_config,
            system_prompt: TUTOR_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Same state with a different persona, used to test prompt variations
    /// without touching any request-building logic.
    #[allow(dead_code)]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}
