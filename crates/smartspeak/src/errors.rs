use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider's API key env var is not set. The variant carries the
    /// var name for server-side logs; it must never reach a response body.
    #[error("API key not configured: {env_var} is not set")]
    MissingApiKey { env_var: &'static str },

    /// Non-2xx from the upstream API. `message` is the upstream error
    /// detail when the body carried one, else the status line.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// 2xx from upstream but no reply text where the contract expects one.
    #[error("upstream response contained no reply text")]
    NoReply,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;
