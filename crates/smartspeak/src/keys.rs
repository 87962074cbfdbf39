use std::env;

#[cfg(test)]
use mockall::automock;
#[cfg(test)]
use mockall::predicate::*;

/// Process environment access behind a trait so the missing-key path can be
/// tested without mutating global state.
#[cfg_attr(test, automock)]
pub trait Environment: Send + Sync {
    fn get_var(&self, key: &str) -> Result<String, env::VarError>;
}

pub struct RealEnvironment;

impl Environment for RealEnvironment {
    fn get_var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// Look up a provider API key. Empty or whitespace-only values count as
/// unset, matching how a blank env var behaves on hosting platforms.
pub fn api_key(env_var: &str, env: &impl Environment) -> Option<String> {
    match env.get_var(env_var) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Convenience wrapper over the real process environment.
pub fn api_key_from_env(env_var: &str) -> Option<String> {
    api_key(env_var, &RealEnvironment)
}
