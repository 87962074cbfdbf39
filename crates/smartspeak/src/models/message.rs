use super::role::Role;
use serde::{Deserialize, Serialize};

/// One turn of the conversation. Immutable once created; sequences of
/// messages are order-significant and replayed to the upstream model as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(Role::System, content)
    }
}
