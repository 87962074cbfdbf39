//! Chat turns exchanged between the caller, this proxy, and the upstream
//! model. The wire format is the plain `{role, content}` shape used by
//! chat-completions style APIs; callers send the same shape back as history.
pub mod message;
pub mod role;
