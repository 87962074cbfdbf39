use serde_json::{json, Value};

use super::base::Usage;
use crate::models::message::Message;
use crate::models::role::Role;

/// Convert the fixed system prompt plus conversation into the
/// chat-completions message array. The system prompt always comes first.
pub fn messages_to_chat_spec(system: &str, messages: &[Message]) -> Vec<Value> {
    let mut spec = vec![json!({
        "role": "system",
        "content": system
    })];

    for message in messages {
        spec.push(json!({
            "role": message.role,
            "content": message.content
        }));
    }

    spec
}

/// Flatten the conversation into the single transcript string the Gemini
/// `generateContent` endpoint takes: the system prompt, then alternating
/// `Student:` / `Tutor:` lines, ending with a dangling `Tutor:` so the
/// model completes the tutor's next turn.
pub fn messages_to_transcript(system: &str, messages: &[Message]) -> String {
    let mut transcript = String::from(system);
    transcript.push_str("\n\n");

    for message in messages {
        match message.role {
            Role::User => {
                transcript.push_str("Student: ");
                transcript.push_str(&message.content);
                transcript.push('\n');
            }
            Role::Assistant => {
                transcript.push_str("Tutor: ");
                transcript.push_str(&message.content);
                transcript.push('\n');
            }
            // System turns never appear here; the fixed prompt is the only
            // system instruction and it already heads the transcript.
            Role::System => {}
        }
    }

    transcript.push_str("Tutor:");
    transcript
}

/// Pull the reply text out of a chat-completions response. Empty strings
/// count as missing so the caller-facing contract (a non-empty reply) holds.
pub fn extract_chat_reply(response: &Value) -> Option<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .filter(|text| !text.is_empty())
        .map(String::from)
}

/// Pull the reply text out of a Gemini `generateContent` response.
pub fn extract_gemini_reply(response: &Value) -> Option<String> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .filter(|text| !text.is_empty())
        .map(String::from)
}

/// Token accounting from a chat-completions `usage` block, if present.
pub fn extract_usage(response: &Value) -> Option<Usage> {
    let usage = response.get("usage")?;

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Some(Usage::new(input_tokens, output_tokens, total_tokens))
}

/// Upstream error detail from a failed response body. Both the OpenAI-style
/// and Gemini APIs nest it at `error.message`.
pub fn upstream_error_message(body: &Value) -> Option<String> {
    body.get("error")?
        .get("message")?
        .as_str()
        .map(String::from)
}
