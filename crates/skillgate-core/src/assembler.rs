//! Message assembly: resolved system prompt + caller history → upstream message list.
//! `ChatMessage` has no fields beyond `role` and `content`, so the output is already sanitized.

use crate::message::{ChatMessage, Role};

/// Prepends one system message when `system_prompt` is non-empty.
/// History (including any caller system messages) follows unchanged.
pub fn assemble(history: Vec<ChatMessage>, system_prompt: &str) -> Vec<ChatMessage> {
    let mut out = Vec::with_capacity(history.len() + 1);
    if !system_prompt.is_empty() {
        out.push(ChatMessage::system(system_prompt));
    }
    out.extend(history);
    out
}

/// Number of system messages in a list; used in request logs.
pub fn system_count(messages: &[ChatMessage]) -> usize {
    messages.iter().filter(|m| m.role == Role::System).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatRequest;
    use serde_json::{json, Value};

    fn history() -> Vec<ChatMessage> {
        vec![
            ChatMessage::user("first"),
            ChatMessage {
                role: Role::Assistant,
                content: "second".into(),
            },
            ChatMessage::user("third"),
        ]
    }

    #[test]
    fn prepends_exactly_one_system_message() {
        let out = assemble(history(), "be brief");
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], ChatMessage::system("be brief"));
        assert_eq!(system_count(&out), 1);
        assert_eq!(&out[1..], history().as_slice());
    }

    #[test]
    fn empty_prompt_adds_nothing() {
        let out = assemble(history(), "");
        assert_eq!(out, history());
        assert_eq!(system_count(&out), 0);
    }

    #[test]
    fn caller_system_messages_are_kept_after_resolved_prompt() {
        let mut h = vec![ChatMessage::system("caller rules")];
        h.extend(history());
        let out = assemble(h, "resolved");
        assert_eq!(out[0].content, "resolved");
        assert_eq!(out[1], ChatMessage::system("caller rules"));
        assert_eq!(system_count(&out), 2);
    }

    #[test]
    fn only_role_and_content_reach_the_wire() {
        let body = json!({
            "messages": [
                { "role": "user", "content": "a", "id": 7, "timestamp": "now" },
                { "role": "assistant", "content": "b", "tool_calls": [] },
                { "role": "user", "extra": { "nested": true } }
            ]
        });
        let req = ChatRequest::from_value(body).expect("parse");
        let out = serde_json::to_value(assemble(req.messages, "sys")).expect("serialize");

        for msg in out.as_array().expect("array") {
            let keys: Vec<&String> = msg.as_object().expect("object").keys().collect();
            assert_eq!(keys.len(), 2, "unexpected fields in {}", msg);
            assert!(msg.get("role").is_some());
            assert!(msg.get("content").map(Value::is_string).unwrap_or(false));
        }
    }
}
