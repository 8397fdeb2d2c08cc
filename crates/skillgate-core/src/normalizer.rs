//! Response normalization: upstream body → `{ content, id }`.
//!
//! `choices[0]` may carry text as `message.content`, `content` or `text`,
//! tried in that order.

use serde_json::Value;

use crate::error::GatewayError;
use crate::message::GatewayReply;

const TEXT_PATHS: [&[&str]; 3] = [&["message", "content"], &["content"], &["text"]];

fn text_at<'a>(choice: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(choice, |v, key| v.get(*key))?
        .as_str()
        .filter(|s| !s.is_empty())
}

fn id_of(raw: &Value) -> Option<String> {
    match raw.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn normalize(raw: &Value) -> Result<GatewayReply, GatewayError> {
    let first = raw
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| GatewayError::Format(raw.to_string()))?;

    let content = match TEXT_PATHS.iter().find_map(|p| text_at(first, p)) {
        Some(text) => text.to_string(),
        None => {
            // Passed through as an empty success; callers have relied on this.
            tracing::warn!("[NORMALIZE] choices[0] carries no text: {}", first);
            String::new()
        }
    };

    Ok(GatewayReply {
        content,
        id: id_of(raw),
    })
}
