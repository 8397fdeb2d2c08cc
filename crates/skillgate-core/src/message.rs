//! Wire types shared by both transports: the inbound chat request and the outbound payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::FeatureId;
use crate::error::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One conversation turn. Only `role` and `content` exist on this type, so any
/// other field a caller sends is dropped during deserialization and never reaches
/// the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Logical request body: `{ messages: [...], feature: <id or omitted> }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub feature: FeatureId,
}

impl ChatRequest {
    pub fn from_value(body: Value) -> Result<Self, GatewayError> {
        serde_json::from_value(body).map_err(|e| GatewayError::BadRequest(e.to_string()))
    }
}

/// Successful gateway answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReply {
    pub content: String,
    pub id: Option<String>,
}

/// The only payload shape any caller receives, whatever the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GatewayResponse {
    Success(GatewayReply),
    Failure { error: String },
}

impl GatewayResponse {
    pub fn failure(err: &GatewayError) -> Self {
        GatewayResponse::Failure {
            error: err.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"error":"服务器错误"}"#.to_string())
    }
}
