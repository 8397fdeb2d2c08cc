//! Event-envelope transport for cloud-function runtimes (API-gateway trigger shape).
//!
//! Inbound: `{ "httpMethod", "body", "isBase64Encoded", ... }` with a JSON-string body.
//! Outbound: `{ "statusCode", "headers", "body" }` with a JSON-string body.

use std::collections::BTreeMap;

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use serde::{Deserialize, Serialize};
use skillgate_core::{admit, Admission, Gateway, GatewayError, Outcome, CORS_HEADERS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl FunctionResponse {
    fn new(status_code: u16, body: String) -> Self {
        let mut headers: BTreeMap<String, String> = CORS_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    fn from_outcome(outcome: Outcome) -> Self {
        Self::new(outcome.status, outcome.response.to_json())
    }
}

/// Standard alphabet with optional padding. URL-safe input is mapped onto it first.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Accepts padded or unpadded, standard or URL-safe base64, with embedded whitespace.
fn decode_base64(body: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = body
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    LENIENT_BASE64.decode(normalized)
}

/// Raw request bytes, base64-decoded when the event says so.
fn decode_body(event: &FunctionEvent) -> Result<Vec<u8>, GatewayError> {
    let body = event
        .body
        .as_deref()
        .ok_or_else(|| GatewayError::BadRequest("request body is empty".to_string()))?;
    if event.is_base64_encoded {
        decode_base64(body).map_err(|e| GatewayError::BadRequest(format!("base64 body: {}", e)))
    } else {
        Ok(body.as_bytes().to_vec())
    }
}

pub async fn handle_event(gateway: &Gateway, event: FunctionEvent) -> FunctionResponse {
    match admit(&event.http_method) {
        Admission::Preflight => FunctionResponse::new(200, String::new()),
        Admission::Rejected => FunctionResponse::from_outcome(Outcome::method_not_allowed()),
        Admission::Accepted => {
            tracing::info!(
                "[EVENT] chat request (base64: {})",
                event.is_base64_encoded
            );
            let outcome = match decode_body(&event) {
                Ok(body) => gateway.handle_body(&body).await,
                Err(e) => Outcome::from_error(&e),
            };
            FunctionResponse::from_outcome(outcome)
        }
    }
}
