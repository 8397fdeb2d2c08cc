//! Upstream chat-completion client (MiniMax `chatcompletion_v2`, OpenAI-compatible body).
//! One POST per request. No retry, no backoff, default client timeouts.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::{GatewayConfig, ModelParams};
use crate::error::{GatewayError, UPSTREAM_REQUEST_FAILED};
use crate::message::ChatMessage;

/// Anything that can turn an assembled message list into a raw upstream body.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// False when the request can be rejected before anything is decoded or sent.
    fn has_credential(&self) -> bool {
        true
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<Value, GatewayError>;
}

#[derive(Serialize)]
struct UpstreamRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

pub struct UpstreamClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    params: ModelParams,
}

impl UpstreamClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, params: ModelParams) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            params,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            config.params.clone(),
        )
    }
}

/// `base_resp.status_msg` from an upstream error body, if any.
fn status_msg(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed
        .get("base_resp")?
        .get("status_msg")?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ChatCompletion for UpstreamClient {
    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<Value, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::Config)?;

        let body = UpstreamRequest {
            model: &self.params.model,
            messages,
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(format!("upstream request: {}", e)))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| GatewayError::Upstream(format!("upstream body: {}", e)))?;

        if !status.is_success() {
            tracing::error!("[UPSTREAM] {} from {}: {}", status.as_u16(), self.endpoint, text);
            return Err(GatewayError::Upstream(
                status_msg(&text).unwrap_or_else(|| UPSTREAM_REQUEST_FAILED.to_string()),
            ));
        }

        serde_json::from_str(&text).map_err(|_| GatewayError::Format(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, key: Option<&str>) -> UpstreamClient {
        UpstreamClient::new(
            format!("{}/v1/text/chatcompletion_v2", server.uri()),
            key.map(str::to_string),
            ModelParams::default(),
        )
    }

    #[tokio::test]
    async fn sends_fixed_parameters_with_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/text/chatcompletion_v2"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "MiniMax-M2.5",
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "hi" }
                ],
                "temperature": 0.7,
                "max_tokens": 4000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "abc",
                "choices": [{ "message": { "content": "hello" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let raw = client(&server, Some("sk-test"))
            .complete(&[ChatMessage::system("sys"), ChatMessage::user("hi")])
            .await
            .expect("complete");
        assert_eq!(raw["id"], "abc");
    }

    #[tokio::test]
    async fn missing_key_never_hits_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let upstream = client(&server, None);
        assert!(!upstream.has_credential());
        let err = upstream
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config));
        assert_eq!(err.to_string(), "API Key未配置");
    }

    #[tokio::test]
    async fn non_success_uses_status_msg() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "base_resp": { "status_code": 1004, "status_msg": "login fail" }
            })))
            .mount(&server)
            .await;

        let err = client(&server, Some("bad"))
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Upstream(_)));
        assert_eq!(err.to_string(), "login fail");
    }

    #[tokio::test]
    async fn non_success_without_status_msg_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client(&server, Some("k"))
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), UPSTREAM_REQUEST_FAILED);
    }

    #[tokio::test]
    async fn unparseable_success_body_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server, Some("k"))
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Format(ref body) if body == "not json"));
    }

    #[test]
    fn status_msg_extraction() {
        assert_eq!(
            status_msg(r#"{"base_resp":{"status_msg":"quota"}}"#).as_deref(),
            Some("quota")
        );
        assert_eq!(status_msg(r#"{"base_resp":{"status_msg":""}}"#), None);
        assert_eq!(status_msg(r#"{"error":"x"}"#), None);
        assert_eq!(status_msg("oops"), None);
    }
}
