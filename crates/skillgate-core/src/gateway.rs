//! Gateway core shared by every transport.
//! Transports only translate envelopes; method gating, prompt resolution,
//! upstream call and normalization all happen here.

use std::sync::Arc;

use serde_json::Value;

use crate::assembler::{assemble, system_count};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::message::{ChatRequest, GatewayReply, GatewayResponse};
use crate::normalizer::normalize;
use crate::resolver::PromptResolver;
use crate::skill_source::SkillDirectory;
use crate::upstream::{ChatCompletion, UpstreamClient};

/// CORS headers present on every response of every transport.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// What to do with an inbound request given only its method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// OPTIONS: 200 with an empty body.
    Preflight,
    /// POST: run the chat pipeline.
    Accepted,
    /// Anything else: 405.
    Rejected,
}

pub fn admit(method: &str) -> Admission {
    if method.eq_ignore_ascii_case("OPTIONS") {
        Admission::Preflight
    } else if method.eq_ignore_ascii_case("POST") {
        Admission::Accepted
    } else {
        Admission::Rejected
    }
}

/// Status code plus payload, before any transport-specific wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: u16,
    pub response: GatewayResponse,
}

impl Outcome {
    pub fn from_error(err: &GatewayError) -> Self {
        tracing::error!("[GATEWAY] API Error: {}", err);
        Self {
            status: err.status_code(),
            response: GatewayResponse::failure(err),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::from_error(&GatewayError::MethodNotAllowed)
    }
}

impl From<Result<GatewayReply, GatewayError>> for Outcome {
    fn from(result: Result<GatewayReply, GatewayError>) -> Self {
        match result {
            Ok(reply) => Self {
                status: 200,
                response: GatewayResponse::Success(reply),
            },
            Err(e) => Self::from_error(&e),
        }
    }
}

#[derive(Clone)]
pub struct Gateway {
    resolver: PromptResolver,
    upstream: Arc<dyn ChatCompletion>,
}

impl Gateway {
    pub fn new(resolver: PromptResolver, upstream: Arc<dyn ChatCompletion>) -> Self {
        Self { resolver, upstream }
    }

    /// Production wiring: MiniMax client, optional skill directory, embedded catalog.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let mut resolver = PromptResolver::default();
        if let Some(dir) = &config.skills_dir {
            resolver = resolver.with_skills(Arc::new(SkillDirectory::new(dir)));
        }
        Self::new(resolver, Arc::new(UpstreamClient::from_config(config)))
    }

    /// resolve → assemble → upstream → normalize.
    pub async fn chat(&self, request: ChatRequest) -> Result<GatewayReply, GatewayError> {
        let prompt = self.resolver.resolve(request.feature).await;
        let messages = assemble(request.messages, &prompt);
        tracing::info!(
            "[GATEWAY] feature={} messages={} system={}",
            request.feature,
            messages.len(),
            system_count(&messages)
        );
        let raw = self.upstream.complete(&messages).await?;
        normalize(&raw)
    }

    /// Decode a JSON body and run the pipeline. Body errors become 500.
    /// A missing credential is reported as soon as the body is valid JSON,
    /// before its shape is checked or a prompt is resolved.
    pub async fn handle_body(&self, body: &[u8]) -> Outcome {
        Outcome::from(self.decode_and_chat(body).await)
    }

    async fn decode_and_chat(&self, body: &[u8]) -> Result<GatewayReply, GatewayError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| GatewayError::BadRequest(e.to_string()))?;
        if !self.upstream.has_credential() {
            return Err(GatewayError::Config);
        }
        self.chat(ChatRequest::from_value(value)?).await
    }
}
