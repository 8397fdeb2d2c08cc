//! Error taxonomy for the gateway. Every variant converges on the `{ "error": ... }` payload.

use thiserror::Error;

/// Fixed message when the upstream credential is not configured.
pub const MISSING_API_KEY: &str = "API Key未配置";
/// Used when the upstream rejects a request without a `base_resp.status_msg`.
pub const UPSTREAM_REQUEST_FAILED: &str = "API请求失败";
/// Returned for any method other than POST / OPTIONS.
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Errors that can end a gateway request.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Credential absent. Detected before any network call.
    #[error("{}", MISSING_API_KEY)]
    Config,

    /// Upstream answered with a non-success status, or could not be reached.
    #[error("{0}")]
    Upstream(String),

    /// Upstream answered successfully but without a usable choice list.
    #[error("API返回数据格式错误: {0}")]
    Format(String),

    #[error("{}", METHOD_NOT_ALLOWED)]
    MethodNotAllowed,

    /// Inbound body could not be decoded into a chat request.
    #[error("{0}")]
    BadRequest(String),
}

impl GatewayError {
    /// HTTP status this error maps to on either transport.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::MethodNotAllowed => 405,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_method_mismatch_is_405() {
        assert_eq!(GatewayError::MethodNotAllowed.status_code(), 405);
        assert_eq!(GatewayError::Config.status_code(), 500);
        assert_eq!(GatewayError::Upstream("x".into()).status_code(), 500);
        assert_eq!(GatewayError::Format("{}".into()).status_code(), 500);
        assert_eq!(GatewayError::BadRequest("x".into()).status_code(), 500);
    }

    #[test]
    fn messages_match_client_contract() {
        assert_eq!(GatewayError::Config.to_string(), "API Key未配置");
        assert_eq!(GatewayError::MethodNotAllowed.to_string(), "Method not allowed");
        assert_eq!(
            GatewayError::Format(r#"{"choices":[]}"#.into()).to_string(),
            r#"API返回数据格式错误: {"choices":[]}"#
        );
    }
}
