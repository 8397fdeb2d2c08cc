//! Gateway configuration loaded once from the environment (and `.env` via the binary).
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | MINIMAX_API_KEY | unset | Upstream credential. Unset => every chat request fails with 500. |
//! | MINIMAX_API_URL | MiniMax chatcompletion_v2 | Upstream endpoint. |
//! | SKILLGATE_MODEL | MiniMax-M2.5 | Model sent upstream. |
//! | SKILLGATE_TEMPERATURE | 0.7 | Sampling temperature. |
//! | SKILLGATE_MAX_TOKENS | 4000 | Completion cap. |
//! | SKILLGATE_SKILLS_DIR | unset | Directory of per-feature skill files. Unset => embedded prompts only. |
//! | SKILLGATE_BIND | 127.0.0.1:8000 | HTTP listen address. |

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.minimax.chat/v1/text/chatcompletion_v2";
pub const DEFAULT_MODEL: &str = "MiniMax-M2.5";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Deployment constants sent with every upstream request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub params: ModelParams,
    pub skills_dir: Option<PathBuf>,
    pub bind_addr: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            params: ModelParams::default(),
            skills_dir: None,
            bind_addr: DEFAULT_BIND.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Load from process environment. Unset, blank or invalid => defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = ModelParams::default();
        Self {
            api_key: get("MINIMAX_API_KEY"),
            api_url: get("MINIMAX_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            params: ModelParams {
                model: get("SKILLGATE_MODEL").unwrap_or(defaults.model),
                temperature: get("SKILLGATE_TEMPERATURE")
                    .and_then(|v| v.parse::<f32>().ok())
                    .filter(|t| t.is_finite())
                    .unwrap_or(defaults.temperature),
                max_tokens: get("SKILLGATE_MAX_TOKENS")
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(defaults.max_tokens),
            },
            skills_dir: get("SKILLGATE_SKILLS_DIR").map(PathBuf::from),
            bind_addr: get("SKILLGATE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
        }
    }
}
