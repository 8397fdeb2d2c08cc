//! SkillGate: Core library.
//! Feature-aware prompt resolution and response normalization for a chat-completion gateway.

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod message;
pub mod normalizer;
pub mod resolver;
pub mod skill_source;
pub mod upstream;

pub use assembler::assemble;
pub use catalog::{FeatureId, PromptCatalog};
pub use config::{GatewayConfig, ModelParams};
pub use error::GatewayError;
pub use gateway::{admit, Admission, Gateway, Outcome, CORS_HEADERS};
pub use message::{ChatMessage, ChatRequest, GatewayReply, GatewayResponse, Role};
pub use normalizer::normalize;
pub use resolver::PromptResolver;
pub use skill_source::{InlineSkills, PromptSource, SkillDirectory, SkillLookup};
pub use upstream::{ChatCompletion, UpstreamClient};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
