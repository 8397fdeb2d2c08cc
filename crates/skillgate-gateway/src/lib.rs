//! SkillGate transports: a synchronous HTTP handler (axum) and a cloud-function
//! event envelope. Both are thin wrappers around `skillgate_core::Gateway`.

pub mod event;
pub mod http;

pub use event::{handle_event, FunctionEvent, FunctionResponse};
pub use http::router;
