//! Synchronous transport: axum router with CORS on every response.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use skillgate_core::{admit, Admission, Gateway, Outcome, CORS_HEADERS};
use tower_http::set_header::SetResponseHeaderLayer;

pub fn router(gateway: Arc<Gateway>) -> Router {
    let mut app = Router::new()
        // Every method reaches the handler so the gateway, not axum, answers 405.
        .route("/api/chat", any(chat_handler))
        .route("/health", get(health))
        .with_state(gateway);

    for (name, value) in CORS_HEADERS {
        if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
            app = app.layer(SetResponseHeaderLayer::overriding(
                name,
                HeaderValue::from_static(value),
            ));
        }
    }
    app
}

async fn health() -> &'static str {
    "OK"
}

async fn chat_handler(
    State(gateway): State<Arc<Gateway>>,
    method: Method,
    body: Bytes,
) -> Response {
    match admit(method.as_str()) {
        Admission::Preflight => StatusCode::OK.into_response(),
        Admission::Rejected => outcome_response(Outcome::method_not_allowed()),
        Admission::Accepted => {
            tracing::info!("[HTTP] chat request ({} bytes)", body.len());
            outcome_response(gateway.handle_body(&body).await)
        }
    }
}

fn outcome_response(outcome: Outcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome.response)).into_response()
}
