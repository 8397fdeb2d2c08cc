//! SkillGate: feature-aware chat gateway in front of the MiniMax chat-completion API.
//!
//! Default: HTTP server (`POST /api/chat`, `GET /health`) on `SKILLGATE_BIND`.
//! `--event`: read one cloud-function event from stdin, write the response envelope to stdout.

use std::sync::Arc;

use skillgate_core::{Gateway, GatewayConfig};
use skillgate_gateway::{handle_event, router, FunctionEvent};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Credentials stay in the backend; .env is optional.
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[skillgate] .env not loaded: {} (using system environment)", e);
    }

    // Logs go to stderr so `--event` keeps stdout for the response envelope.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = GatewayConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("[SYSTEM] MINIMAX_API_KEY not set; chat requests will fail with 500");
    }
    let gateway = Arc::new(Gateway::from_config(&config));

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--event") {
        if let Err(e) = run_event(&gateway).await {
            eprintln!("[skillgate] event invocation failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    tracing::info!(
        "[SYSTEM] SkillGate {} on {} (model {}, skills {})",
        skillgate_core::version(),
        config.bind_addr,
        config.params.model,
        config
            .skills_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
    );

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("[SYSTEM] bind {} failed: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, router(gateway)).await {
        tracing::error!("[SYSTEM] server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run_event(gateway: &Gateway) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    let event: FunctionEvent = serde_json::from_str(&input)?;
    let response = handle_event(gateway, event).await;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
