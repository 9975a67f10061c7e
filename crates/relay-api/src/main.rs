//! # Yoco Relay
//!
//! Payment gateway that relays tokenized card charges to Yoco.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export YOCO_SECRET_KEY=sk_test_...
//! export YOCO_PUBLIC_KEY=pk_test_...
//!
//! # Run the server
//! yoco-relay
//! ```

use relay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();
    let diagnostics = state.processor.diagnostics();

    info!("Environment: {}", state.config.environment);
    info!(
        "Processor: {} ({} keys)",
        state.processor.processor_name(),
        diagnostics.environment()
    );
    if let Some(public_key) = &diagnostics.public_key {
        info!("Public key: {}", public_key);
    }

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 Yoco Relay starting on http://{}", addr);

    if !is_prod {
        info!("🩺 Health: http://{}/health", addr);
        info!("🔑 Test: http://{}/api/test", addr);
        info!("💳 Payment: POST http://{}/api/process-payment", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `LOG_FORMAT=json` switches to JSON lines; `RUST_LOG` overrides the level.
fn init_logging() {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn print_banner() {
    println!(
        r#"
  💳 Yoco Relay 💳
  ━━━━━━━━━━━━━━━━━━━━━━━
  Card payment gateway
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
