//! # Routes
//!
//! Axum router configuration for the payment gateway.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /                    - Service banner
/// - GET  /health              - Health check
/// - GET  /api/test            - Key diagnostics
/// - POST /api/process-payment - Charge a tokenized card
pub fn create_router(state: AppState) -> Router {
    // TODO: restrict origins to the storefront domain before going live
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let api_routes = Router::new()
        .route("/test", get(handlers::api_test))
        .route("/process-payment", post(handlers::process_payment));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        // Middleware; CORS wraps the panic handler so 500s keep their headers
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CatchPanicLayer::custom(handlers::handle_panic)),
        )
        // State
        .with_state(state)
}
