//! # Request Handlers
//!
//! Axum request handlers for the payment gateway.
//! Every failure, including a panic further down the stack, leaves here as
//! the same JSON error shape.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::{timestamp, to_major_units, ChargeError, GatewayResponse, PaymentRequest};
use std::any::Any;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Error half of a handler result
pub type ErrorReply = (StatusCode, Json<GatewayResponse>);

fn failure_response(err: &ChargeError) -> ErrorReply {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(GatewayResponse::from_error(err)))
}

// =============================================================================
// Handlers
// =============================================================================

/// Service banner
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "Yoco Payment Gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "live": state.processor.diagnostics().live,
        "timestamp": timestamp(),
        "endpoints": {
            "health": "/health",
            "test": "/api/test",
            "processPayment": "/api/process-payment"
        }
    }))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "yoco-payment-gateway",
        "timestamp": timestamp()
    }))
}

/// Diagnostics: which keys are configured, without revealing the secret
pub async fn api_test(State(state): State<AppState>) -> impl IntoResponse {
    let diagnostics = state.processor.diagnostics();
    Json(serde_json::json!({
        "status": "Yoco Payment Server Running",
        "timestamp": timestamp(),
        "keys": {
            "publicKey": diagnostics.public_key,
            "hasSecretKey": diagnostics.has_secret_key,
            "environment": diagnostics.environment()
        },
        "message": "Server is ready to process payments"
    }))
}

/// Charge a tokenized card
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn process_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<GatewayResponse>, ErrorReply> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Unreadable payment request: {}", rejection.body_text());
        failure_response(&ChargeError::InvalidRequest(rejection.body_text()))
    })?;

    info!(
        email = request.email.as_deref().unwrap_or("<missing>"),
        amount = ?request.amount,
        currency = request.currency.as_deref().unwrap_or("<default>"),
        token = request.masked_token().as_deref().unwrap_or("<missing>"),
        metadata = ?request.metadata,
        "Received payment request"
    );

    let charge_request = request.validate().map_err(|e| {
        warn!("Payment request rejected: {}", e);
        failure_response(&e)
    })?;

    info!("Charging {}", charge_request.display_amount());

    match state.processor.charge(&charge_request).await {
        Ok(charge) => {
            info!(
                processor = state.processor.processor_name(),
                charge_id = charge.id.as_deref().unwrap_or("unknown"),
                amount = ?charge.amount_in_cents.map(to_major_units),
                currency = charge.currency.as_deref().unwrap_or("unknown"),
                status = charge.status.as_deref().unwrap_or("unknown"),
                "Payment successful"
            );
            Ok(Json(GatewayResponse::charged(charge)))
        }
        Err(e) => {
            let reply = failure_response(&e);
            error!(
                processor = state.processor.processor_name(),
                status = reply.0.as_u16(),
                code = reply.1.code.as_deref().unwrap_or_default(),
                "Payment failed: {}",
                e
            );
            Err(reply)
        }
    }
}

/// Turn a panic anywhere in the handler chain into a 500
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    let err = ChargeError::Internal(detail.to_string());
    error!("Server error: {}", err);

    failure_response(&err).into_response()
}
