//! # Yoco Charges
//!
//! One outbound `POST` to the Yoco charges API per payment. Failures are
//! classified here; turning them into customer-facing messages happens in
//! `relay_core::ChargeError::failure`.

use crate::config::YocoConfig;
use async_trait::async_trait;
use relay_core::{
    Charge, ChargeError, ChargeProcessor, ChargeRequest, ProcessorDiagnostics,
    ProcessorErrorBody, RelayResult,
};
use reqwest::{header::AUTHORIZATION, Client};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument, warn};

/// Yoco charge processor
pub struct YocoChargeClient {
    config: YocoConfig,
    client: Client,
}

impl YocoChargeClient {
    /// Create a new client; the configured timeout applies to every call.
    pub fn new(config: YocoConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ChargeError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables (or the config file fallback)
    pub fn from_env() -> RelayResult<Self> {
        let config = YocoConfig::load()?;
        Self::new(config)
    }

    pub fn config(&self) -> &YocoConfig {
        &self.config
    }
}

#[async_trait]
impl ChargeProcessor for YocoChargeClient {
    #[instrument(skip(self, request), fields(amount = request.amount_in_cents, currency = %request.currency))]
    async fn charge(&self, request: &ChargeRequest) -> RelayResult<Charge> {
        let body = YocoChargeBody::from(request);

        debug!("Calling Yoco charges API: {}", self.config.api_url);

        let response = self
            .client
            .post(&self.config.api_url)
            .header(AUTHORIZATION, self.config.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ChargeError::Timeout
            } else {
                ChargeError::Unknown(format!("Failed to read Yoco response: {}", e))
            }
        })?;

        if !status.is_success() {
            error!("Yoco API error: status={}, body={}", status, text);

            let body = serde_json::from_str::<ProcessorErrorBody>(&text).unwrap_or_default();
            return Err(ChargeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Any JSON 2xx is a charge; gaps are logged, not treated as failures
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            ChargeError::Unknown(format!("Failed to parse Yoco response: {}", e))
        })?;
        let charge: Charge = serde_json::from_value(value).unwrap_or_default();

        let missing = charge.missing_fields();
        if !missing.is_empty() {
            warn!(
                "Yoco charge response is missing fields: {}",
                missing.join(", ")
            );
        }

        info!(
            "Created Yoco charge: id={}, status={}",
            charge.id.as_deref().unwrap_or("unknown"),
            charge.status.as_deref().unwrap_or("unknown")
        );

        Ok(charge)
    }

    fn diagnostics(&self) -> ProcessorDiagnostics {
        ProcessorDiagnostics {
            public_key: self.config.public_key.clone(),
            has_secret_key: !self.config.secret_key.is_empty(),
            live: self.config.is_live_mode(),
        }
    }

    fn processor_name(&self) -> &'static str {
        "yoco"
    }
}

/// Errors raised before any HTTP response arrived
fn classify_send_error(err: reqwest::Error) -> ChargeError {
    if err.is_timeout() {
        ChargeError::Timeout
    } else if err.is_builder() {
        ChargeError::Unknown(err.to_string())
    } else {
        ChargeError::Network(err.to_string())
    }
}

// =============================================================================
// Yoco API Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct YocoChargeBody<'a> {
    token: &'a str,
    amount_in_cents: u64,
    currency: &'a str,
    customer: YocoCustomer<'a>,
    metadata: &'a Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct YocoCustomer<'a> {
    email: &'a str,
}

impl<'a> From<&'a ChargeRequest> for YocoChargeBody<'a> {
    fn from(request: &'a ChargeRequest) -> Self {
        Self {
            token: &request.token,
            amount_in_cents: request.amount_in_cents,
            currency: &request.currency,
            customer: YocoCustomer {
                email: &request.email,
            },
            metadata: &request.metadata,
        }
    }
}
