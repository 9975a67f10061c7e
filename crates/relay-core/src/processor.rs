//! # Charge Processor Trait
//!
//! Strategy seam for payment processors. The gateway only ever talks to an
//! `Arc<dyn ChargeProcessor>`, so a processor can be swapped (or stubbed in
//! tests) without touching request handling.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         ChargeProcessor (trait)         │
//! │  ├── charge()                           │
//! │  ├── diagnostics()                      │
//! │  └── processor_name()                   │
//! └─────────────────────────────────────────┘
//!                     ▲
//!            ┌────────┴────────┐
//!            │ YocoChargeClient│
//!            └─────────────────┘
//! ```

use crate::error::RelayResult;
use crate::payment::{Charge, ChargeRequest};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Non-secret facts about a configured processor, for diagnostics endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorDiagnostics {
    /// Public (publishable) key, if one is configured
    pub public_key: Option<String>,
    /// Whether a secret key is configured
    pub has_secret_key: bool,
    /// Whether the secret key is a live key
    pub live: bool,
}

impl ProcessorDiagnostics {
    /// "LIVE" or "TEST"
    pub fn environment(&self) -> &'static str {
        if self.live {
            "LIVE"
        } else {
            "TEST"
        }
    }
}

/// Core trait for payment processor implementations.
#[async_trait]
pub trait ChargeProcessor: Send + Sync {
    /// Create a single charge.
    ///
    /// Performs exactly one outbound call. Failures come back classified as
    /// `Timeout`, `Rejected`, `Network` or `Unknown`.
    async fn charge(&self, request: &ChargeRequest) -> RelayResult<Charge>;

    /// Describe the configured credentials without exposing secrets.
    fn diagnostics(&self) -> ProcessorDiagnostics;

    /// Processor name (for logging).
    fn processor_name(&self) -> &'static str;
}

/// Type alias for a shared charge processor (dynamic dispatch)
pub type BoxedChargeProcessor = Arc<dyn ChargeProcessor>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChargeError;
    use serde_json::Map;

    struct FixedProcessor;

    #[async_trait]
    impl ChargeProcessor for FixedProcessor {
        async fn charge(&self, request: &ChargeRequest) -> RelayResult<Charge> {
            if request.token == "tok_fail" {
                return Err(ChargeError::Timeout);
            }
            Ok(Charge {
                id: Some("ch_fixed".to_string()),
                amount_in_cents: Some(request.amount_in_cents as i64),
                currency: Some(request.currency.clone()),
                status: Some("successful".to_string()),
            })
        }

        fn diagnostics(&self) -> ProcessorDiagnostics {
            ProcessorDiagnostics {
                public_key: None,
                has_secret_key: true,
                live: false,
            }
        }

        fn processor_name(&self) -> &'static str {
            "fixed"
        }
    }

    fn charge_request(token: &str) -> ChargeRequest {
        ChargeRequest {
            token: token.to_string(),
            amount_in_cents: 2500,
            currency: "ZAR".to_string(),
            email: "a@b.com".to_string(),
            metadata: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_dynamic_dispatch() {
        let processor: BoxedChargeProcessor = Arc::new(FixedProcessor);

        let charge = processor.charge(&charge_request("tok_ok")).await.unwrap();
        assert_eq!(charge.id.as_deref(), Some("ch_fixed"));
        assert_eq!(charge.amount_in_cents, Some(2500));

        let err = processor.charge(&charge_request("tok_fail")).await.unwrap_err();
        assert!(matches!(err, ChargeError::Timeout));
        assert_eq!(processor.processor_name(), "fixed");
    }

    #[test]
    fn test_diagnostics_environment() {
        let diagnostics = FixedProcessor.diagnostics();
        assert_eq!(diagnostics.environment(), "TEST");

        let live = ProcessorDiagnostics {
            live: true,
            ..diagnostics
        };
        assert_eq!(live.environment(), "LIVE");
    }
}
