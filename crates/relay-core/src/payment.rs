//! # Payment Types
//!
//! Inbound request, validated charge request, processor result and the
//! response shape the gateway sends back.

use crate::error::{ChargeError, Failure, RelayResult, MISSING_FIELDS_MESSAGE};
use crate::lenient;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Currency used when the client does not send one (ISO 4217)
pub const DEFAULT_CURRENCY: &str = "ZAR";

/// Number of characters of the card token kept when logging
const TOKEN_LOG_PREFIX: usize = 20;

/// Payment request as posted by the client.
///
/// Every field is optional at decode time; presence is checked by
/// [`PaymentRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentRequest {
    /// Opaque card/payment token from the processor's client SDK
    #[serde(default)]
    pub token: Option<String>,
    /// Amount in minor units (cents)
    #[serde(default)]
    pub amount: Option<u64>,
    /// ISO 4217 currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Customer email
    #[serde(default)]
    pub email: Option<String>,
    /// Arbitrary pass-through metadata
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl PaymentRequest {
    /// Token prefix safe for logs, if a token was sent
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_deref().map(mask_token)
    }

    /// Check required fields and fill in defaults.
    ///
    /// Token and email must be non-empty and amount must be non-zero. No
    /// format checks are made beyond that.
    pub fn validate(self) -> RelayResult<ChargeRequest> {
        let token = self.token.filter(|t| !t.is_empty());
        let amount = self.amount.filter(|a| *a > 0);
        let email = self.email.filter(|e| !e.is_empty());

        let (Some(token), Some(amount_in_cents), Some(email)) = (token, amount, email) else {
            return Err(ChargeError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        };

        Ok(ChargeRequest {
            token,
            amount_in_cents,
            currency: self
                .currency
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            email,
            metadata: self.metadata.unwrap_or_default(),
        })
    }
}

/// A validated charge, ready to hand to a processor
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub token: String,
    pub amount_in_cents: u64,
    pub currency: String,
    pub email: String,
    pub metadata: Map<String, Value>,
}

impl ChargeRequest {
    /// Token prefix safe for logs
    pub fn masked_token(&self) -> String {
        mask_token(&self.token)
    }

    /// Amount in major units, formatted with two decimals
    pub fn display_amount(&self) -> String {
        format!("{:.2} {}", to_major_units(self.amount_in_cents as i64), self.currency)
    }
}

fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(TOKEN_LOG_PREFIX).collect();
    format!("{}...", prefix)
}

/// Charge created by the processor.
///
/// A 2xx answer means money moved, so every field decodes leniently: a
/// missing, `null` or mistyped field is `None` rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    /// Opaque charge identifier
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    /// Amount charged in minor units
    #[serde(default, deserialize_with = "lenient::integer")]
    pub amount_in_cents: Option<i64>,
    /// ISO 4217 currency code
    #[serde(default, deserialize_with = "lenient::string")]
    pub currency: Option<String>,
    /// Processor-defined state (e.g. "successful")
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
}

impl Charge {
    /// Names of the fields the processor left out
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.is_none() {
            missing.push("id");
        }
        if self.amount_in_cents.is_none() {
            missing.push("amountInCents");
        }
        if self.currency.is_none() {
            missing.push("currency");
        }
        if self.status.is_none() {
            missing.push("status");
        }
        missing
    }
}

/// Convert minor units (cents) to major units
pub fn to_major_units(amount_in_cents: i64) -> f64 {
    amount_in_cents as f64 / 100.0
}

/// Major units as a JSON number: an integer when the cents divide evenly
pub fn major_units_number(amount_in_cents: i64) -> Number {
    if amount_in_cents % 100 == 0 {
        Number::from(amount_in_cents / 100)
    } else {
        Number::from_f64(to_major_units(amount_in_cents))
            .unwrap_or_else(|| Number::from(amount_in_cents / 100))
    }
}

/// Current time as an ISO-8601 string (UTC, millisecond precision)
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Response body for `POST /api/process-payment`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_id: Option<String>,
    /// Amount in major units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub timestamp: String,
}

impl GatewayResponse {
    fn empty(success: bool) -> Self {
        Self {
            success,
            charge_id: None,
            amount: None,
            currency: None,
            status: None,
            message: None,
            error: None,
            code: None,
            timestamp: timestamp(),
        }
    }

    /// Successful charge
    pub fn charged(charge: Charge) -> Self {
        Self {
            charge_id: charge.id,
            amount: charge.amount_in_cents.map(major_units_number),
            currency: charge.currency,
            status: charge.status,
            message: Some("Payment processed successfully".to_string()),
            ..Self::empty(true)
        }
    }

    /// Failed charge
    pub fn failed(failure: Failure) -> Self {
        Self {
            error: Some(failure.message),
            code: Some(failure.code),
            ..Self::empty(false)
        }
    }

    /// Uncaught fault; carries no error code
    pub fn internal_error() -> Self {
        Self {
            error: Some(crate::error::INTERNAL_MESSAGE.to_string()),
            ..Self::empty(false)
        }
    }

    /// Response for any error, keeping the code-less shape for internal faults
    pub fn from_error(err: &ChargeError) -> Self {
        match err {
            ChargeError::Internal(_) => Self::internal_error(),
            other => Self::failed(other.failure()),
        }
    }
}
