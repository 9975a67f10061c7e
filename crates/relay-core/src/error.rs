//! # Charge Error Types
//!
//! Typed error handling for the relay.
//! Every charge attempt returns `Result<T, ChargeError>`, and every error is
//! eventually flattened into a [`Failure`] at the endpoint boundary.

use crate::lenient;
use crate::messages::friendly_message;
use serde::Deserialize;
use thiserror::Error;

/// Message returned when the outbound call times out.
pub const TIMEOUT_MESSAGE: &str = "Payment timeout. Please try again.";

/// Message returned when the processor could not be reached.
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";

/// Message returned when nothing more specific is known.
pub const GENERIC_MESSAGE: &str = "Payment processing failed";

/// Message returned when a required request field is missing.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: token, amount, or email";

/// Message returned for uncaught faults.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Fallback failure code.
pub const PAYMENT_FAILED: &str = "payment_failed";

/// Error body returned by the processor on a non-2xx response.
///
/// All fields are optional; processors are not consistent about which ones
/// they populate. Empty, `null` or non-string values decode as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorErrorBody {
    /// Explicit, processor-authored error message
    #[serde(default, deserialize_with = "lenient::string")]
    pub error_message: Option<String>,
    /// Processor-defined error category (e.g. `card_declined`)
    #[serde(default, deserialize_with = "lenient::string")]
    pub error_type: Option<String>,
    /// Generic message field
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: Option<String>,
}

/// Core error type for all charge operations
#[derive(Debug, Error)]
pub enum ChargeError {
    /// Required field missing from the inbound request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Inbound body could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Outbound call exceeded its timeout
    #[error("Processor call timed out")]
    Timeout,

    /// Processor answered with a non-2xx status
    #[error("Processor rejected charge with status {status}")]
    Rejected {
        status: u16,
        body: ProcessorErrorBody,
    },

    /// Processor could not be reached at all
    #[error("Network error: {0}")]
    Network(String),

    /// Anything else that went wrong with the outbound call
    #[error("Unexpected processor failure: {0}")]
    Unknown(String),

    /// Invalid startup configuration (missing keys, bad URL)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Uncaught fault
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A failure flattened into what the caller sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// HTTP status to answer with
    pub status: u16,
    /// Human-readable message, already rewritten for end users
    pub message: String,
    /// Machine-readable error code
    pub code: String,
}

impl ChargeError {
    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Processor statuses are mirrored when the processor supplied one.
    pub fn status_code(&self) -> u16 {
        match self {
            ChargeError::Validation(_) | ChargeError::InvalidRequest(_) => 400,
            ChargeError::Timeout | ChargeError::Network(_) | ChargeError::Unknown(_) => 400,
            ChargeError::Rejected { status, .. } => *status,
            ChargeError::Configuration(_) | ChargeError::Internal(_) => 500,
        }
    }

    /// Resolve the message and code the caller sees.
    ///
    /// Processor failures are classified first (timeout, explicit processor
    /// message, generic message, network, fallback) and the resolved message
    /// is then passed through [`friendly_message`].
    pub fn failure(&self) -> Failure {
        let (message, code) = match self {
            ChargeError::Validation(msg) => (msg.clone(), "validation_error".to_string()),
            ChargeError::InvalidRequest(msg) => (msg.clone(), "invalid_request".to_string()),
            ChargeError::Configuration(_) => {
                (INTERNAL_MESSAGE.to_string(), "configuration_error".to_string())
            }
            ChargeError::Internal(_) => {
                (INTERNAL_MESSAGE.to_string(), "internal_error".to_string())
            }
            ChargeError::Timeout => (TIMEOUT_MESSAGE.to_string(), "timeout".to_string()),
            ChargeError::Rejected { body, .. } => {
                let present = |field: &Option<String>| {
                    field.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
                };
                match (present(&body.error_message), present(&body.message)) {
                    (Some(msg), _) => (
                        msg,
                        present(&body.error_type).unwrap_or_else(|| PAYMENT_FAILED.to_string()),
                    ),
                    (None, Some(msg)) => (msg, PAYMENT_FAILED.to_string()),
                    (None, None) => (GENERIC_MESSAGE.to_string(), PAYMENT_FAILED.to_string()),
                }
            }
            ChargeError::Network(_) => (NETWORK_MESSAGE.to_string(), "network_error".to_string()),
            ChargeError::Unknown(_) => (GENERIC_MESSAGE.to_string(), PAYMENT_FAILED.to_string()),
        };

        Failure {
            status: self.status_code(),
            message: friendly_message(&message),
            code,
        }
    }
}

/// Result type alias for charge operations
pub type RelayResult<T> = Result<T, ChargeError>;
