//! # relay-core
//!
//! Core types and traits for the yoco-relay payment gateway.
//!
//! This crate provides:
//! - `PaymentRequest`, `ChargeRequest`, `Charge` and `GatewayResponse` for the
//!   request/response cycle
//! - `ChargeProcessor` trait for implementing payment processors
//! - `ChargeError` and `Failure` for typed error handling
//! - the table that rewrites processor messages for end users
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{GatewayResponse, PaymentRequest};
//!
//! let charge = request.validate()?;
//! let response = match processor.charge(&charge).await {
//!     Ok(charge) => GatewayResponse::charged(charge),
//!     Err(err) => GatewayResponse::from_error(&err),
//! };
//! ```

pub mod error;
mod lenient;
pub mod messages;
pub mod payment;
pub mod processor;

// Re-exports for convenience
pub use error::{ChargeError, Failure, ProcessorErrorBody, RelayResult};
pub use messages::friendly_message;
pub use payment::{
    major_units_number, timestamp, to_major_units, Charge, ChargeRequest, GatewayResponse, PaymentRequest,
    DEFAULT_CURRENCY,
};
pub use processor::{BoxedChargeProcessor, ChargeProcessor, ProcessorDiagnostics};
