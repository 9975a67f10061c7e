//! # relay-yoco
//!
//! Yoco charge processor for yoco-relay.
//!
//! Card details are tokenized in the browser by Yoco's client SDK; this crate
//! turns that token into a charge by calling the Yoco charges API with the
//! server-held secret key.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_core::{ChargeProcessor, PaymentRequest};
//! use relay_yoco::YocoChargeClient;
//!
//! // Create client from environment
//! let client = YocoChargeClient::from_env()?;
//!
//! // Charge a validated request
//! let charge = client.charge(&request.validate()?).await?;
//! println!("charged {}", charge.id);
//! ```

pub mod charge;
pub mod config;

// Re-exports
pub use charge::YocoChargeClient;
pub use config::{YocoConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
