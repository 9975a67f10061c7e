//! # relay-api
//!
//! HTTP API layer for yoco-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The payment endpoint that relays tokenized card charges to Yoco
//! - Health and diagnostics endpoints
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Service banner |
//! | GET | `/health` | Health check |
//! | GET | `/api/test` | Key diagnostics |
//! | POST | `/api/process-payment` | Charge a tokenized card |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
