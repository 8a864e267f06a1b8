//! HTTP boundary for the ledger.
//!
//! Validates requests, calls into the [`Engine`] and turns its errors into
//! responses. Holds no state of its own beyond the shared engine.

mod error;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::Engine;

pub use error::{json_error, ApiError};

pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/accounts", post(handlers::create_account))
        .route("/v1/accounts/transfers", post(handlers::transfer_money))
        .route("/v1/accounts/:account_id", get(handlers::get_account))
        .with_state(engine)
}
