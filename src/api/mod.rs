//! HTTP API module for the Shift Compliance Engine.
//!
//! This module exposes agreement lookup and replacement, shift evaluation, and
//! override authorization as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EvaluationRequest, OverrideRequest, ReplaceAgreementsRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
