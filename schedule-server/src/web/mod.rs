//! Web layer for the scheduling service.
//!
//! Provides HTTP endpoints for computing schedules and relaying record
//! uploads to the store.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
