//! HTTP layer.
//!
//! A thin axum surface over the two pure calculations and the job layer.

mod dto;
mod routes;
mod state;

pub use routes::{AppError, create_router};
pub use state::AppState;
