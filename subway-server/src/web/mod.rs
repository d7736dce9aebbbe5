//! Web layer for the subway network service.
//!
//! Provides HTTP endpoints for stations, lines and line sections.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
