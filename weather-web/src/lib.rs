//! Web front end for the weather lookup.
//!
//! This crate focuses on:
//! - Serving the weather page and its JSON twin
//! - Mapping lookup failures to HTTP statuses
//! - Human-friendly output formatting

pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
