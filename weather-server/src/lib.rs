//! HTTP gateway translating weather queries into provider calls.
//!
//! This crate wires the `weather-core` provider contract to an axum
//! router: configuration loading, request validation, the uniform response
//! envelope and the server lifecycle.

pub mod cli;
pub mod response;
pub mod routes;
pub mod startup;

pub use cli::{Cli, Config};
pub use response::{ApiError, ApiResponse, ErrorBody};
pub use startup::{AppState, app};
