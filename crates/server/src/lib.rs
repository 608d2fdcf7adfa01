//! HTTP surface: axum router, bearer gate, request extractors, metrics and OpenAPI.

pub mod errors;
pub mod extract;
pub mod observability;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{build_app, run};
pub use state::AppState;
