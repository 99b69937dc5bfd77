//! HTTP surface for the Recipe Box server.

pub mod routes;

pub use routes::{router, ApiError, AppState};
