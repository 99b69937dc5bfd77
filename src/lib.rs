//! Recipe Box
//!
//! Configuration and the HTTP router shared by the `recipes` CLI and the
//! `recipes-server` binary. Recipe state lives in `recipe_core`.

pub mod config;
pub mod server;
