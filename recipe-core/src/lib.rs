//! Recipe Box Core Library
//!
//! The recipe catalog, allergen filtering and favorites state shared by the
//! Recipe Box CLI and server.

pub mod catalog;
pub mod error;
pub mod models;
pub mod recipe_book;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use models::{Allergen, Recipe, RecipeId};
pub use recipe_book::RecipeBook;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
