//! Error types for the recipe core.

use std::path::PathBuf;
use thiserror::Error;

use crate::models::RecipeId;

/// Errors reported by the catalog and the recipe book
#[derive(Error, Debug)]
pub enum Error {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(RecipeId),

    #[error("No recipe matching '{0}'")]
    NoRecipeMatching(String),

    #[error("Invalid recipe ID '{0}': expected a UUID")]
    InvalidRecipeId(String),

    #[error(
        "Unknown allergen '{0}'. Valid options: cheese, milk, eggs, peanuts, treeNuts, shellfish, soy, wheat"
    )]
    UnknownAllergen(String),

    #[error("Failed to read catalog file '{}': {1}", .0.display())]
    CatalogRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse catalog file '{}': {1}", .0.display())]
    CatalogParse(PathBuf, #[source] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
