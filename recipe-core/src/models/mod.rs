mod allergen;
mod recipe;

pub use allergen::Allergen;
pub use recipe::{Recipe, RecipeId};
