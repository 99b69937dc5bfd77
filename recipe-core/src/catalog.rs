//! The fixed, ordered list of known recipes.
//!
//! A catalog is built once at startup, either from the bundled sample recipes
//! or from a YAML file, and is never mutated afterwards:
//!
//! ```yaml
//! - name: Pancakes
//!   ingredients: [Flour, Milk, Eggs]
//!   instructions:
//!     - Whisk everything together.
//!     - Fry in a hot pan.
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Recipe, RecipeId};

/// Recipe entry as written in a catalog file. IDs are assigned on load.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The five recipes bundled with the app.
    pub fn sample() -> Self {
        Self::new(vec![
            Recipe::new("Spaghetti Carbonara")
                .with_ingredients(["Pasta", "Eggs", "Bacon", "Cheese"])
                .with_instructions([
                    "Cook pasta according to package instructions.",
                    "In a separate pan, fry bacon until crispy.",
                    "In a bowl, whisk together eggs and grated Parmesan cheese.",
                    "Toss cooked pasta with bacon and egg mixture until coated.",
                    "Serve hot with additional grated Parmesan cheese.",
                ]),
            Recipe::new("Chicken Parmesan")
                .with_ingredients(["Chicken Breast", "Tomato Sauce", "Cheese", "Breadcrumbs"])
                .with_instructions([
                    "Preheat oven to 375°F (190°C).",
                    "Bread chicken breasts with breadcrumbs.",
                    "Bake chicken in preheated oven for 20 minutes.",
                    "Top chicken with tomato sauce and mozzarella cheese.",
                    "Bake for an additional 10 minutes or until cheese is melted and bubbly.",
                ]),
            Recipe::new("Caesar Salad")
                .with_ingredients(["Romaine Lettuce", "Croutons", "Cheese", "Caesar Dressing"])
                .with_instructions([
                    "Wash and chop romaine lettuce.",
                    "Toss lettuce with Caesar dressing.",
                    "Top with croutons and shaved Parmesan cheese.",
                    "Serve immediately.",
                ]),
            Recipe::new("Beef Stir Fry")
                .with_ingredients(["Beef", "Bell Peppers", "Broccoli", "Soy Sauce"])
                .with_instructions([
                    "Slice beef thinly against the grain.",
                    "Heat a pan over medium-high heat and add beef slices.",
                    "Stir-fry until beef is browned.",
                    "Add bell peppers and broccoli to the pan.",
                    "Continue to stir-fry until vegetables are tender.",
                    "Add soy sauce and stir to combine.",
                    "Serve hot.",
                ]),
            Recipe::new("Chocolate Chip Cookies")
                .with_ingredients(["Flour", "Butter", "Sugar", "Chocolate Chips"])
                .with_instructions([
                    "Preheat oven to 350°F (175°C).",
                    "In a bowl, cream together butter and sugar until light and fluffy.",
                    "Mix in flour until well combined.",
                    "Fold in chocolate chips.",
                    "Drop spoonfuls of dough onto a baking sheet.",
                    "Bake for 8-10 minutes or until edges are golden brown.",
                ]),
        ])
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let entries: Vec<CatalogEntry> = serde_yaml::from_str(contents)?;
        let recipes = entries
            .into_iter()
            .map(|entry| {
                Recipe::new(entry.name)
                    .with_ingredients(entry.ingredients)
                    .with_instructions(entry.instructions)
            })
            .collect();
        Ok(Self::new(recipes))
    }

    /// Load a catalog from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::CatalogRead(path.to_path_buf(), e))?;
        Self::from_yaml(&contents).map_err(|e| Error::CatalogParse(path.to_path_buf(), e))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        self.get(id).is_some()
    }

    /// Find a recipe by case-insensitive name. The first match wins.
    pub fn get_by_name(&self, name: &str) -> Option<&Recipe> {
        let name_lower = name.trim().to_lowercase();
        self.recipes
            .iter()
            .find(|r| r.name.to_lowercase() == name_lower)
    }

    /// Resolve a recipe from either its ID or its name.
    pub fn find(&self, key: &str) -> Result<&Recipe> {
        let found = match key.parse::<RecipeId>() {
            Ok(id) => self.get(id),
            Err(_) => self.get_by_name(key),
        };
        found.ok_or_else(|| Error::NoRecipeMatching(key.to_string()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
