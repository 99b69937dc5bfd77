//! Recipe catalog state: the catalog, the user's allergens and their favorites.
//!
//! `RecipeBook` is the single owner of this state. Callers construct one and
//! pass it by reference to whatever presents it; nothing here is global.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::models::{Allergen, Recipe, RecipeId};

#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    catalog: Catalog,
    /// Avoided allergens in the order they were enabled. Never holds duplicates.
    user_allergens: Vec<Allergen>,
    /// Favorite recipes in the order they were added. Never holds duplicates.
    favorites: Vec<RecipeId>,
}

impl RecipeBook {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            user_allergens: Vec::new(),
            favorites: Vec::new(),
        }
    }

    pub fn with_allergens(mut self, allergens: impl IntoIterator<Item = Allergen>) -> Self {
        for allergen in allergens {
            self.toggle_allergen(allergen, true);
        }
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The full catalog, unfiltered.
    pub fn list_recipes(&self) -> &[Recipe] {
        self.catalog.recipes()
    }

    /// Catalog recipes with no ingredient naming one of the user's allergens,
    /// in catalog order.
    pub fn filter_recipes(&self) -> Vec<&Recipe> {
        self.catalog
            .iter()
            .filter(|recipe| !self.contains_user_allergen(recipe))
            .collect()
    }

    fn contains_user_allergen(&self, recipe: &Recipe) -> bool {
        recipe.ingredients.iter().any(|ingredient| {
            Allergen::from_ingredient(ingredient)
                .is_some_and(|allergen| self.user_allergens.contains(&allergen))
        })
    }

    pub fn get_recipe(&self, id: RecipeId) -> Result<&Recipe> {
        self.catalog.get(id).ok_or(Error::RecipeNotFound(id))
    }

    /// Resolve a recipe from an ID or a case-insensitive name.
    pub fn find_recipe(&self, key: &str) -> Result<&Recipe> {
        self.catalog.find(key)
    }

    /// Add a recipe to the end of the favorites. Returns `false` if it was
    /// already a favorite.
    pub fn add_to_favorites(&mut self, id: RecipeId) -> Result<bool> {
        self.get_recipe(id)?;
        if self.favorites.contains(&id) {
            return Ok(false);
        }
        self.favorites.push(id);
        Ok(true)
    }

    /// Remove a recipe from the favorites. Returns `false` if it was not a
    /// favorite.
    pub fn remove_from_favorites(&mut self, id: RecipeId) -> Result<bool> {
        self.get_recipe(id)?;
        let before = self.favorites.len();
        self.favorites.retain(|favorite| *favorite != id);
        Ok(self.favorites.len() != before)
    }

    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.favorites.contains(&id)
    }

    /// Favorite recipes in the order they were added.
    pub fn list_favorites(&self) -> Vec<&Recipe> {
        self.favorites
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .collect()
    }

    /// Enable or disable an allergen. Returns `true` if the set changed.
    pub fn toggle_allergen(&mut self, allergen: Allergen, enabled: bool) -> bool {
        if enabled {
            if self.user_allergens.contains(&allergen) {
                return false;
            }
            self.user_allergens.push(allergen);
            true
        } else {
            let before = self.user_allergens.len();
            self.user_allergens.retain(|a| *a != allergen);
            self.user_allergens.len() != before
        }
    }

    pub fn user_allergens(&self) -> &[Allergen] {
        &self.user_allergens
    }

    pub fn is_avoided(&self, allergen: Allergen) -> bool {
        self.user_allergens.contains(&allergen)
    }
}
