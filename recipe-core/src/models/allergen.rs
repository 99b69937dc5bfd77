use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Allergen {
    Cheese,
    Milk,
    Eggs,
    Peanuts,
    TreeNuts,
    Shellfish,
    Soy,
    Wheat,
}

/// Ingredient text that marks an ingredient as carrying an allergen.
///
/// Keys are the raw values. An ingredient matches only when its whole
/// lowercased text equals a key, so "Soy Sauce" or "Tree Nuts" never match.
/// The `treeNuts` key has an uppercase letter and therefore never matches any
/// ingredient.
const INGREDIENT_TABLE: [(&str, Allergen); Allergen::ALL.len()] = [
    ("cheese", Allergen::Cheese),
    ("milk", Allergen::Milk),
    ("eggs", Allergen::Eggs),
    ("peanuts", Allergen::Peanuts),
    ("treeNuts", Allergen::TreeNuts),
    ("shellfish", Allergen::Shellfish),
    ("soy", Allergen::Soy),
    ("wheat", Allergen::Wheat),
];

impl Allergen {
    /// Every allergen, in declaration order.
    pub const ALL: [Allergen; 8] = [
        Allergen::Cheese,
        Allergen::Milk,
        Allergen::Eggs,
        Allergen::Peanuts,
        Allergen::TreeNuts,
        Allergen::Shellfish,
        Allergen::Soy,
        Allergen::Wheat,
    ];

    /// Raw string value, as used in serialized data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Allergen::Cheese => "cheese",
            Allergen::Milk => "milk",
            Allergen::Eggs => "eggs",
            Allergen::Peanuts => "peanuts",
            Allergen::TreeNuts => "treeNuts",
            Allergen::Shellfish => "shellfish",
            Allergen::Soy => "soy",
            Allergen::Wheat => "wheat",
        }
    }

    /// Human-readable label for menus and toggles.
    pub fn label(&self) -> &'static str {
        match self {
            Allergen::Cheese => "Cheese",
            Allergen::Milk => "Milk",
            Allergen::Eggs => "Eggs",
            Allergen::Peanuts => "Peanuts",
            Allergen::TreeNuts => "Tree Nuts",
            Allergen::Shellfish => "Shellfish",
            Allergen::Soy => "Soy",
            Allergen::Wheat => "Wheat",
        }
    }

    /// Look up the allergen an ingredient names, if any.
    pub fn from_ingredient(ingredient: &str) -> Option<Allergen> {
        let normalized = ingredient.to_lowercase();
        INGREDIENT_TABLE
            .iter()
            .find(|(key, _)| *key == normalized)
            .map(|(_, allergen)| *allergen)
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Allergen {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Allergen::ALL
            .into_iter()
            .find(|allergen| allergen.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownAllergen(s.to_string()))
    }
}
