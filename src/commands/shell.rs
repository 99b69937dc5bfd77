//! Interactive session over a single recipe book.
//!
//! Favorites and allergens only live as long as the process, so the shell is
//! where they can be toggled and observed together.

use recipe_core::{Allergen, Recipe, RecipeBook};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use super::allergen::write_allergen_list;
use super::recipe::write_recipe_table;

const HELP: &str = "\
Commands:
  list               Recipes that avoid your allergens
  all                Every recipe in the catalog
  show <recipe>      Ingredients and instructions (ID or name)
  fav <recipe>       Add a recipe to your favorites
  unfav <recipe>     Remove a recipe from your favorites
  favorites          Your favorite recipes
  avoid <allergen>   Hide recipes containing an allergen
  allow <allergen>   Stop hiding recipes containing an allergen
  allergens          Every allergen and whether it is avoided
  help               This message
  quit               Leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    List,
    All,
    Show(String),
    Favorite(String),
    Unfavorite(String),
    Favorites,
    Avoid(Allergen),
    Allow(Allergen),
    Allergens,
    Help,
    Quit,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (line, ""),
        };

        let require = |usage: &str| {
            if arg.is_empty() {
                Err(format!("Usage: {}", usage))
            } else {
                Ok(arg.to_string())
            }
        };
        let allergen = |usage: &str| -> Result<Allergen, String> {
            require(usage)?.parse().map_err(|e: recipe_core::Error| e.to_string())
        };

        match word.to_lowercase().as_str() {
            "list" => Ok(Action::List),
            "all" => Ok(Action::All),
            "show" => require("show <recipe>").map(Action::Show),
            "fav" => require("fav <recipe>").map(Action::Favorite),
            "unfav" => require("unfav <recipe>").map(Action::Unfavorite),
            "favorites" | "favs" => Ok(Action::Favorites),
            "avoid" => allergen("avoid <allergen>").map(Action::Avoid),
            "allow" => allergen("allow <allergen>").map(Action::Allow),
            "allergens" => Ok(Action::Allergens),
            "help" | "?" => Ok(Action::Help),
            "quit" | "exit" => Ok(Action::Quit),
            _ => Err(format!(
                "Unknown command '{}'. Type 'help' for commands.",
                word
            )),
        }
    }
}

pub struct Session<'a> {
    book: &'a mut RecipeBook,
}

impl<'a> Session<'a> {
    pub fn new(book: &'a mut RecipeBook) -> Self {
        Self { book }
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "Recipe Box. Type 'help' for commands.")?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                match line.parse::<Action>() {
                    Ok(Action::Quit) => return Ok(()),
                    Ok(action) => self.execute(action, out)?,
                    Err(message) => writeln!(out, "{}", message)?,
                }
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)
    }

    /// Apply one action, writing its result. Lookup failures are reported
    /// to `out` and leave the session running.
    pub fn execute<W: Write>(&mut self, action: Action, out: &mut W) -> io::Result<()> {
        match action {
            Action::List => {
                let recipes = self.book.filter_recipes();
                write_recipe_table(out, self.book, &recipes)
            }
            Action::All => {
                let recipes: Vec<&Recipe> = self.book.list_recipes().iter().collect();
                write_recipe_table(out, self.book, &recipes)
            }
            Action::Show(key) => match self.book.find_recipe(&key) {
                Ok(recipe) => {
                    let heart = if self.book.is_favorite(recipe.id) { "♥ " } else { "" };
                    write!(out, "{}{}", heart, recipe)
                }
                Err(e) => writeln!(out, "Error: {}", e),
            },
            Action::Favorite(key) => {
                let (id, name) = match self.book.find_recipe(&key) {
                    Ok(recipe) => (recipe.id, recipe.name.clone()),
                    Err(e) => return writeln!(out, "Error: {}", e),
                };
                match self.book.add_to_favorites(id) {
                    Ok(true) => {
                        tracing::debug!("Added favorite {}", id);
                        writeln!(out, "Added '{}' to favorites", name)
                    }
                    Ok(false) => writeln!(out, "'{}' is already a favorite", name),
                    Err(e) => writeln!(out, "Error: {}", e),
                }
            }
            Action::Unfavorite(key) => {
                let (id, name) = match self.book.find_recipe(&key) {
                    Ok(recipe) => (recipe.id, recipe.name.clone()),
                    Err(e) => return writeln!(out, "Error: {}", e),
                };
                match self.book.remove_from_favorites(id) {
                    Ok(true) => {
                        tracing::debug!("Removed favorite {}", id);
                        writeln!(out, "Removed '{}' from favorites", name)
                    }
                    Ok(false) => writeln!(out, "'{}' is not a favorite", name),
                    Err(e) => writeln!(out, "Error: {}", e),
                }
            }
            Action::Favorites => {
                let favorites = self.book.list_favorites();
                if favorites.is_empty() {
                    return writeln!(out, "No favorites yet");
                }
                for (index, recipe) in favorites.iter().enumerate() {
                    writeln!(out, "{}. {}", index + 1, recipe.name)?;
                }
                Ok(())
            }
            Action::Avoid(allergen) => {
                if self.book.toggle_allergen(allergen, true) {
                    tracing::debug!("Avoiding {}", allergen);
                }
                writeln!(out, "Avoiding {}", allergen.label())
            }
            Action::Allow(allergen) => {
                if self.book.toggle_allergen(allergen, false) {
                    tracing::debug!("Allowing {}", allergen);
                }
                writeln!(out, "Allowing {}", allergen.label())
            }
            Action::Allergens => write_allergen_list(out, self.book),
            Action::Help => writeln!(out, "{}", HELP),
            Action::Quit => Ok(()),
        }
    }
}
