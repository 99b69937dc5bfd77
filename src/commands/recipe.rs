use clap::{Args, Subcommand};
use recipe_core::{Recipe, RecipeBook};
use std::io::{self, Write};

use super::OutputFormat;

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// List recipes that avoid your allergens
    List {
        /// Include recipes containing avoided allergens
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a recipe's ingredients and instructions
    Show {
        /// Recipe ID (UUID) or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl RecipeCommand {
    pub fn run(&self, book: &RecipeBook) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            RecipeSubcommand::List { all, format } => {
                let recipes: Vec<&Recipe> = if *all {
                    book.list_recipes().iter().collect()
                } else {
                    book.filter_recipes()
                };

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipes)?);
                    }
                    OutputFormat::Text => {
                        write_recipe_table(&mut io::stdout(), book, &recipes)?;
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Show { identifier, format } => {
                let recipe = book.find_recipe(identifier)?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(recipe)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", recipe);
                    }
                }
                Ok(())
            }
        }
    }
}

/// Write recipes as a table, marking favorites with a heart.
pub fn write_recipe_table<W: Write>(
    out: &mut W,
    book: &RecipeBook,
    recipes: &[&Recipe],
) -> io::Result<()> {
    if recipes.is_empty() {
        return writeln!(out, "No recipes found");
    }

    writeln!(out, "   {:<36}  {:<30}  INGREDIENTS", "ID", "NAME")?;
    writeln!(out, "{}", "-".repeat(100))?;
    for recipe in recipes {
        let marker = if book.is_favorite(recipe.id) { "♥" } else { " " };
        let name = if recipe.name.chars().count() > 30 {
            format!("{}...", recipe.name.chars().take(27).collect::<String>())
        } else {
            recipe.name.clone()
        };
        writeln!(
            out,
            "{}  {:<36}  {:<30}  {}",
            marker,
            recipe.id,
            name,
            recipe.ingredients.join(", ")
        )?;
    }
    writeln!(out, "\nTotal: {} recipe(s)", recipes.len())
}
