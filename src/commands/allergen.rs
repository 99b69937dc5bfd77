use clap::{Args, Subcommand};
use recipe_core::{Allergen, RecipeBook};
use serde::Serialize;
use std::io::{self, Write};

use super::OutputFormat;

#[derive(Args)]
pub struct AllergenCommand {
    #[command(subcommand)]
    pub command: AllergenSubcommand,
}

#[derive(Subcommand)]
pub enum AllergenSubcommand {
    /// List every allergen and whether it is avoided
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Serialize)]
struct AllergenStatus {
    allergen: Allergen,
    label: &'static str,
    enabled: bool,
}

impl AllergenCommand {
    pub fn run(&self, book: &RecipeBook) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            AllergenSubcommand::List { format } => {
                match format {
                    OutputFormat::Json => {
                        let statuses: Vec<AllergenStatus> = Allergen::ALL
                            .iter()
                            .map(|a| AllergenStatus {
                                allergen: *a,
                                label: a.label(),
                                enabled: book.is_avoided(*a),
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&statuses)?);
                    }
                    OutputFormat::Text => {
                        write_allergen_list(&mut io::stdout(), book)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Write one line per allergen with an `[x]` marker for avoided ones.
pub fn write_allergen_list<W: Write>(out: &mut W, book: &RecipeBook) -> io::Result<()> {
    for allergen in Allergen::ALL {
        let marker = if book.is_avoided(allergen) { "x" } else { " " };
        writeln!(out, "[{}] {:<10} ({})", marker, allergen.label(), allergen)?;
    }
    Ok(())
}
