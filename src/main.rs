use clap::{Parser, Subcommand};
use recipe_core::Allergen;
use std::io;
use std::path::PathBuf;

mod commands;

use commands::{AllergenCommand, ConfigCommand, RecipeCommand, Session};
use recipe_box::config::Config;

#[derive(Parser)]
#[command(name = "recipes")]
#[command(version)]
#[command(about = "Browse recipes, filter by allergens and keep favorites", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Avoid an allergen in addition to the configured ones (can be repeated)
    #[arg(long, global = true, value_name = "ALLERGEN")]
    avoid: Vec<Allergen>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse recipes
    Recipe(RecipeCommand),

    /// Show allergens
    Allergen(AllergenCommand),

    /// Start an interactive session to manage favorites and allergens
    Shell,

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    let mut book = config.recipe_book()?;
    for allergen in &cli.avoid {
        book.toggle_allergen(*allergen, true);
    }
    tracing::debug!(
        recipes = book.list_recipes().len(),
        allergens = book.user_allergens().len(),
        "Recipe book ready"
    );

    match cli.command {
        Some(Commands::Recipe(cmd)) => {
            cmd.run(&book)?;
        }
        Some(Commands::Allergen(cmd)) => {
            cmd.run(&book)?;
        }
        Some(Commands::Shell) => {
            let stdin = io::stdin();
            Session::new(&mut book).run(stdin.lock(), &mut io::stdout())?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
