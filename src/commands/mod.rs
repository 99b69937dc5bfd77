use clap::ValueEnum;

pub mod allergen;
mod config_cmd;
pub mod recipe;
pub mod shell;

pub use allergen::AllergenCommand;
pub use config_cmd::ConfigCommand;
pub use recipe::RecipeCommand;
pub use shell::Session;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
