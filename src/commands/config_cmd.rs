use clap::{Args, Subcommand};
use recipe_box::config::Config;

use super::OutputFormat;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        match &config.catalog_path.value {
                            Some(path) => println!("catalog_path: {}", path.display()),
                            None => println!("catalog_path: (bundled recipes)"),
                        }
                        println!("  source: {}", config.catalog_path.source);
                        println!();

                        let allergens: Vec<String> =
                            config.allergens.value.iter().map(|a| a.to_string()).collect();
                        if allergens.is_empty() {
                            println!("allergens: (none)");
                        } else {
                            println!("allergens: {}", allergens.join(", "));
                        }
                        println!("  source: {}", config.allergens.source);
                        println!();

                        println!("port: {}", config.port.value);
                        println!("  source: {}", config.port.source);
                    }
                }
                Ok(())
            }
        }
    }
}
