//! Recipe Box Server
//!
//! Serves the recipe catalog, allergen filtering and favorites over HTTP.
//! State is held in memory for the lifetime of the process.
//!
//! # Configuration
//!
//! Reads the same config file as the `recipes` CLI
//! (default: ~/.config/recipe-box/config.yaml). Environment variables:
//! - `RECIPES_CONFIG`: Path to config file
//! - `RECIPES_PORT`: Port to listen on (default: 8080)
//! - `RECIPES_CATALOG_PATH`: YAML catalog to serve instead of the bundled recipes
//! - `RECIPES_ALLERGENS`: Comma-separated allergens avoided at startup
//!
//! See `recipe_box::server::routes` for the endpoints.

use recipe_box::config::Config;
use recipe_box::server::{router, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipes_server=info,recipe_box=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("RECIPES_CONFIG").ok().map(PathBuf::from);
    let config = Config::load(config_path)?;

    match &config.config_file {
        Some(path) => tracing::info!("Config file: {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }

    let book = config.recipe_book()?;
    match &config.catalog_path.value {
        Some(path) => tracing::info!(
            "Loaded {} recipe(s) from {}",
            book.list_recipes().len(),
            path.display()
        ),
        None => tracing::info!("Serving {} bundled recipe(s)", book.list_recipes().len()),
    }
    if !book.user_allergens().is_empty() {
        let avoided: Vec<String> = book.user_allergens().iter().map(|a| a.to_string()).collect();
        tracing::info!("Avoiding allergens: {}", avoided.join(", "));
    }

    let app = router(AppState::new(book));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port.value));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
