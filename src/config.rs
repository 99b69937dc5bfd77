use recipe_core::{Allergen, Catalog, RecipeBook};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default port for the HTTP server
pub const DEFAULT_PORT: u16 = 8080;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// YAML catalog to load instead of the bundled recipes
    pub catalog_path: ConfigValue<Option<PathBuf>>,
    /// Allergens avoided from startup
    pub allergens: ConfigValue<Vec<Allergen>>,
    /// Port the HTTP server listens on
    pub port: ConfigValue<u16>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    catalog_path: Option<PathBuf>,
    allergens: Option<Vec<Allergen>>,
    port: Option<u16>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Load configuration, reading environment overrides through `env`.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut catalog_path = ConfigValue::new(None, ConfigSource::Default);
        let mut allergens = ConfigValue::new(Vec::new(), ConfigSource::Default);
        let mut port = ConfigValue::new(DEFAULT_PORT, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(catalog) = file_config.catalog_path {
                // Resolve relative paths against config file's directory
                let resolved_path = if catalog.is_relative() {
                    path.parent().map(|p| p.join(&catalog)).unwrap_or(catalog)
                } else {
                    catalog
                };
                catalog_path = ConfigValue::new(Some(resolved_path), ConfigSource::File);
            }
            if let Some(list) = file_config.allergens {
                allergens = ConfigValue::new(list, ConfigSource::File);
            }
            if let Some(p) = file_config.port {
                port = ConfigValue::new(p, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Some(catalog) = env("RECIPES_CATALOG_PATH") {
            catalog_path = ConfigValue::new(Some(PathBuf::from(catalog)), ConfigSource::Environment);
        }
        if let Some(list) = env("RECIPES_ALLERGENS") {
            let parsed = parse_allergen_list(&list)
                .map_err(|e| ConfigError::InvalidValue("RECIPES_ALLERGENS", e))?;
            allergens = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Some(p) = env("RECIPES_PORT") {
            let parsed = p
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RECIPES_PORT", format!("'{}' is not a port", p)))?;
            port = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        Ok(Self {
            catalog_path,
            allergens,
            port,
            config_file,
        })
    }

    /// Build the recipe book described by this configuration.
    pub fn recipe_book(&self) -> recipe_core::Result<RecipeBook> {
        let catalog = match &self.catalog_path.value {
            Some(path) => Catalog::load(path)?,
            None => Catalog::sample(),
        };
        Ok(RecipeBook::new(catalog).with_allergens(self.allergens.value.iter().copied()))
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/recipe-box/
    /// - macOS: ~/Library/Application Support/recipe-box/
    /// - Windows: %APPDATA%/recipe-box/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recipe-box")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Parse a comma-separated allergen list such as `eggs, treeNuts`.
pub fn parse_allergen_list(list: &str) -> Result<Vec<Allergen>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Allergen>().map_err(|e| e.to_string()))
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(var, message) => {
                write!(f, "Invalid value for {}: {}", var, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.catalog_path.value, None);
        assert_eq!(config.catalog_path.source, ConfigSource::Default);
        assert!(config.allergens.value.is_empty());
        assert_eq!(config.port.value, DEFAULT_PORT);
        assert_eq!(config.config_file, None);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "catalog_path: /custom/catalog.yaml").unwrap();
        writeln!(file, "allergens: [eggs, treeNuts]").unwrap();
        writeln!(file, "port: 9090").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(
            config.catalog_path.value,
            Some(PathBuf::from("/custom/catalog.yaml"))
        );
        assert_eq!(config.catalog_path.source, ConfigSource::File);
        assert_eq!(config.allergens.value, vec![Allergen::Eggs, Allergen::TreeNuts]);
        assert_eq!(config.allergens.source, ConfigSource::File);
        assert_eq!(config.port.value, 9090);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_catalog_path_resolves_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "catalog_path: recipes.yaml").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(
            config.catalog_path.value,
            Some(temp_dir.path().join("recipes.yaml"))
        );
    }

    fn env_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "allergens: [milk]").unwrap();
        writeln!(file, "port: 9090").unwrap();
        writeln!(file, "catalog_path: recipes.yaml").unwrap();

        let vars = [
            ("RECIPES_ALLERGENS", "soy, wheat"),
            ("RECIPES_PORT", "7070"),
        ];
        let config = Config::load_with_env(Some(config_path), env_from(&vars)).unwrap();
        assert_eq!(config.allergens.value, vec![Allergen::Soy, Allergen::Wheat]);
        assert_eq!(config.allergens.source, ConfigSource::Environment);
        assert_eq!(config.port.value, 7070);
        assert_eq!(config.port.source, ConfigSource::Environment);

        // Values without an override keep their file source
        assert_eq!(config.catalog_path.source, ConfigSource::File);
    }

    #[test]
    fn test_env_var_overrides_default() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let vars = [("RECIPES_CATALOG_PATH", "/srv/recipes.yaml")];
        let config = Config::load_with_env(Some(config_path), env_from(&vars)).unwrap();
        assert_eq!(
            config.catalog_path.value,
            Some(PathBuf::from("/srv/recipes.yaml"))
        );
        assert_eq!(config.catalog_path.source, ConfigSource::Environment);
        assert_eq!(config.port.source, ConfigSource::Default);
    }

    #[test]
    fn test_invalid_env_values() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let vars = [("RECIPES_ALLERGENS", "eggs, gluten")];
        let err = Config::load_with_env(Some(config_path.clone()), env_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("Invalid value for RECIPES_ALLERGENS"));

        let vars = [("RECIPES_PORT", "eighty")];
        let err = Config::load_with_env(Some(config_path), env_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("Invalid value for RECIPES_PORT"));
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_allergen_in_file_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "allergens: [gluten]").unwrap();

        assert!(Config::load(Some(config_path)).is_err());
    }

    #[test]
    fn test_parse_allergen_list() {
        assert_eq!(
            parse_allergen_list("eggs, Milk,,treenuts").unwrap(),
            vec![Allergen::Eggs, Allergen::Milk, Allergen::TreeNuts]
        );
        assert!(parse_allergen_list("").unwrap().is_empty());
        assert!(parse_allergen_list("eggs, nope").is_err());
    }

    #[test]
    fn test_recipe_book_from_config() {
        let temp_dir = tempdir().unwrap();
        let catalog_path = temp_dir.path().join("recipes.yaml");
        let config_path = temp_dir.path().join("config.yaml");

        let mut catalog = std::fs::File::create(&catalog_path).unwrap();
        writeln!(catalog, "- name: Omelette").unwrap();
        writeln!(catalog, "  ingredients: [Eggs]").unwrap();
        writeln!(catalog, "- name: Toast").unwrap();
        writeln!(catalog, "  ingredients: [Bread]").unwrap();

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "catalog_path: recipes.yaml").unwrap();
        writeln!(file, "allergens: [eggs]").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        let book = config.recipe_book().unwrap();
        assert_eq!(book.list_recipes().len(), 2);
        let filtered: Vec<&str> = book.filter_recipes().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(filtered, vec!["Toast"]);
    }

    #[test]
    fn test_recipe_book_defaults_to_sample_catalog() {
        let temp_dir = tempdir().unwrap();
        let config = Config::load(Some(temp_dir.path().join("none.yaml"))).unwrap();
        let book = config.recipe_book().unwrap();
        assert_eq!(book.list_recipes().len(), 5);
    }
}
