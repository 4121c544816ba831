//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::retailer::Retailer;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the current directory.
const LOCAL_CONFIG: &str = "grocery-csv.toml";

/// Constant metadata attached to every record from one retailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetailerProfile {
    /// Source tag written to the `source_id` column
    pub source_id: String,
    /// Country code written to the `countries` column
    pub country: String,
    /// Taxonomy tags written to the `categories_tags` column
    pub categories_tags: String,
    /// Category names written to the `categories_en` column
    pub categories_en: String,
    /// Brand used when a container has none
    pub brand_fallback: String,
}

impl RetailerProfile {
    /// Returns the built-in profile for a retailer.
    pub fn builtin(retailer: Retailer) -> Self {
        Self {
            source_id: retailer.to_string(),
            country: "GB".to_string(),
            categories_tags: "en:groceries".to_string(),
            categories_en: "Groceries".to_string(),
            brand_fallback: retailer.name().to_string(),
        }
    }
}

/// Per-field overrides for a retailer profile. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverrides {
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub categories_tags: Option<String>,
    #[serde(default)]
    pub categories_en: Option<String>,
    #[serde(default)]
    pub brand_fallback: Option<String>,
}

impl ProfileOverrides {
    /// Applies the overrides on top of a base profile.
    pub fn apply(&self, mut profile: RetailerProfile) -> RetailerProfile {
        let fields = [
            (&self.source_id, &mut profile.source_id),
            (&self.country, &mut profile.country),
            (&self.categories_tags, &mut profile.categories_tags),
            (&self.categories_en, &mut profile.categories_en),
            (&self.brand_fallback, &mut profile.brand_fallback),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        profile
    }
}

/// Application configuration with layered loading.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Output path used when a converter allows omitting it
    #[serde(default = "default_output")]
    pub default_output: PathBuf,

    /// Meadow profile overrides
    #[serde(default)]
    pub meadow: ProfileOverrides,

    /// Harbour profile overrides
    #[serde(default)]
    pub harbour: ProfileOverrides,
}

fn default_output() -> PathBuf {
    PathBuf::from("main.csv")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_output: default_output(),
            meadow: ProfileOverrides::default(),
            harbour: ProfileOverrides::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new(LOCAL_CONFIG);
        if local_config.exists() {
            debug!("Found {} in current directory", LOCAL_CONFIG);
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("grocery-csv").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(output) = lookup("GROCERY_CSV_OUTPUT") {
            if !output.trim().is_empty() {
                self.default_output = PathBuf::from(output);
            }
        }

        self
    }

    /// Returns the effective profile for a retailer.
    pub fn profile(&self, retailer: Retailer) -> RetailerProfile {
        let overrides = match retailer {
            Retailer::Meadow => &self.meadow,
            Retailer::Harbour => &self.harbour,
        };
        overrides.apply(RetailerProfile::builtin(retailer))
    }
}
