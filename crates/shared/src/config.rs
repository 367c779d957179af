//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Document store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Seed configuration.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Document store configuration.
///
/// The remote backend is opaque to the core; these settings only identify
/// which logical database and collection namespace a session talks to.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Logical project/database identifier for the remote document store.
    #[serde(default = "default_project")]
    pub project: String,
    /// Prefix applied to every collection name (e.g. "dev_" in development).
    #[serde(default)]
    pub collection_prefix: String,
}

fn default_project() -> String {
    "quipu-local".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            collection_prefix: String::new(),
        }
    }
}

/// Seed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Whether to seed the default chart of accounts when the accounts
    /// collection is empty at startup.
    #[serde(default = "default_seed_on_bootstrap")]
    pub on_bootstrap: bool,
}

fn default_seed_on_bootstrap() -> bool {
    true
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            on_bootstrap: default_seed_on_bootstrap(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("QUIPU").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
