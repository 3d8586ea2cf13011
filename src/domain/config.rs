use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// Configuration for the favorites store and the reference-data client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Location of the favorites document.
    ///
    /// Relative paths are resolved against the project root.
    database: PathBuf,

    /// Settings for the remote API.
    pub api: ApiConfig,
}

/// Settings for the remote reference-data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the resource endpoints are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Creates a configuration pointing at a different base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// The per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The configured database path, as written.
    #[must_use]
    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Sets the database path.
    pub fn set_database(&mut self, path: impl Into<PathBuf>) {
        self.database = path.into();
    }

    /// Resolves the database path against a project root.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn database_path(&self, root: &Path) -> PathBuf {
        if self.database.is_absolute() {
            self.database.clone()
        } else {
            root.join(&self.database)
        }
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("data").join("local_db.json")
}

fn default_base_url() -> String {
    "https://swapi.dev/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "MCP-Workshop-Client/1.0".to_string()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_database")]
        database: PathBuf,

        #[serde(default)]
        api: ApiConfig,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { database, api } => Self { database, api },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            database: config.database,
            api: config.api,
        }
    }
}
