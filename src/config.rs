// Application configuration
// Defaults reproduce the stock gallery; an optional config.json overrides them

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "artvue.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Local-storage keys used by the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub artworks: String,
    pub favorites: String,
    pub authenticated: String,
    pub admin: String,
}

impl StorageKeys {
    /// Keys for a given namespace: `<ns>_artworks` and `<ns>Favorites`
    pub fn namespaced(namespace: &str) -> Self {
        StorageKeys {
            artworks: format!("{}_artworks", namespace),
            favorites: format!("{}Favorites", namespace),
            ..Default::default()
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys {
            artworks: "artvue_artworks".to_string(),
            favorites: "artFavorites".to_string(),
            authenticated: "isAuthenticated".to_string(),
            admin: "isAdmin".to_string(),
        }
    }
}

/// Simulated round-trip latency per record-store operation, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyProfile {
    pub list_ms: u64,
    pub get_ms: u64,
    pub insert_ms: u64,
    pub update_ms: u64,
}

impl LatencyProfile {
    /// No artificial waiting at all
    pub fn none() -> Self {
        LatencyProfile {
            list_ms: 0,
            get_ms: 0,
            insert_ms: 0,
            update_ms: 0,
        }
    }

    pub fn list(&self) -> Duration {
        Duration::from_millis(self.list_ms)
    }

    pub fn get(&self) -> Duration {
        Duration::from_millis(self.get_ms)
    }

    pub fn insert(&self) -> Duration {
        Duration::from_millis(self.insert_ms)
    }

    pub fn update(&self) -> Duration {
        Duration::from_millis(self.update_ms)
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        LatencyProfile {
            list_ms: 500,
            get_ms: 300,
            insert_ms: 800,
            update_ms: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub keys: StorageKeys,
    /// Domain used to derive user e-mail addresses
    pub email_domain: String,
    pub latency: LatencyProfile,
    /// Delay before the demo video list appears
    pub video_delay_ms: u64,
    /// Write the demo catalogue when no artworks are stored yet
    pub seed_catalog: bool,
    /// Database file; defaults to `artvue.db` in the app data directory
    pub db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            keys: StorageKeys::default(),
            email_domain: "artvue.com".to_string(),
            latency: LatencyProfile::default(),
            video_delay_ms: 1200,
            seed_catalog: true,
            db_path: None,
        }
    }
}

impl AppConfig {
    /// Configuration for tests and scripted use: no latency, no seed data
    pub fn instant() -> Self {
        AppConfig {
            latency: LatencyProfile::none(),
            video_delay_ms: 0,
            seed_catalog: false,
            ..Default::default()
        }
    }

    /// Load `config.json` from `dir`, falling back to defaults when absent
    pub fn load_from_dir(dir: &Path) -> ConfigResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Database location, resolved against `data_dir` when not set explicitly
    pub fn resolve_db_path(&self, data_dir: &Path) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| data_dir.join(DB_FILE_NAME))
    }

    pub fn video_delay(&self) -> Duration {
        Duration::from_millis(self.video_delay_ms)
    }
}
