//! # raceday-config
//!
//! Layered configuration loading for Raceday using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RACEDAY_*` prefix, `__` as separator)
//! 2. Project-level `.raceday/config.toml`
//! 3. User-level `~/.config/raceday/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RACEDAY_STORAGE__BUCKET_NAME` -> `storage.bucket_name`,
//! `RACEDAY_GENERAL__FOLDER_PREFIX` -> `general.folder_prefix`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use raceday_config::RacedayConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = RacedayConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = RacedayConfig::load().expect("config");
//!
//! if config.storage.is_configured() {
//!     println!("bucket: {}", config.storage.bucket_name);
//! }
//! ```

mod error;
mod general;
mod storage;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use storage::StorageConfig;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RacedayConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RacedayConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`RACEDAY_*` prefix)
    /// 2. `.raceday/config.toml` (project-local)
    /// 3. `~/.config/raceday/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for services and
    /// tests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".raceday/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("RACEDAY_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("raceday").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        // In tests/build: CARGO_MANIFEST_DIR points to the crate dir.
        // Walk up to find workspace root's .env.
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 2 levels (crate -> crates/ -> workspace root)
            for _ in 0..2 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = RacedayConfig::default();
        assert!(!config.storage.is_configured());
        assert_eq!(config.general.folder_prefix, "race-schedule");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_| {
            let figment = RacedayConfig::figment();
            let config: RacedayConfig = figment.extract().expect("should extract defaults");
            assert!(!config.storage.is_configured());
            assert_eq!(config.general.fetch_window_days, 31);
            Ok(())
        });
    }

    #[test]
    fn env_vars_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("RACEDAY_STORAGE__BUCKET_NAME", "schedules-prod");
            jail.set_env("RACEDAY_STORAGE__ACCESS_KEY_ID", "key");
            jail.set_env("RACEDAY_STORAGE__SECRET_ACCESS_KEY", "secret");
            let config: RacedayConfig = RacedayConfig::figment().extract()?;
            assert_eq!(config.storage.bucket_name, "schedules-prod");
            assert!(config.storage.is_configured());
            Ok(())
        });
    }

    #[test]
    fn project_toml_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".raceday")?;
            jail.create_file(
                ".raceday/config.toml",
                r#"
                [general]
                folder_prefix = "race-schedule-dev"

                [storage]
                bucket_name = "from-toml"
                "#,
            )?;
            jail.set_env("RACEDAY_STORAGE__BUCKET_NAME", "from-env");
            let config: RacedayConfig = RacedayConfig::figment().extract()?;
            assert_eq!(config.general.folder_prefix, "race-schedule-dev");
            assert_eq!(config.storage.bucket_name, "from-env");
            Ok(())
        });
    }
}
