//! # po-config
//!
//! Layered configuration loading for the purchase order tools using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`POADM_*` prefix, `__` as separator)
//! 2. Project-level `.poadmin/config.toml`
//! 3. User-level `~/.config/poadmin/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `POADM_CACHE__STALE_AFTER_SECS` -> `cache.stale_after_secs`,
//! `POADM_TRANSITIONS__CANCEL_REQUIRES` -> `transitions.cancel_requires`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! The `[cache]` section is for library consumers that hold a
//! [`po_core::cache::QueryCache`]; `poadm` only validates it.
//!
//! # Usage
//!
//! ```no_run
//! use po_config::PoConfig;
//!
//! let config = PoConfig::load_with_dotenv().expect("config");
//! let policy = config.transitions.policy();
//! println!("cancel gate: {:?}", policy.cancel_requires);
//! ```

mod cache;
mod error;
mod general;
mod transitions;

pub use cache::CacheConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use transitions::TransitionsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".poadmin/config.toml";

const ENV_PREFIX: &str = "POADM_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub transitions: TransitionsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl PoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`PoConfig::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is out of
    /// range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`PoConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Load configuration with an explicit TOML file layered above the
    /// discovered ones but below environment variables.
    ///
    /// # Errors
    ///
    /// See [`PoConfig::load`].
    pub fn load_with_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let figment = Self::file_layers()
            .merge(Toml::file(path.into()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(&figment)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::file_layers().merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`PoConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(
            self.general.default_format.as_str(),
            "json" | "table" | "raw"
        ) {
            return Err(ConfigError::InvalidValue {
                field: "general.default_format".into(),
                reason: format!(
                    "expected one of json, table, raw; got '{}'",
                    self.general.default_format
                ),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        self.cache.validate()
    }

    fn file_layers() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("poadmin").join("config.toml"))
    }

    /// Load `.env` from the current directory. Silently does nothing if no
    /// `.env` is found.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
