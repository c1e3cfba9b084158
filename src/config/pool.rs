//! Pool and scheduler configuration structures.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, Pool, DEFAULT_POOL_NAME, DEFAULT_POOL_SLOTS, MAX_POOL_NAME_LEN};

/// Environment variable naming the JSON pool configuration file.
pub const CONFIG_PATH_ENV: &str = "POOL_GATE_CONFIG";

/// Pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Total slots in the pool.
    pub slots: u32,
    /// Whether deferred task instances count against the slots.
    #[serde(default)]
    pub include_deferred: bool,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Root scheduler configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Map of pool name to configuration.
    #[serde(default)]
    pub pools: HashMap<String, PoolConfig>,
}

impl PoolConfig {
    /// Validate pool configuration values.
    ///
    /// `slots` is unsigned, so any value is acceptable; a zero-slot pool only
    /// admits task instances that already hold a slot.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(desc) = &self.description {
            if desc.chars().count() > 4096 {
                return Err("description must be at most 4096 characters".into());
            }
        }
        Ok(())
    }

    /// Turn this entry into a pool named `name`.
    pub fn to_pool(&self, name: &str) -> Pool {
        Pool {
            name: name.to_string(),
            slot_limit: self.slots,
            include_deferred: self.include_deferred,
            description: self.description.clone(),
        }
    }
}

impl SchedulerConfig {
    /// Validate all pools.
    pub fn validate(&self) -> Result<(), String> {
        for (name, pool) in &self.pools {
            if name.trim().is_empty() {
                return Err("pool name must not be empty".into());
            }
            if name.chars().count() > MAX_POOL_NAME_LEN {
                return Err(format!(
                    "pool `{name}` invalid: name longer than {MAX_POOL_NAME_LEN} characters"
                ));
            }
            pool.validate()
                .map_err(|e| format!("pool `{name}` invalid: {e}"))?;
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading pool config {}", path.display()))?;
        Self::from_json_str(&raw)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading pool config {}", path.display()))
    }

    /// Add the default pool unless an entry already overrides it.
    #[must_use]
    pub fn with_default_pool(mut self) -> Self {
        self.pools
            .entry(DEFAULT_POOL_NAME.to_string())
            .or_insert_with(|| PoolConfig {
                slots: DEFAULT_POOL_SLOTS,
                include_deferred: false,
                description: Some("Default pool".to_string()),
            });
        self
    }
}

/// Load configuration the way a deployed scheduler does.
///
/// Reads `.env` if present, then the file named by [`CONFIG_PATH_ENV`]. Without
/// that variable only the default pool is configured. A `.env` that exists but
/// cannot be read or parsed is an error.
pub fn load_from_env() -> AppResult<SchedulerConfig> {
    finish_load(dotenvy::dotenv().map(|_| ()))
}

/// Same as [`load_from_env`] with an explicit dotenv file instead of the
/// `.env` found by searching from the working directory.
pub fn load_from_env_file(dotenv_path: impl AsRef<Path>) -> AppResult<SchedulerConfig> {
    finish_load(dotenvy::from_path(dotenv_path.as_ref()))
}

fn finish_load(dotenv: Result<(), dotenvy::Error>) -> AppResult<SchedulerConfig> {
    match dotenv {
        Ok(()) => {}
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => return Err(e).context("loading .env"),
    }
    let cfg = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => SchedulerConfig::from_file(&path)?,
        Err(std::env::VarError::NotPresent) => {
            tracing::debug!("{} not set, using default pool only", CONFIG_PATH_ENV);
            SchedulerConfig::default()
        }
        Err(e) => return Err(e).with_context(|| format!("reading {CONFIG_PATH_ENV}")),
    };
    Ok(cfg.with_default_pool())
}
