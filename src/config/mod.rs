//! Configuration module

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::validate::ContentPolicy;

/// Name of the project-local store directory
pub const STORE_DIR_NAME: &str = ".easy-memory";

/// Config file name inside the store directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Explicit store directory (overrides discovery)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentConfig {
    /// Characters allowed in entry content (`utf8` or `ascii`)
    #[serde(default)]
    pub charset: ContentPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub default_limit: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> i64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Agent-instructions file next to the store directory
    #[serde(default = "default_rules_file")]
    pub file: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            file: default_rules_file(),
        }
    }
}

fn default_rules_file() -> String {
    "AGENTS.md".to_string()
}

impl Config {
    /// Load config from default locations
    pub fn load() -> Result<Self> {
        // Try local config first, then global
        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load from an explicit file if given, else from default locations
    pub fn load_with(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Config and store directory for one invocation
    ///
    /// Without an explicit config file, `<store_dir>/config.toml` (the file
    /// `emem config` edits) takes precedence over the discovered one.
    pub fn resolve(explicit: Option<&Path>, override_dir: Option<&Path>) -> Result<(Self, PathBuf)> {
        let config = Self::load_with(explicit)?;
        let store_dir = config.store_dir(override_dir);

        let store_config = store_dir.join(CONFIG_FILE_NAME);
        if explicit.is_none() && store_config.is_file() {
            return Ok((Self::load_from(&store_config)?, store_dir));
        }

        Ok((config, store_dir))
    }

    /// Find local .easy-memory/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(STORE_DIR_NAME).join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Find an existing .easy-memory/ directory walking up directories
    pub fn find_local_store() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let store_dir = current.join(STORE_DIR_NAME);
            if store_dir.is_dir() {
                return Some(store_dir);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get global config path (~/.easy-memory/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        directories::UserDirs::new()
            .map(|u| u.home_dir().join(STORE_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Store directory with priority:
    /// 1. `--dir` / `EMEM_DIR`
    /// 2. `[store] dir` from config
    /// 3. Existing .easy-memory/ (searching up from the working directory)
    /// 4. ./.easy-memory
    pub fn store_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }

        if let Some(dir) = &self.store.dir {
            return dir.clone();
        }

        Self::find_local_store().unwrap_or_else(|| PathBuf::from(STORE_DIR_NAME))
    }

    /// Agent-instructions file that sits next to the store directory
    pub fn rules_path(&self, store_dir: &Path) -> PathBuf {
        match store_dir.parent() {
            Some(parent) => parent.join(&self.rules.file),
            None => PathBuf::from(&self.rules.file),
        }
    }
}
