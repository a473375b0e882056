use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::{BOARD_STATE_KEY, USER_PREFS_KEY};

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HUNTBOARD_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_persist_debounce_ms")]
    pub persist_debounce_ms: u64,
    #[serde(default = "default_board_key")]
    pub board_key: String,
    #[serde(default = "default_prefs_key")]
    pub prefs_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist_debounce_ms: default_persist_debounce_ms(),
            board_key: default_board_key(),
            prefs_key: default_prefs_key(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub const fn persist_debounce(&self) -> Duration {
        Duration::from_millis(self.persist_debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Read `<data_dir>/config.toml`, or defaults when the file does not exist.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or is not valid TOML for
/// [`HuntConfig`].
pub fn load_config(data_dir: &Path) -> Result<HuntConfig> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(HuntConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<HuntConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if config.storage.board_key == config.storage.prefs_key {
        bail!(
            "Invalid {}: storage.board_key and storage.prefs_key must differ",
            path.display()
        );
    }
    Ok(config)
}

/// Source of environment variables, swappable in tests.
pub trait EnvReader {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment. Empty values count as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Resolve the data directory: explicit flag, then `HUNTBOARD_DIR`, then
/// the platform data directory.
///
/// # Errors
///
/// Fails only when neither override is set and the platform has no data
/// directory.
pub fn resolve_data_dir(cli_flag: Option<&Path>) -> Result<PathBuf> {
    resolve_data_dir_with(cli_flag, &ProcessEnv, dirs::data_dir())
}

fn resolve_data_dir_with(
    cli_flag: Option<&Path>,
    env: &dyn EnvReader,
    platform_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = cli_flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env.get(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    platform_dir
        .map(|dir| dir.join("huntboard"))
        .with_context(|| format!("No data directory found; pass --data-dir or set {DATA_DIR_ENV}"))
}

const fn default_persist_debounce_ms() -> u64 {
    500
}

fn default_board_key() -> String {
    BOARD_STATE_KEY.to_string()
}

fn default_prefs_key() -> String {
    USER_PREFS_KEY.to_string()
}

const fn default_search_debounce_ms() -> u64 {
    300
}
