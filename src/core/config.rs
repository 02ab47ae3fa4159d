//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.fruitlist/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::record::{Record, seed_records};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FruitConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    /// Replaces the seed data when present. An explicit empty list means an
    /// empty store.
    pub records: Option<Vec<Record>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub new_record_key: Option<String>,
    pub list_width: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NEW_RECORD_KEY: &str = "ctrl+n";
pub const DEFAULT_LIST_WIDTH: u16 = 30;
pub const NEW_RECORD_KEY_ENV: &str = "FRUITLIST_NEW_RECORD_KEY";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub new_record_key: String,
    pub list_width: u16,
    pub records: Vec<Record>,
}

/// Values taken from command-line flags. `None`/`false` = not specified.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub new_record_key: Option<&'a str>,
    pub empty: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.fruitlist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fruitlist").join("config.toml"))
}

/// Load config from `explicit` if given, otherwise from `~/.fruitlist/config.toml`.
///
/// An explicit path must exist. If the default file doesn't exist, a
/// commented-out template is generated and `FruitConfig::default()` is
/// returned.
pub fn load_config(explicit: Option<&Path>) -> Result<FruitConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config_file(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FruitConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FruitConfig::default());
    }

    read_config_file(&path)
}

/// Read and parse a config file.
pub fn read_config_file(path: &Path) -> Result<FruitConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FruitConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# fruitlist configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# new_record_key = "ctrl+n"          # Or set FRUITLIST_NEW_RECORD_KEY
# list_width = 30

# Replaces the built-in seed records. `records = []` starts empty.
# [[records]]
# name = "Apple"
# color = "Green"

# [[records]]
# name = "Kiwi"
# color = "Brown"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FruitConfig, cli: CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, std::env::var(NEW_RECORD_KEY_ENV).ok())
}

fn resolve_with_env(
    config: &FruitConfig,
    cli: CliOverrides<'_>,
    env_new_record_key: Option<String>,
) -> ResolvedConfig {
    // New record key: CLI → env → config → default
    let new_record_key = cli
        .new_record_key
        .map(|s| s.to_string())
        .or(env_new_record_key)
        .or_else(|| config.general.new_record_key.clone())
        .unwrap_or_else(|| DEFAULT_NEW_RECORD_KEY.to_string());

    // Records: --empty → config → seed
    let records = if cli.empty {
        Vec::new()
    } else {
        config.records.clone().unwrap_or_else(seed_records)
    };

    ResolvedConfig {
        new_record_key,
        list_width: config.general.list_width.unwrap_or(DEFAULT_LIST_WIDTH),
        records,
    }
}
