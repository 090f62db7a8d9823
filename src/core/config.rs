//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.eduhub/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EduHubConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub downloads_dir: Option<String>,
    pub theme: Option<Theme>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NetworkConfig {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DOWNLOADS_DIR: &str = "downloads";
pub const DEFAULT_TIMEOUT_SECS: u64 = crate::core::downloads::DEFAULT_TIMEOUT.as_secs();

fn default_user_agent() -> String {
    format!("eduhub/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub downloads_dir: PathBuf,
    pub theme: Theme,
    pub timeout: Duration,
    pub user_agent: String,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub downloads_dir: Option<PathBuf>,
    pub theme: Option<Theme>,
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

/// Returns the path to `~/.eduhub/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".eduhub").join("config.toml"))
}

/// Load config from `~/.eduhub/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `EduHubConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<EduHubConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(EduHubConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<EduHubConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(EduHubConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: EduHubConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# EduHub Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# downloads_dir = "downloads"        # Relative paths resolve against the working directory
# theme = "light"                    # "light" or "dark"

# [network]
# timeout_secs = 30                  # Applies to resource downloads only
# user_agent = "eduhub/0.1.0"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &EduHubConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &EduHubConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Downloads dir: CLI → env → config → default
    let downloads_dir = cli
        .downloads_dir
        .clone()
        .or_else(|| env("EDUHUB_DOWNLOADS_DIR").map(PathBuf::from))
        .or_else(|| config.general.downloads_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOADS_DIR));

    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .or_else(|| env("EDUHUB_THEME").and_then(|s| parse_theme(&s)))
        .or(config.general.theme)
        .unwrap_or_default();

    // Timeout: env → config → default
    let timeout_secs = env("EDUHUB_TIMEOUT_SECS")
        .and_then(|s| match s.trim().parse::<u64>() {
            Ok(n) => Some(n),
            Err(e) => {
                warn!("Ignoring EDUHUB_TIMEOUT_SECS={:?}: {}", s, e);
                None
            }
        })
        .or(config.network.timeout_secs)
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let user_agent = config
        .network
        .user_agent
        .clone()
        .unwrap_or_else(default_user_agent);

    ResolvedConfig {
        downloads_dir,
        theme,
        timeout: Duration::from_secs(timeout_secs),
        user_agent,
    }
}

fn parse_theme(s: &str) -> Option<Theme> {
    match s.trim().to_lowercase().as_str() {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        other => {
            warn!("Ignoring unknown theme {:?}", other);
            None
        }
    }
}
