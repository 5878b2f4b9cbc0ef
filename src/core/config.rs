//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.newsfeed/config.toml` and is only ever read. A missing
//! file means defaults.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::feed::batch::{DEFAULT_WORKERS, MAX_WORKERS};
use crate::feed::client::DEFAULT_BASE_URL;
use crate::feed::extract::{DEFAULT_EXTRACTOR, DEFAULT_EXTRACTOR_ARGS};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub workers: Option<usize>,
    pub max_stories: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExtractorConfig {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_MAX_STORIES: usize = 200;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_EXTRACTOR_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub workers: usize,
    pub max_stories: usize,
    pub page_size: usize,
    pub extractor_command: String,
    pub extractor_args: Vec<String>,
    pub extractor_timeout: Duration,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub workers: Option<usize>,
    pub page_size: Option<usize>,
    pub max_stories: Option<usize>,
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

/// Returns the path to `~/.newsfeed/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".newsfeed").join("config.toml"))
}

/// Load config from `~/.newsfeed/config.toml`, or defaults if there is none.
pub fn load_config() -> Result<FeedConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(FeedConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<FeedConfig, ConfigError> {
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(FeedConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FeedConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FeedConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("NEWSFEED_BASE_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    // Workers: CLI → env → config → default
    let workers = cli
        .workers
        .or_else(|| {
            std::env::var("NEWSFEED_WORKERS")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or(config.api.workers)
        .unwrap_or(DEFAULT_WORKERS)
        .clamp(1, MAX_WORKERS);

    let page_size = cli
        .page_size
        .or(config.ui.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);

    let max_stories = cli
        .max_stories
        .or(config.api.max_stories)
        .unwrap_or(DEFAULT_MAX_STORIES);

    ResolvedConfig {
        base_url,
        request_timeout: Duration::from_secs(
            config.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1),
        ),
        workers,
        max_stories,
        page_size,
        extractor_command: config
            .extractor
            .command
            .clone()
            .unwrap_or_else(|| DEFAULT_EXTRACTOR.to_string()),
        extractor_args: config.extractor.args.clone().unwrap_or_else(|| {
            DEFAULT_EXTRACTOR_ARGS.iter().map(|a| a.to_string()).collect()
        }),
        extractor_timeout: Duration::from_secs(
            config
                .extractor
                .timeout_secs
                .unwrap_or(DEFAULT_EXTRACTOR_TIMEOUT_SECS)
                .max(1),
        ),
    }
}
