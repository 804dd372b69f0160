use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::criterion::Criterion;
use crate::filesystem::as_root_criterion;
use crate::search::{RootFinder, DEFAULT_ROOT_CRITERIA};

const CONFIG_FILE: &str = ".dirmagic.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Root and project search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Root markers, tried in order. Strings are file names, arrays and
    /// tables are alternatives. Empty means the built-in markers.
    #[serde(default)]
    pub markers: Vec<toml::Value>,

    /// Parents considered beyond the start directory (negative: all but the
    /// outermost n)
    #[serde(default)]
    pub limit_parents: Option<isize>,

    /// Levels searched by `projects` (negative = unlimited)
    #[serde(default = "default_maxdepth")]
    pub maxdepth: i64,

    /// Resolve symbolic links in the start path
    #[serde(default)]
    pub resolve_symlinks: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            limit_parents: None,
            maxdepth: default_maxdepth(),
            resolve_symlinks: false,
        }
    }
}

fn default_maxdepth() -> i64 {
    1
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to rotating files
    #[serde(default)]
    pub enabled: bool,

    /// Write logs to stderr (filtered by RUST_LOG)
    #[serde(default = "default_stderr")]
    pub stderr: bool,

    /// Level of the file log: trace, debug, info, warn or error
    #[serde(default = "default_level")]
    pub level: String,

    /// Log directory, relative paths are resolved against the config directory
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    /// File name prefix of the log files
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation: hourly, daily, minutely or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_stderr(),
            level: default_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_stderr() -> bool {
    true
}

fn default_level() -> String {
    "debug".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(".dirmagic/logs")
}

fn default_file_prefix() -> String {
    "dirmagic.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load `.dirmagic.toml` from `dir`, or the defaults if there is none
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = Self::config_path(dir);

        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load an explicitly given configuration file
    pub fn load_file(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", config_path))
    }

    /// Save configuration as `.dirmagic.toml` in `dir`
    pub fn save(&self, dir: &Path) -> Result<()> {
        let config_path = Self::config_path(dir);

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Root criteria from the configured markers, in order
    pub fn root_criteria(&self) -> Result<Vec<Criterion>> {
        if self.search.markers.is_empty() {
            return Ok(DEFAULT_ROOT_CRITERIA.clone());
        }

        self.search
            .markers
            .iter()
            .map(|marker| {
                as_root_criterion(marker.clone())
                    .with_context(|| format!("Invalid root marker {}", marker))
            })
            .collect()
    }

    /// A root finder set up from the search settings
    pub fn root_finder(&self) -> Result<RootFinder> {
        Ok(RootFinder::new(self.root_criteria()?)
            .limit_parents(self.search.limit_parents)
            .resolve_symlinks(self.search.resolve_symlinks))
    }
}
