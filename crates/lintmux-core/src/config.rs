//! Configuration for lintmux.
//! TOML-based, layered resolution: caller overrides > env > project > defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Project configuration file name.
pub const CONFIG_FILE: &str = "lintmux.toml";
/// Ignore pattern file name, at the project root.
pub const IGNORE_FILE: &str = ".lintmuxignore";
/// Project-local state directory. Always pruned from cache freshness walks.
pub const STATE_DIR: &str = ".lintmux";
/// Baseline archive, project-relative.
pub const BASELINE_FILE: &str = ".lintmux-baseline.yml";

/// Bundled ignore patterns, used when no ignore file exists.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git/",
    ".hg/",
    ".lintmux/",
    "node_modules/",
    ".venv/",
    "dist/",
    "build/",
    "*.min.js",
];

/// Directory names never descended into when probing cache freshness:
/// version control, lintmux's own state, and dependency trees.
pub const PRUNED_DIR_NAMES: &[&str] = &[".git", ".hg", STATE_DIR, "node_modules", ".venv"];

/// Ignore-engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Ignore file path, relative to the project root. Default: `.lintmuxignore`.
    pub file: Option<String>,
    /// Extra patterns appended after the ignore file's.
    pub patterns: Vec<String>,
}

/// Result-cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether analyzer runs are cached. Default: true.
    pub enabled: Option<bool>,
    /// Cache directory, relative to the project root. Default: `.lintmux/cache`.
    pub dir: Option<String>,
}

/// Runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    /// Progress tick interval in milliseconds. Default: 100.
    pub tick_interval_ms: Option<u64>,
}

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Caller overrides (applied via `apply_overrides`)
/// 2. Environment variables (`LINTMUX_*`)
/// 3. Project config (`lintmux.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LintmuxConfig {
    pub ignore: IgnoreConfig,
    pub cache: CacheConfig,
    pub run: RunConfig,
}

/// Caller-supplied override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub cache_enabled: Option<bool>,
    pub cache_dir: Option<String>,
    pub tick_interval_ms: Option<u64>,
}

impl LintmuxConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE);
        if project_config_path.exists() {
            let text = std::fs::read_to_string(&project_config_path).map_err(|e| {
                ConfigError::ReadError {
                    path: project_config_path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            })?;
            tracing::debug!(path = %project_config_path.display(), "loaded project config");
        }

        Self::apply_env_overrides(&mut config);

        if let Some(ov) = overrides {
            Self::apply_overrides(&mut config, ov);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn apply_env_overrides(config: &mut LintmuxConfig) {
        if let Ok(v) = std::env::var("LINTMUX_CACHE_ENABLED") {
            if let Ok(b) = v.parse::<bool>() {
                config.cache.enabled = Some(b);
            }
        }
        if let Ok(v) = std::env::var("LINTMUX_CACHE_DIR") {
            if !v.is_empty() {
                config.cache.dir = Some(v);
            }
        }
        if let Ok(v) = std::env::var("LINTMUX_TICK_INTERVAL_MS") {
            if let Ok(ms) = v.parse::<u64>() {
                config.run.tick_interval_ms = Some(ms);
            }
        }
    }

    fn apply_overrides(config: &mut LintmuxConfig, ov: &ConfigOverrides) {
        if let Some(enabled) = ov.cache_enabled {
            config.cache.enabled = Some(enabled);
        }
        if let Some(ref dir) = ov.cache_dir {
            config.cache.dir = Some(dir.clone());
        }
        if let Some(ms) = ov.tick_interval_ms {
            config.run.tick_interval_ms = Some(ms);
        }
    }

    /// Validate the configuration values.
    pub fn validate(config: &LintmuxConfig) -> Result<(), ConfigError> {
        if let Some(ms) = config.run.tick_interval_ms {
            if ms == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "run.tick_interval_ms".to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
        }
        if let Some(ref dir) = config.cache.dir {
            if dir.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "cache.dir".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Effective ignore file path under `root`.
    pub fn effective_ignore_file(&self, root: &Path) -> PathBuf {
        match self.ignore.file {
            Some(ref f) => root.join(f),
            None => root.join(IGNORE_FILE),
        }
    }

    /// Effective cache directory under `root`, defaulting to `.lintmux/cache`.
    pub fn effective_cache_dir(&self, root: &Path) -> PathBuf {
        match self.cache.dir {
            Some(ref d) => root.join(d),
            None => root.join(STATE_DIR).join("cache"),
        }
    }

    /// Whether caching is enabled, defaulting to true.
    pub fn effective_cache_enabled(&self) -> bool {
        self.cache.enabled.unwrap_or(true)
    }

    /// Effective progress tick interval in milliseconds, defaulting to 100.
    pub fn effective_tick_interval_ms(&self) -> u64 {
        self.run.tick_interval_ms.unwrap_or(100)
    }
}
