//! Configuration management for the prompt registry.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Config files (.promptreg/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources override earlier ones in that order.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default prompts directory, relative to the workspace.
pub const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Default prompt-file suffix.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .promptreg/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Prompts directory; relative paths resolve against `workspace`
    pub prompts_dir: PathBuf,

    /// Prompt-file suffix, without the leading dot
    pub extension: String,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    registry: Option<RegistryConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryConfig {
    path: Option<String>,
    extension: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            prompts_dir: PathBuf::from(DEFAULT_PROMPTS_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// `workspace` and `config_file` locate the config file and take
    /// precedence over `PROMPTREG_WORKSPACE` / `PROMPTREG_CONFIG`.
    ///
    /// Environment variables:
    /// - `PROMPTREG_WORKSPACE`: Override workspace path
    /// - `PROMPTREG_CONFIG`: Path to config file
    /// - `PROMPTREG_PROMPTS_DIR`: Prompts directory
    /// - `PROMPTREG_EXTENSION`: Prompt-file suffix
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use promptreg_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None, None).expect("Failed to load config");
    /// println!("Prompts: {:?}", config.prompts_root());
    /// ```
    pub fn load(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace.or_else(|| env_path("PROMPTREG_WORKSPACE")) {
            config.workspace = workspace;
        }
        config.config_file = config_file.or_else(|| env_path("PROMPTREG_CONFIG"));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        // An explicit config file must exist; the workspace default is optional
        let config_path = match config.config_file {
            Some(ref cf) => Some(cf.clone()),
            None => Some(config.config_dir().join("config.yaml")).filter(|p| p.exists()),
        };

        if let Some(path) = config_path {
            config = config.merge_yaml(&path)?;
        }

        if let Some(dir) = env_path("PROMPTREG_PROMPTS_DIR") {
            config.prompts_dir = dir;
        }

        if let Ok(extension) = std::env::var("PROMPTREG_EXTENSION") {
            config.extension = normalize_extension(&extension);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var_os("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        // An empty file deserializes to null
        let config_file: Option<ConfigFile> = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;
        let config_file = config_file.unwrap_or_default();

        let mut result = self.clone();

        if let Some(registry) = config_file.registry {
            if let Some(path) = registry.path {
                result.prompts_dir = PathBuf::from(path);
            }
            if let Some(extension) = registry.extension {
                result.extension = normalize_extension(&extension);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        tracing::debug!("Merged config file {:?}", path);

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the config file and
    /// environment variables.
    pub fn with_overrides(
        mut self,
        prompts_dir: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(prompts_dir) = prompts_dir {
            self.prompts_dir = prompts_dir;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .promptreg directory.
    pub fn config_dir(&self) -> PathBuf {
        self.workspace.join(".promptreg")
    }

    /// Resolve the prompts directory against the workspace.
    pub fn prompts_root(&self) -> PathBuf {
        if self.prompts_dir.is_absolute() {
            self.prompts_dir.clone()
        } else {
            self.workspace.join(&self.prompts_dir)
        }
    }

    /// Validate the configuration before any command runs.
    pub fn validate(&self) -> AppResult<()> {
        if !self.workspace.is_dir() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                self.workspace
            )));
        }

        if self.extension.is_empty() {
            return Err(AppError::Config(
                "Prompt file extension cannot be empty".to_string(),
            ));
        }

        if self.extension.contains(['/', '\\']) {
            return Err(AppError::Config(format!(
                "Invalid prompt file extension: {}",
                self.extension
            )));
        }

        let root = self.prompts_root();
        if !root.is_dir() {
            return Err(AppError::Config(format!(
                "Prompts directory does not exist: {:?}",
                root
            )));
        }

        Ok(())
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}
