//! Configuration management for nailfix
//!
//! nailfix stores configuration in ~/.nailfix/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// nailfix configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Project settings
    #[serde(default)]
    pub project: ProjectConfig,

    /// Backup settings
    #[serde(default)]
    pub backup: BackupConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Root of the booking app checkout
    #[serde(default)]
    pub root: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Custom backup directory
    #[serde(default)]
    pub backup_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Number of context lines to show around changes
    #[serde(default = "default_context_lines")]
    pub context_lines: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            context_lines: Some(2),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write debug logs to a log file
    #[serde(default = "default_debug")]
    pub debug: Option<bool>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { debug: Some(false) }
    }
}

// Default functions for serde
fn default_context_lines() -> Option<usize> {
    Some(2)
}
fn default_debug() -> Option<bool> {
    Some(false)
}

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;

    let config_dir = home_dir.join(".nailfix");
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;

    Ok(config_dir.join("config.toml"))
}

/// Get the default configuration file content with comments
fn get_default_config_content() -> &'static str {
    r#"# nailfix Configuration File
#
# This file controls default behavior for nailfix. Values set here can be
# overridden by command-line flags.
#
# For more information, run: nailfix config --help

[project]
# Root of the booking app checkout (default: current directory)
# Fix targets like src/components/LoginPage.tsx are resolved against this.
#root = "/home/studio/agendamento"

[backup]
# Custom backup directory (optional)
# Uncomment to use a custom backup location instead of ~/.nailfix/backups/
#backup_dir = "/mnt/backups/nailfix"

[output]
# Number of context lines to show around changes (default: 2, max: 10)
# More context makes it easier to understand changes in the preview.
context_lines = 2

[logging]
# Write debug logs to /var/log/nailfix.log (default: false)
# Falls back to ~/.nailfix/nailfix.log when /var/log is not writable.
debug = false
"#
}

/// Save the default commented configuration file
pub fn save_default_config() -> Result<()> {
    let config_path = config_file_path()?;

    fs::write(&config_path, get_default_config_content()).with_context(|| {
        format!(
            "Failed to write default config file: {}",
            config_path.display()
        )
    })?;

    Ok(())
}

/// Load configuration from file, creating default if needed
///
/// If the config file doesn't exist, creates it with defaults and returns them.
/// If the config file is malformed, recreates it with defaults.
pub fn load_config() -> Result<Config> {
    let config_path = config_file_path()?;

    // Create default config file if it doesn't exist
    if !config_path.exists() {
        save_default_config()?;
    }

    let config_str = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    // Try to parse the config
    let config: Config = match toml::from_str(&config_str) {
        Ok(config) => config,
        Err(_) => {
            // Config is malformed, recreate with defaults
            save_default_config()?;
            return Ok(Config::default());
        }
    };

    Ok(config)
}

/// Ensure a parseable config file exists
///
/// If config doesn't exist, creates the default commented template.
/// If config exists but no longer parses, recreates it. A valid file is
/// left untouched; keys it omits fall back to defaults at load time.
pub fn ensure_complete_config() -> Result<()> {
    let config_path = config_file_path()?;

    if !config_path.exists() {
        save_default_config()?;
        return Ok(());
    }

    let config_str = fs::read_to_string(&config_path)?;

    if toml::from_str::<Config>(&config_str).is_err() {
        // Config is malformed, replace with default
        save_default_config()?;
    }

    Ok(())
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(root) = &config.project.root {
        if root.trim().is_empty() {
            anyhow::bail!("Invalid project root: empty path");
        }
    }

    if let Some(context) = config.output.context_lines {
        if context > 10 {
            anyhow::bail!("Invalid context_lines: {} (max 10)", context);
        }
    }

    Ok(())
}
