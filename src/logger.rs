//! Debug logging support for nailfix
//!
//! When debug mode is enabled via config, operations are logged to a file.
//! Logs are written to /var/log/nailfix.log if writable, otherwise
//! ~/.nailfix/nailfix.log

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Initialize the debug logging system
///
/// If debug_enabled is true, sets up non-blocking file logging.
/// Returns the log file path and the writer guard, or None if logging is
/// not enabled. The guard must stay alive for the whole run or buffered
/// log lines are lost.
pub fn init_debug_logging(debug_enabled: bool) -> Result<Option<(PathBuf, WorkerGuard)>> {
    if !debug_enabled {
        return Ok(None);
    }

    // Try /var/log/nailfix.log first, fall back to ~/.nailfix/nailfix.log
    let log_path = get_log_path()?;

    // Ensure parent directory exists
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    // Create the log file or append to existing
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()));

    // If we can't open the log file, gracefully fall back to no logging
    match file {
        Ok(log_file) => {
            let (writer, guard) = tracing_appender::non_blocking(log_file);

            let subscriber = registry()
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .with(EnvFilter::new("nailfix=debug"));

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

            Ok(Some((log_path, guard)))
        }
        Err(e) => {
            // Fall back to no logging rather than breaking normal operation
            eprintln!("Warning: Could not create log file: {}", e);
            Ok(None)
        }
    }
}

/// Get the log file path
///
/// Tries /var/log/nailfix.log first, falls back to ~/.nailfix/nailfix.log
fn get_log_path() -> Result<PathBuf> {
    let var_log_path = PathBuf::from("/var/log/nailfix.log");

    if can_write_to_var_log() {
        return Ok(var_log_path);
    }

    // Fall back to home directory
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    let nailfix_dir = home_dir.join(".nailfix");
    Ok(nailfix_dir.join("nailfix.log"))
}

/// Check if /var/log is writable
fn can_write_to_var_log() -> bool {
    let test_file = "/var/log/.nailfix_test_write";
    match fs::write(test_file, b"") {
        Ok(_) => {
            let _ = fs::remove_file(test_file);
            true
        }
        Err(_) => false,
    }
}

/// Get the current log file path without initializing logging
///
/// This is used for the `nailfix config --log-path` command
pub fn get_current_log_path() -> PathBuf {
    if can_write_to_var_log() {
        PathBuf::from("/var/log/nailfix.log")
    } else {
        dirs::home_dir()
            .map(|h| h.join(".nailfix/nailfix.log"))
            .unwrap_or_else(|| PathBuf::from("~/.nailfix/nailfix.log"))
    }
}
