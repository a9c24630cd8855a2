//! nailfix: scripted maintenance fixes for the Nail Art booking app
//!
//! This library exposes the fix catalog and the patch engine for use in
//! property-based tests. The main binary is at src/main.rs.

pub mod backup_manager;
pub mod cli;
pub mod config;
pub mod diff_formatter;
pub mod error_helpers;
pub mod fixes;
pub mod logger;
pub mod patch;
pub mod patcher;
pub mod syntax_check;

// Re-export commonly used types for convenience
pub use backup_manager::{BackupManager, BackupMetadata, FileBackup};
pub use patch::{Fix, Rule, RuleOutcome, RuleStatus, Substitution};
pub use patcher::{ChangeType, FileDiff, LineChange, PatchResult, Patcher};
pub use syntax_check::BalanceReport;
