//! Error helper functions for creating actionable error messages

use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Create an enhanced error message for file permission issues
pub fn permission_error(path: &Path, operation: &str) -> String {
    let parent_dir = path
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    format!(
        "Permission denied when {} '{}'\n\n\
         Possible fixes:\n\
         1. Check file permissions: ls -l '{}'\n\
         2. If directory: Ensure write access with: chmod u+w '{}'\n\
         3. If owned by another user: Try with sudo (not recommended)\n\
         4. For backup operations: Use --no-backup to skip backup creation",
        operation,
        path.display(),
        path.display(),
        parent_dir
    )
}

/// Create an enhanced error message for a missing fix target
///
/// The fix targets live at fixed relative paths inside the booking app
/// checkout, so a missing file almost always means nailfix was started
/// from the wrong directory.
pub fn target_not_found_error(path: &Path, fix_name: &str) -> String {
    format!(
        "File not found: '{}'\n\n\
         The '{}' fix patches this file inside the booking app checkout.\n\n\
         Possible fixes:\n\
         1. Run nailfix from the checkout root of the booking app\n\
         2. Pass --root with the path to the checkout\n\
         3. Check the file was not moved or renamed",
        path.display(),
        fix_name
    )
}

/// Create an enhanced error message for directory creation failures
pub fn dir_create_error(path: &Path, underlying_err: &io::Error) -> String {
    let base = format!("Failed to create directory: '{}'", path.display());

    if is_permission_denied(underlying_err) {
        format!(
            "{}\n\n\
             Cause: Permission denied\n\n\
             Possible fixes:\n\
             1. Ensure parent directory exists: ls -la '{}'\n\
             2. Check write permissions on parent directory\n\
             3. Try creating manually: mkdir -p '{}'\n\
             4. Use --backup-dir to specify a different location",
            base,
            path.parent()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string()),
            path.display()
        )
    } else if is_not_found(underlying_err) {
        format!(
            "{}\n\n\
             Cause: Parent directory does not exist\n\n\
             Possible fixes:\n\
             1. Create parent directory first: mkdir -p '{}'\n\
             2. Use an absolute path for the backup directory",
            base,
            path.parent()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string())
        )
    } else {
        format!(
            "{}\n\n\
             Underlying error: {}",
            base, underlying_err
        )
    }
}
