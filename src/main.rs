use anyhow::{Context, Result};
use nailfix::backup_manager::BackupManager;
use nailfix::cli::{parse_args, Args};
use nailfix::config::{self, Config};
use nailfix::diff_formatter::DiffFormatter;
use nailfix::error_helpers;
use nailfix::fixes;
use nailfix::logger;
use nailfix::patcher::Patcher;
use nailfix::syntax_check;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, error, info};

fn main() -> Result<()> {
    let args = parse_args()?;

    let config = config::load_config()?;

    // The guard must live until exit or buffered log lines are dropped
    let _log_guard = match logger::init_debug_logging(config.logging.debug.unwrap_or(false)) {
        Ok(Some((path, guard))) => {
            debug!("Debug logging enabled: {}", path.display());
            Some(guard)
        }
        Ok(None) => None,
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    if let Err(e) = run(args, &config) {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}

fn run(args: Args, config: &Config) -> Result<()> {
    match args {
        Args::Apply {
            fix,
            dry_run,
            interactive,
            context,
            no_backup,
            backup_dir,
            root,
        } => {
            run_fix(
                config,
                &fix,
                dry_run,
                interactive,
                context,
                no_backup,
                backup_dir,
                root,
            )?;
        }
        Args::List => {
            list_fixes();
        }
        Args::Check { root } => {
            check_targets(config, root)?;
        }
        Args::Rollback { id } => {
            rollback(config, id)?;
        }
        Args::History => {
            show_history(config)?;
        }
        Args::Status { root } => {
            show_status(config, root)?;
        }
        Args::BackupList { verbose } => {
            backup_list(config, verbose)?;
        }
        Args::BackupShow { id } => {
            backup_show(config, &id)?;
        }
        Args::BackupRestore { id } => {
            backup_restore(config, &id)?;
        }
        Args::BackupRemove { id, force } => {
            backup_remove(config, &id, force)?;
        }
        Args::BackupPrune {
            keep,
            keep_days,
            force,
        } => {
            backup_prune(config, keep, keep_days, force)?;
        }
        Args::Config { show, log_path } => {
            config_command(show, log_path)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_fix(
    config: &Config,
    fix_name: &str,
    dry_run: bool,
    interactive: bool,
    context: Option<usize>,
    no_backup: bool,
    backup_dir: Option<String>,
    root: Option<String>,
) -> Result<()> {
    config::validate_config(config)?;

    let fix = match fixes::find(fix_name) {
        Some(fix) => fix,
        None => {
            print!("{}", DiffFormatter::format_fix_list(&fixes::all()));
            anyhow::bail!("Unknown fix: {}", fix_name);
        }
    };

    // Flag beats config, config beats the built-in default
    let context = context.or(config.output.context_lines).unwrap_or(2);
    let root_dir = resolve_root(config, root);
    let target_path = root_dir.join(&fix.target);

    info!("Running fix '{}' against {}", fix.name, target_path.display());

    if !target_path.exists() {
        anyhow::bail!(error_helpers::target_not_found_error(&target_path, &fix.name));
    }

    let patcher = Patcher::for_fix(&fix);
    let diff = patcher.preview_file(&target_path)?;

    if !diff.has_changes() {
        println!(
            "Nothing to apply: '{}' looks already applied (or its anchors have drifted).\n",
            fix.name
        );
        print!("{}", DiffFormatter::format_outcome_report(&diff.outcomes));
        return Ok(());
    }

    // Show preview in dry-run or interactive mode
    if dry_run || interactive {
        print!("{}", DiffFormatter::format_dry_run_header(&fix.name));
        print!("{}", DiffFormatter::format_diff_with_context(&diff, context));
        println!();
        print!("{}", DiffFormatter::format_outcome_report(&diff.outcomes));
    }

    if dry_run {
        println!();
        print!("{}", DiffFormatter::format_apply_hint(&fix.name));
        return Ok(());
    }

    if interactive && !confirm("\nApply changes?")? {
        println!("Changes not applied.");
        return Ok(());
    }

    // Backup before touching the file
    let backup_id = if no_backup {
        info!("Backup skipped (--no-backup --force)");
        None
    } else {
        let mut manager = open_backup_manager(config, backup_dir)?;
        let id = manager.create_backup(&fix.name, std::slice::from_ref(&target_path))?;
        debug!("Created backup {}", id);
        Some(id)
    };

    let result = match patcher.apply_to_file(&target_path) {
        Ok(result) => result,
        Err(e) => {
            if let Some(io_err) = e.root_cause().downcast_ref::<std::io::Error>() {
                if error_helpers::is_permission_denied(io_err) {
                    anyhow::bail!(error_helpers::permission_error(&target_path, "writing"));
                }
            }
            return Err(e);
        }
    };

    info!(
        "Fix '{}' applied: {} rules applied, {} skipped",
        fix.name,
        result.applied_count(),
        result.skipped_count()
    );

    if !interactive {
        print!("{}", DiffFormatter::format_diff_with_context(&diff, context));
        println!();
    }

    print!(
        "{}",
        DiffFormatter::format_execute_result(&fix.name, backup_id.as_deref(), &result)
    );

    Ok(())
}

fn list_fixes() {
    print!("{}", DiffFormatter::format_fix_list(&fixes::all()));
}

fn check_targets(config: &Config, root: Option<String>) -> Result<()> {
    config::validate_config(config)?;

    let root_dir = resolve_root(config, root);
    let mut all_balanced = true;

    for target in fixes::targets() {
        let path = root_dir.join(&target);

        if !path.exists() {
            println!("⚠️  {} not found, skipped\n", path.display());
            continue;
        }

        let report = syntax_check::check_file(&path)?;

        println!(
            "{} - Braces: {} open, {} closed",
            target.display(),
            report.braces.0,
            report.braces.1
        );
        println!(
            "{} - Parens: {} open, {} closed",
            target.display(),
            report.parens.0,
            report.parens.1
        );

        if report.braces_balanced() {
            println!("✓ Braces balanced in {}", target.display());
        } else {
            println!("❌ Error: unbalanced braces in {}", target.display());
            all_balanced = false;
        }

        if report.parens_balanced() {
            println!("✓ Parens balanced in {}", target.display());
        } else {
            println!("❌ Error: unbalanced parens in {}", target.display());
            all_balanced = false;
        }

        println!();
    }

    if !all_balanced {
        anyhow::bail!("Balance check failed for one or more fix targets");
    }

    Ok(())
}

fn rollback(config: &Config, id: Option<String>) -> Result<()> {
    let backup_manager = open_backup_manager(config, None)?;

    let backup_id = match id {
        Some(id) => id,
        None => match backup_manager.get_last_backup_id()? {
            Some(id) => {
                println!("Rolling back last operation: {}\n", id);
                id
            }
            None => {
                anyhow::bail!("No backups found to rollback");
            }
        },
    };

    backup_manager.restore_backup(&backup_id)?;
    println!("\n✅ Rollback complete");

    Ok(())
}

fn show_history(config: &Config) -> Result<()> {
    let backup_manager = open_backup_manager(config, None)?;
    let mut backups = backup_manager.list_backups()?;

    // Most recent operation first
    backups.reverse();

    let output = DiffFormatter::format_history(backups);
    print!("{}", output);

    Ok(())
}

fn show_status(config: &Config, root: Option<String>) -> Result<()> {
    let backup_manager = open_backup_manager(config, None)?;
    let backups = backup_manager.list_backups()?;

    println!("Current status:\n");
    println!("Project root: {}", resolve_root(config, root).display());
    println!("Config file: {}", config::config_file_path()?.display());
    if config.logging.debug.unwrap_or(false) {
        println!("Debug log: {}", logger::get_current_log_path().display());
    } else {
        println!("Debug log: disabled");
    }
    println!("Backup directory: {}", backup_manager.backups_dir().display());
    println!("Total backups: {}\n", backups.len());

    if let Some(last) = backups.last() {
        println!("Last operation:");
        println!("  ID: {}", last.id);
        println!("  Time: {}", last.timestamp.format("%Y-%m-%d %H:%M:%S"));
        println!("  Fix: {}", last.fix);
    }

    Ok(())
}

fn backup_list(config: &Config, verbose: bool) -> Result<()> {
    let backup_manager = open_backup_manager(config, None)?;
    let backups = backup_manager.list_backups()?;

    if backups.is_empty() {
        println!("No backups found.");
        return Ok(());
    }

    for backup in &backups {
        println!("ID: {}", backup.id);
        println!("  Time: {}", backup.timestamp.format("%Y-%m-%d %H:%M:%S"));
        println!("  Fix: {}", backup.fix);
        println!("  Files: {}", backup.files.len());
        if verbose {
            for file in &backup.files {
                println!("    {}", file.original_path.display());
            }
        }
        println!();
    }

    Ok(())
}

fn backup_show(config: &Config, id: &str) -> Result<()> {
    let backup_manager = open_backup_manager(config, None)?;
    let metadata = backup_manager.get_backup(id)?;

    println!("ID: {}", metadata.id);
    println!("Time: {}", metadata.timestamp.format("%Y-%m-%d %H:%M:%S"));
    println!("Fix: {}", metadata.fix);
    println!("Files:");
    for file in &metadata.files {
        println!(
            "  {} -> {}",
            file.original_path.display(),
            file.backup_path.display()
        );
    }

    Ok(())
}

fn backup_restore(config: &Config, id: &str) -> Result<()> {
    let backup_manager = open_backup_manager(config, None)?;
    backup_manager.restore_backup(id)?;
    println!("\n✅ Restore complete");

    Ok(())
}

fn backup_remove(config: &Config, id: &str, force: bool) -> Result<()> {
    let backup_manager = open_backup_manager(config, None)?;

    if !force && !confirm(&format!("Remove backup {}?", id))? {
        println!("Backup not removed.");
        return Ok(());
    }

    backup_manager.remove_backup_by_id(id)?;
    println!("Backup {} removed", id);

    Ok(())
}

fn backup_prune(
    config: &Config,
    keep: Option<usize>,
    keep_days: Option<usize>,
    force: bool,
) -> Result<()> {
    let backup_manager = open_backup_manager(config, None)?;

    let removed = match (keep, keep_days) {
        (Some(_), Some(_)) => {
            anyhow::bail!("Use either --keep or --keep-days, not both");
        }
        (None, Some(days)) => {
            if !force && !confirm(&format!("Remove backups older than {} days?", days))? {
                println!("No backups removed.");
                return Ok(());
            }
            backup_manager.prune_backups_older_than(days as i64)?
        }
        (keep, None) => {
            let keep = keep.unwrap_or(10);
            if !force && !confirm(&format!("Keep only the {} most recent backups?", keep))? {
                println!("No backups removed.");
                return Ok(());
            }
            backup_manager.prune_backups(keep)?
        }
    };

    println!(
        "Removed {} backup{}",
        removed,
        if removed == 1 { "" } else { "s" }
    );

    Ok(())
}

fn config_command(show: bool, log_path: bool) -> Result<()> {
    if log_path {
        println!("{}", logger::get_current_log_path().display());
        return Ok(());
    }

    if show {
        config::ensure_complete_config()?;
        let config_path = config::config_file_path()?;
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        println!("# {}\n", config_path.display());
        print!("{}", content);
        return Ok(());
    }

    edit_config()
}

fn edit_config() -> Result<()> {
    config::ensure_complete_config()?;
    let config_path = config::config_file_path()?;

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());

    // Resolve the editor on PATH before spawning it
    let editor_path = which::which(&editor)
        .map_err(|_| anyhow::anyhow!("Editor '{}' not found on PATH", editor))?;

    let status = std::process::Command::new(&editor_path)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to launch editor: {}", editor_path.display()))?;

    if !status.success() {
        anyhow::bail!("Editor exited with an error");
    }

    let config = config::load_config()?;
    config::validate_config(&config)?;
    println!("Configuration saved: {}", config_path.display());

    Ok(())
}

fn resolve_root(config: &Config, root: Option<String>) -> PathBuf {
    if let Some(root) = root {
        return PathBuf::from(root);
    }
    if let Some(root) = &config.project.root {
        return PathBuf::from(root);
    }
    PathBuf::from(".")
}

fn open_backup_manager(config: &Config, backup_dir: Option<String>) -> Result<BackupManager> {
    let dir = backup_dir.or_else(|| config.backup.backup_dir.clone());

    if let Some(dir) = dir {
        let dir_path = PathBuf::from(&dir);
        match BackupManager::with_directory(dir) {
            Ok(manager) => Ok(manager),
            Err(e) => {
                if let Some(io_err) = e.root_cause().downcast_ref::<std::io::Error>() {
                    anyhow::bail!(error_helpers::dir_create_error(&dir_path, io_err));
                }
                Err(e)
            }
        }
    } else {
        BackupManager::new()
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
