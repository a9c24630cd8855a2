use crate::backup_manager::BackupMetadata;
use crate::patch::{Fix, RuleOutcome, RuleStatus};
use crate::patcher::{ChangeType, FileDiff, PatchResult};
use colored::*;

pub struct DiffFormatter;

impl DiffFormatter {
    /// Auto-detect if we should use colors
    fn should_use_color() -> bool {
        // Check NO_COLOR env var (https://no-color.org/)
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }

        // Check if terminal supports color
        atty::is(atty::Stream::Stdout)
    }

    /// Format file diff with context lines and change indicators
    pub fn format_diff_with_context(diff: &FileDiff, context_size: usize) -> String {
        let use_color = Self::should_use_color();
        let mut output = String::new();

        if use_color {
            output.push_str(&format!("{}\n", diff.file_path.bold().cyan()));
        } else {
            output.push_str(&format!("{}\n", diff.file_path));
        }

        let lines_to_show = Self::filter_lines_with_context(&diff.all_lines, context_size);

        for (line_num, content, change_type) in lines_to_show {
            // Special handling for "..." placeholder
            if content == "..." {
                if use_color {
                    output.push_str(&format!("{}\n", "...".dimmed()));
                } else {
                    output.push_str("...\n");
                }
                continue;
            }

            let indicator = match change_type {
                ChangeType::Unchanged => "=",
                ChangeType::Added => "+",
                ChangeType::Deleted => "-",
            };

            if use_color {
                let colored_line = match change_type {
                    ChangeType::Unchanged => {
                        format!("L{}: {} {}\n", line_num, indicator.dimmed(), content.dimmed())
                    }
                    ChangeType::Added => format!(
                        "L{}: {} {}\n",
                        line_num,
                        indicator.green().bold(),
                        content.green().bold()
                    ),
                    ChangeType::Deleted => {
                        format!("L{}: {} {}\n", line_num, indicator.red().bold(), content.red())
                    }
                };
                output.push_str(&colored_line);
            } else {
                output.push_str(&format!("L{}: {} {}\n", line_num, indicator, content));
            }
        }

        // Summary
        let added_count = diff
            .changes
            .iter()
            .filter(|c| c.change_type == ChangeType::Added)
            .count();
        let deleted_count = diff
            .changes
            .iter()
            .filter(|c| c.change_type == ChangeType::Deleted)
            .count();
        let total = added_count + deleted_count;

        if use_color {
            output.push_str(&format!("\nTotal: {} change", total.to_string().bold().white()));
            if total != 1 {
                output.push('s');
            }
            let mut parts = Vec::new();
            if added_count > 0 {
                parts.push(format!("{} {}", added_count, "added".green()));
            }
            if deleted_count > 0 {
                parts.push(format!("{} {}", deleted_count, "deleted".red()));
            }
            if !parts.is_empty() {
                output.push_str(&format!(" ({})", parts.join(", ")));
            }
            output.push('\n');
        } else {
            output.push_str(&format!("\nTotal: {} changes", total));
            if total > 0 {
                output.push_str(&format!(" ({} added, {} deleted)", added_count, deleted_count));
            }
            output.push('\n');
        }

        output
    }

    /// Filter lines to show only changed lines with context, grouping close changes
    fn filter_lines_with_context(
        lines: &[(usize, String, ChangeType)],
        context_size: usize,
    ) -> Vec<(usize, String, ChangeType)> {
        if context_size == 0 {
            // Show only changed lines
            return lines
                .iter()
                .filter(|(_, _, ct)| *ct != ChangeType::Unchanged)
                .cloned()
                .collect();
        }

        // Find indices of all changed lines
        let changed_indices: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, (_, _, ct))| *ct != ChangeType::Unchanged)
            .map(|(i, _)| i)
            .collect();

        if changed_indices.is_empty() {
            return Vec::new();
        }

        // Group changes that are close to each other, tracked as
        // (first, last) changed-index pairs
        // Two changes are in the same group if they're within (context_size * 2 + 1) lines
        let group_threshold = context_size * 2 + 1;
        let mut groups: Vec<(usize, usize)> = vec![(changed_indices[0], changed_indices[0])];

        for &idx in &changed_indices[1..] {
            match groups.last_mut() {
                Some(last_group) if idx.saturating_sub(last_group.1) <= group_threshold => {
                    last_group.1 = idx;
                }
                _ => groups.push((idx, idx)),
            }
        }

        // Build the result by including context around each group
        let mut result = Vec::new();
        let mut last_included_end = None;

        for &(group_start, group_end) in &groups {
            let start = group_start.saturating_sub(context_size);
            let end = (group_end + context_size + 1).min(lines.len());

            // Add "..." between distant groups (but not before the first group)
            if let Some(last_end) = last_included_end {
                if start > last_end + context_size {
                    result.push((0, "...".to_string(), ChangeType::Unchanged));
                }
            }

            for i in start..end {
                if let Some(line) = lines.get(i) {
                    result.push(line.clone());
                }
            }

            last_included_end = Some(end);
        }

        result
    }

    /// Format the per-rule outcome lines for one patch run
    pub fn format_outcome_report(outcomes: &[RuleOutcome]) -> String {
        let use_color = Self::should_use_color();
        let mut output = String::new();

        for outcome in outcomes {
            match &outcome.status {
                RuleStatus::Applied { occurrences } => {
                    let suffix = if *occurrences > 1 {
                        format!(" ({} occurrences)", occurrences)
                    } else {
                        String::new()
                    };
                    if use_color {
                        output.push_str(&format!("✅ {}{}\n", outcome.label.green(), suffix));
                    } else {
                        output.push_str(&format!("✅ {}{}\n", outcome.label, suffix));
                    }
                }
                RuleStatus::AppliedAlternate { .. } => {
                    if use_color {
                        output.push_str(&format!(
                            "✅ {} {}\n",
                            outcome.label.green(),
                            "(via alternate anchor)".dimmed()
                        ));
                    } else {
                        output.push_str(&format!("✅ {} (via alternate anchor)\n", outcome.label));
                    }
                }
                RuleStatus::Skipped => {
                    if use_color {
                        output.push_str(&format!(
                            "⚠️  {}: {}\n",
                            outcome.label.yellow(),
                            "not found or already changed".yellow()
                        ));
                    } else {
                        output.push_str(&format!(
                            "⚠️  {}: not found or already changed\n",
                            outcome.label
                        ));
                    }
                }
            }
        }

        output
    }

    /// Format execute result with backup ID and rollback hint
    pub fn format_execute_result(
        fix_name: &str,
        backup_id: Option<&str>,
        result: &PatchResult,
    ) -> String {
        let use_color = Self::should_use_color();
        let mut output = String::new();

        if use_color {
            output.push_str(&format!(
                "{} {}\n",
                "✅ Applied:".bold().green(),
                fix_name.white().bold()
            ));
        } else {
            output.push_str(&format!("Applied: {}\n", fix_name));
        }

        if let Some(id) = backup_id {
            if use_color {
                output.push_str(&format!("{} {}\n", "Backup ID:".white(), id.yellow().bold()));
            } else {
                output.push_str(&format!("Backup ID: {}\n", id));
            }
        }

        output.push('\n');
        output.push_str(&Self::format_outcome_report(&result.outcomes));

        if let Some(id) = backup_id {
            output.push('\n');
            if use_color {
                output.push_str(&format!(
                    "{}{}\n",
                    "Rollback with: ".white(),
                    format!("nailfix rollback {}", id).bold().yellow()
                ));
            } else {
                output.push_str(&format!("Rollback with: nailfix rollback {}\n", id));
            }
        }

        output
    }

    /// Format operation history
    pub fn format_history(backups: Vec<BackupMetadata>) -> String {
        let use_color = Self::should_use_color();
        let mut output = String::new();

        if backups.is_empty() {
            output.push_str("No backup history found.\n");
            return output;
        }

        if use_color {
            output.push_str(&format!("{}", "Operation History:\n\n".bold().white()));
        } else {
            output.push_str("Operation History:\n\n");
        }

        for backup in backups {
            if use_color {
                output.push_str(&format!("ID: {}\n", backup.id.yellow()));
                output.push_str(&format!(
                    "  Time: {}\n",
                    backup.timestamp.format("%Y-%m-%d %H:%M:%S")
                ));
                output.push_str(&format!("  Fix: {}\n", backup.fix.cyan()));
                output.push_str(&format!("  Files: {}\n", backup.files.len()));
            } else {
                output.push_str(&format!("ID: {}\n", backup.id));
                output.push_str(&format!(
                    "  Time: {}\n",
                    backup.timestamp.format("%Y-%m-%d %H:%M:%S")
                ));
                output.push_str(&format!("  Fix: {}\n", backup.fix));
                output.push_str(&format!("  Files: {}\n", backup.files.len()));
            }
            output.push('\n');
        }

        output
    }

    /// Format dry run header
    pub fn format_dry_run_header(fix_name: &str) -> String {
        let use_color = Self::should_use_color();

        if use_color {
            format!("{} {}\n\n", "🔍 Dry run:".bold().cyan(), fix_name.white().bold())
        } else {
            format!("Dry run: {}\n\n", fix_name)
        }
    }

    /// Format the closing hint of a dry run
    pub fn format_apply_hint(fix_name: &str) -> String {
        let use_color = Self::should_use_color();

        if use_color {
            format!(
                "{}{}\n",
                "Apply with: ".white(),
                format!("nailfix {}", fix_name).bold().yellow()
            )
        } else {
            format!("Apply with: nailfix {}\n", fix_name)
        }
    }

    /// Format the catalog listing shown by `nailfix list`
    pub fn format_fix_list(fixes: &[Fix]) -> String {
        let use_color = Self::should_use_color();
        let mut output = String::new();

        if use_color {
            output.push_str(&format!("{}", "Available fixes:\n\n".bold().white()));
        } else {
            output.push_str("Available fixes:\n\n");
        }

        for fix in fixes {
            if use_color {
                output.push_str(&format!("{}\n", fix.name.yellow().bold()));
                output.push_str(&format!("  Target: {}\n", fix.target.display().to_string().cyan()));
                output.push_str(&format!("  {}\n", fix.summary));
                output.push_str(&format!("  Rules: {}\n", fix.rules.len()));
            } else {
                output.push_str(&format!("{}\n", fix.name));
                output.push_str(&format!("  Target: {}\n", fix.target.display()));
                output.push_str(&format!("  {}\n", fix.summary));
                output.push_str(&format!("  Rules: {}\n", fix.rules.len()));
            }
            output.push('\n');
        }

        output
    }
}
