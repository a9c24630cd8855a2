//! The patch engine
//!
//! Runs a fix's rules over one file: read the full text, apply the ordered
//! substitutions to the in-memory buffer, write the result back in a single
//! write. Previews run the same substitutions without the write step.

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::patch::{Fix, Rule, RuleOutcome, RuleStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum ChangeType {
    Unchanged, // Line present in both versions
    Added,     // New line in the patched version
    Deleted,   // Line removed from the original
}

#[derive(Debug, Clone)]
pub struct LineChange {
    pub line_number: usize,
    pub change_type: ChangeType,
    pub content: String,
}

/// Detailed preview of what a fix would do to one file.
#[derive(Debug)]
pub struct FileDiff {
    pub file_path: String,
    pub changes: Vec<LineChange>,
    pub all_lines: Vec<(usize, String, ChangeType)>, // (line_number, content, change_type)
    pub outcomes: Vec<RuleOutcome>,
}

impl FileDiff {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Result of running the rules over an in-memory buffer.
#[derive(Debug)]
pub struct PatchResult {
    pub patched: String,
    pub outcomes: Vec<RuleOutcome>,
}

impl PatchResult {
    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status.is_applied())
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }
}

pub struct Patcher {
    rules: Vec<Rule>,
}

impl Patcher {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn for_fix(fix: &Fix) -> Self {
        Self::new(fix.rules.clone())
    }

    /// Run the rules in order against an immutable input buffer, producing
    /// a new buffer. Each rule sees the output of the rules before it; a
    /// rule whose anchor is absent leaves the buffer untouched.
    pub fn apply(&self, content: &str) -> PatchResult {
        let mut patched = content.to_string();
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let status = if rule.primary.matches(&patched) {
                let occurrences = rule.primary.occurrences(&patched);
                patched = rule.primary.apply(&patched);
                debug!(rule = %rule.label, occurrences, "substitution applied");
                RuleStatus::Applied { occurrences }
            } else if let Some(alternate) = rule
                .alternate
                .as_ref()
                .filter(|alternate| alternate.matches(&patched))
            {
                let occurrences = alternate.occurrences(&patched);
                patched = alternate.apply(&patched);
                debug!(rule = %rule.label, occurrences, "alternate anchor applied");
                RuleStatus::AppliedAlternate { occurrences }
            } else {
                warn!(rule = %rule.label, "anchor not found, rule skipped");
                RuleStatus::Skipped
            };

            outcomes.push(RuleOutcome {
                label: rule.label.clone(),
                status,
            });
        }

        PatchResult { patched, outcomes }
    }

    /// Read the file and compute the full preview without touching disk.
    pub fn preview_file(&self, file_path: &Path) -> Result<FileDiff> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        let result = self.apply(&content);
        Ok(build_diff(file_path, &content, result))
    }

    /// Apply the rules and write the patched buffer back in one scoped
    /// write. All substitutions happen in memory before the write, so a
    /// skipped rule never leaves a half-written file behind.
    pub fn apply_to_file(&self, file_path: &Path) -> Result<PatchResult> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        let result = self.apply(&content);

        fs::write(file_path, &result.patched)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(result)
    }
}

fn build_diff(file_path: &Path, original: &str, result: PatchResult) -> FileDiff {
    let diff = TextDiff::from_lines(original, &result.patched);

    let mut all_lines = Vec::new();
    for change in diff.iter_all_changes() {
        let (line_number, change_type) = match change.tag() {
            ChangeTag::Equal => (change.new_index().unwrap_or(0) + 1, ChangeType::Unchanged),
            ChangeTag::Delete => (change.old_index().unwrap_or(0) + 1, ChangeType::Deleted),
            ChangeTag::Insert => (change.new_index().unwrap_or(0) + 1, ChangeType::Added),
        };
        let content = change.value().trim_end_matches('\n').to_string();
        all_lines.push((line_number, content, change_type));
    }

    let changes = all_lines
        .iter()
        .filter(|(_, _, change_type)| *change_type != ChangeType::Unchanged)
        .map(|(line_number, content, change_type)| LineChange {
            line_number: *line_number,
            change_type: change_type.clone(),
            content: content.clone(),
        })
        .collect();

    FileDiff {
        file_path: file_path.display().to_string(),
        changes,
        all_lines,
        outcomes: result.outcomes,
    }
}
