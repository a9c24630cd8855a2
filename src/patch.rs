//! Fix and rule model
//!
//! A fix is an ordered list of literal substitution rules against one
//! source file of the project. Rules carry no pattern syntax: the find
//! text must appear verbatim in the file for the replacement to happen.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// An exact find/replace text pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    /// Text that must be present verbatim
    pub find: String,

    /// Text substituted for every occurrence of `find`
    pub replace: String,
}

impl Substitution {
    pub fn new(find: &str, replace: &str) -> Self {
        Self {
            find: find.to_string(),
            replace: replace.to_string(),
        }
    }

    /// Whether `find` occurs in the content. An empty find text never
    /// matches; `str::contains` would report true for it and `apply`
    /// would then splice the replacement between every character.
    pub fn matches(&self, content: &str) -> bool {
        !self.find.is_empty() && content.contains(&self.find)
    }

    /// Number of non-overlapping occurrences of `find` in the content.
    pub fn occurrences(&self, content: &str) -> usize {
        if self.find.is_empty() {
            return 0;
        }
        content.matches(&self.find).count()
    }

    /// Replace all occurrences, returning the new buffer.
    pub fn apply(&self, content: &str) -> String {
        content.replace(&self.find, &self.replace)
    }
}

/// One step of a fix: a primary substitution plus an optional alternate
/// anchor tried when the primary text is absent (used where the
/// surrounding code moved between revisions of the target file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Short description shown in progress output
    pub label: String,

    /// The substitution normally applied
    pub primary: Substitution,

    /// Fallback substitution for a shifted anchor
    pub alternate: Option<Substitution>,
}

impl Rule {
    pub fn new(label: &str, find: &str, replace: &str) -> Self {
        Self {
            label: label.to_string(),
            primary: Substitution::new(find, replace),
            alternate: None,
        }
    }

    pub fn with_alternate(mut self, find: &str, replace: &str) -> Self {
        self.alternate = Some(Substitution::new(find, replace));
        self
    }
}

/// How a rule fared against a file's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleStatus {
    /// Primary anchor found, all occurrences replaced
    Applied { occurrences: usize },

    /// Primary anchor absent, alternate anchor found and replaced
    AppliedAlternate { occurrences: usize },

    /// No anchor found, content untouched by this rule
    Skipped,
}

impl RuleStatus {
    pub fn is_applied(&self) -> bool {
        !matches!(self, RuleStatus::Skipped)
    }
}

/// The recorded result of running one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub label: String,
    pub status: RuleStatus,
}

/// A named, ordered patch against one file of the project.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    /// Catalog name, used on the command line
    pub name: String,

    /// One-line description for listings
    pub summary: String,

    /// Target file, relative to the project root
    pub target: PathBuf,

    /// Substitutions in application order
    pub rules: Vec<Rule>,
}
