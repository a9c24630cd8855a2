//! Brace and parenthesis balance check for patched components
//!
//! A rule that fires against a drifted anchor can leave a component with
//! unbalanced brackets. This is a coarse character count, not a TSX
//! parser: brackets inside strings and comments are counted too, so a
//! balanced report is a sanity signal rather than a compile guarantee.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Bracket counts for one file, as (open, close) pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub file: PathBuf,
    pub braces: (usize, usize),
    pub parens: (usize, usize),
}

impl BalanceReport {
    pub fn braces_balanced(&self) -> bool {
        self.braces.0 == self.braces.1
    }

    pub fn parens_balanced(&self) -> bool {
        self.parens.0 == self.parens.1
    }

    pub fn is_balanced(&self) -> bool {
        self.braces_balanced() && self.parens_balanced()
    }
}

/// Count bracket pairs in one file
pub fn check_file(path: &Path) -> Result<BalanceReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(check_content(path, &content))
}

/// Count bracket pairs in already-loaded content
pub fn check_content(path: &Path, content: &str) -> BalanceReport {
    let mut open_braces = 0;
    let mut close_braces = 0;
    let mut open_parens = 0;
    let mut close_parens = 0;

    for ch in content.chars() {
        match ch {
            '{' => open_braces += 1,
            '}' => close_braces += 1,
            '(' => open_parens += 1,
            ')' => close_parens += 1,
            _ => {}
        }
    }

    BalanceReport {
        file: path.to_path_buf(),
        braces: (open_braces, close_braces),
        parens: (open_parens, close_parens),
    }
}
