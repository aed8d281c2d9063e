//! Merge-conflict reporting
//!
//! Runs only after a merge has already failed: re-queries porcelain
//! status, extracts the unmerged paths, and hands back the terminal error
//! carrying them. The merge itself is never recovered here; resolution is
//! manual (or `git merge --abort`).

use tracing::warn;

use crate::git::GitClient;

use super::error::FlowError;

/// True when a porcelain XY pair marks an unmerged path
fn is_unmerged(x: char, y: char) -> bool {
    x == 'U' || y == 'U' || (x == 'A' && y == 'A') || (x == 'D' && y == 'D')
}

/// Extract unmerged paths from `git status --porcelain` output, in the
/// order the status query returned them.
pub fn unmerged_paths(status: &str) -> Vec<String> {
    status
        .lines()
        .filter_map(|line| {
            let mut chars = line.chars();
            let x = chars.next()?;
            let y = chars.next()?;
            if !is_unmerged(x, y) {
                return None;
            }
            line.get(3..).map(|path| path.to_string())
        })
        .collect()
}

/// Build the terminal error for a merge into `target` that git rejected.
pub async fn report_conflicts(git: &GitClient, target: &str) -> FlowError {
    match git.status_porcelain().await {
        Ok(status) => {
            let paths = unmerged_paths(&status);
            warn!(%target, count = paths.len(), "merge stopped on conflicts");
            FlowError::MergeConflict {
                target: target.to_string(),
                paths,
            }
        }
        // The merge already failed; a broken status query is reported as-is
        Err(err) => err.into(),
    }
}
