//! Pre-mutation guards shared by the workflow commands
//!
//! Both checks are read-only: they query git but never change branch or
//! working-tree state.

use crate::branch::Branch;
use crate::git::GitClient;

use super::error::FlowError;

/// A porcelain status line counts as dirty unless it reports an untracked
/// (`??`) or ignored (`!!`) entry. Only pending tracked changes block.
fn is_dirty_line(line: &str) -> bool {
    !line.trim().is_empty() && !line.starts_with("??") && !line.starts_with("!!")
}

/// Fail unless the working tree has no pending tracked changes.
pub async fn ensure_clean(git: &GitClient) -> Result<(), FlowError> {
    let status = git.status_porcelain().await?;
    if status.lines().any(is_dirty_line) {
        return Err(FlowError::DirtyTree);
    }
    Ok(())
}

/// Fail unless the current branch satisfies `expected`.
///
/// Returns the parsed branch so callers don't query twice. `description`
/// names what was expected in the error message.
pub async fn ensure_branch<F>(git: &GitClient, expected: F, description: &str) -> Result<Branch, FlowError>
where
    F: Fn(&Branch) -> bool,
{
    let branch = git.current_branch().await?;
    if !expected(&branch) {
        return Err(FlowError::WrongBranch {
            actual: branch.name().to_string(),
            expected: description.to_string(),
        });
    }
    Ok(branch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untracked_and_ignored_are_not_dirty() {
        assert!(!is_dirty_line("?? scratch.txt"));
        assert!(!is_dirty_line("!! target/"));
        assert!(!is_dirty_line(""));
    }

    #[test]
    fn test_tracked_changes_are_dirty() {
        assert!(is_dirty_line(" M src/lib.rs"));
        assert!(is_dirty_line("A  new.rs"));
        assert!(is_dirty_line("D  gone.rs"));
        assert!(is_dirty_line("UU conflicted.rs"));
    }
}
