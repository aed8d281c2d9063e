//! Error taxonomy for workflow commands

use crate::git::GitError;
use crate::naming::NamingError;

/// Terminal failure of a workflow command
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("working tree is dirty. run `git add` and `git commit` to save your changes first")]
    DirtyTree,

    #[error("currently on \"{actual}\", expected {expected}")]
    WrongBranch { actual: String, expected: String },

    #[error(
        "merge into \"{target}\" stopped on conflicts. resolve the listed files and commit, or run `git merge --abort` to back out"
    )]
    MergeConflict { target: String, paths: Vec<String> },

    #[error("no release branch found. create one with `gb new-release` first")]
    NoReleaseBranch,

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    Git(#[from] GitError),
}

impl FlowError {
    /// Unmerged paths for conflict failures, empty otherwise
    pub fn conflict_paths(&self) -> &[String] {
        match self {
            Self::MergeConflict { paths, .. } => paths,
            _ => &[],
        }
    }
}
