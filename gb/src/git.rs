//! Thin client for the git CLI
//!
//! All repository access goes through [`GitClient`]; nothing else in the
//! crate shells out. Commands run in the configured repository root, and a
//! non-zero exit surfaces the captured stderr.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::branch::Branch;

/// Errors from git invocations
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// Client for a single local repository and its remote
#[derive(Debug, Clone)]
pub struct GitClient {
    repo_root: PathBuf,
    remote: String,
}

impl GitClient {
    pub fn new(repo_root: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            repo_root: repo_root.into(),
            remote: remote.into(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        debug!(?args, "GitClient::run");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(?args, %stderr, "GitClient::run: git exited non-zero");
            return Err(GitError::Failed {
                command: args.join(" "),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// `git status --porcelain`, shared by the clean check and the
    /// conflict reporter
    pub async fn status_porcelain(&self) -> Result<String, GitError> {
        self.run(&["status", "--porcelain"]).await
    }

    /// Name of the branch HEAD currently points at, parsed into its role
    pub async fn current_branch(&self) -> Result<Branch, GitError> {
        let out = self.run(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(Branch::parse(out.trim()))
    }

    /// Raw `git branch` listing, one branch per line, current branch marked
    pub async fn list_branches(&self) -> Result<String, GitError> {
        self.run(&["branch", "--list"]).await
    }

    /// `git pull --rebase <remote> <branch>`
    pub async fn pull_rebase(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["pull", "--rebase", self.remote.as_str(), branch])
            .await
            .map(drop)
    }

    /// Switch to an existing branch
    pub async fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", branch]).await.map(drop)
    }

    /// Create a branch off HEAD and switch to it
    pub async fn checkout_new(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", "-b", branch]).await.map(drop)
    }

    /// Merge with `--no-ff` so branch topology stays visible in history.
    /// `--no-edit` keeps git's generated message without opening an editor.
    pub async fn merge_no_ff(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["merge", "--no-ff", "--no-edit", branch]).await.map(drop)
    }

    /// `git push <remote> <branch>`
    pub async fn push(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["push", self.remote.as_str(), branch]).await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_git_repo(dir: &Path) {
        for args in [
            vec!["init"],
            vec!["config", "user.email", "test@test.com"],
            vec!["config", "user.name", "Test"],
            vec!["checkout", "-b", "dev"],
            vec!["commit", "--allow-empty", "-m", "initial"],
        ] {
            let status = Command::new("git")
                .args(&args)
                .current_dir(dir)
                .output()
                .await
                .unwrap();
            assert!(status.status.success(), "git {:?} failed", args);
        }
    }

    #[tokio::test]
    async fn test_current_branch() {
        let repo = tempdir().unwrap();
        setup_git_repo(repo.path()).await;

        let git = GitClient::new(repo.path(), "origin");
        let branch = git.current_branch().await.unwrap();
        assert!(branch.is_dev());
    }

    #[tokio::test]
    async fn test_status_porcelain_clean_and_dirty() {
        let repo = tempdir().unwrap();
        setup_git_repo(repo.path()).await;

        let git = GitClient::new(repo.path(), "origin");
        assert!(git.status_porcelain().await.unwrap().is_empty());

        std::fs::write(repo.path().join("new.txt"), "hello").unwrap();
        let status = git.status_porcelain().await.unwrap();
        assert!(status.contains("new.txt"));
    }

    #[tokio::test]
    async fn test_checkout_new_and_back() {
        let repo = tempdir().unwrap();
        setup_git_repo(repo.path()).await;

        let git = GitClient::new(repo.path(), "origin");
        git.checkout_new("task/example").await.unwrap();
        assert_eq!(git.current_branch().await.unwrap().name(), "task/example");

        git.checkout("dev").await.unwrap();
        assert!(git.current_branch().await.unwrap().is_dev());
    }

    #[tokio::test]
    async fn test_failed_command_carries_stderr() {
        let repo = tempdir().unwrap();
        setup_git_repo(repo.path()).await;

        let git = GitClient::new(repo.path(), "origin");
        let err = git.checkout("no-such-branch").await.unwrap_err();
        match err {
            GitError::Failed { command, stderr } => {
                assert!(command.starts_with("checkout"));
                assert!(!stderr.is_empty());
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
