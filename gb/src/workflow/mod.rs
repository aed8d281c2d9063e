//! The guarded workflow commands
//!
//! Each command is a short sequential pipeline: guards first, then the
//! git mutations. The first failing stage short-circuits the rest, and
//! the `*-done` commands notify completion observers whatever the
//! outcome.

mod checks;
mod conflicts;
mod error;

pub use conflicts::unmerged_paths;
pub use error::FlowError;

use tracing::{info, warn};

use crate::branch::{self, Branch, DEV_BRANCH};
use crate::events::{Notifier, WorkflowEvent};
use crate::git::GitClient;
use crate::naming;

/// Orchestrator for the branching convention.
///
/// Owns the git client and the completion-observer list; every command
/// re-derives branch and working-tree state from the live repository, so
/// nothing is cached across invocations.
pub struct Workflow {
    git: GitClient,
    notifier: Notifier,
}

impl Workflow {
    pub fn new(git: GitClient) -> Self {
        Self {
            git,
            notifier: Notifier::new(),
        }
    }

    /// Observer registration point; subscribe before dispatching commands
    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn git(&self) -> &GitClient {
        &self.git
    }

    /// `task`: branch a new task off an up-to-date dev.
    pub async fn start_task(&self, name: Option<&str>) -> Result<Branch, FlowError> {
        checks::ensure_clean(&self.git).await?;
        checks::ensure_branch(
            &self.git,
            Branch::is_dev,
            "\"dev\". run `git checkout dev` to switch",
        )
        .await?;

        if let Err(err) = self.git.pull_rebase(DEV_BRANCH).await {
            warn!(%err, "pull not possible, continuing with the local dev state");
        }

        let slug = naming::resolve_slug(name, "task name")?;
        let task = Branch::task(&slug);
        self.git.checkout_new(task.name()).await?;
        Ok(task)
    }

    /// `task-done`: merge the current task branch back into dev.
    pub async fn finish_task(&self) -> Result<Branch, FlowError> {
        let result = self.finish_task_inner().await;
        self.notifier.notify(&WorkflowEvent::TaskDone {
            error: result.as_ref().err().map(ToString::to_string),
        });
        result
    }

    async fn finish_task_inner(&self) -> Result<Branch, FlowError> {
        let task = checks::ensure_branch(&self.git, Branch::is_task, "a \"task/*\" branch").await?;
        checks::ensure_clean(&self.git).await?;

        self.git.checkout(DEV_BRANCH).await?;
        if self.git.merge_no_ff(task.name()).await.is_err() {
            return Err(conflicts::report_conflicts(&self.git, DEV_BRANCH).await);
        }
        Ok(task)
    }

    /// `fix`: branch a new fix off the release branch you are on.
    pub async fn start_fix(&self, name: Option<&str>) -> Result<Branch, FlowError> {
        checks::ensure_clean(&self.git).await?;
        let release = checks::ensure_branch(
            &self.git,
            Branch::is_release,
            "a \"release-<N>\" branch. run `git checkout release-N` to switch, or `gb new-release` to create one",
        )
        .await?;

        if let Err(err) = self.git.pull_rebase(release.name()).await {
            warn!(%err, "pull not possible, continuing with the local release state");
        }

        let slug = naming::resolve_slug(name, "fix name")?;
        let fix = Branch::fix(&slug);
        self.git.checkout_new(fix.name()).await?;
        Ok(fix)
    }

    /// `fix-done`: merge the current fix into the latest release branch
    /// and into dev, ending back on the release branch.
    pub async fn finish_fix(&self) -> Result<Branch, FlowError> {
        let result = self.finish_fix_inner().await;
        self.notifier.notify(&WorkflowEvent::FixDone {
            error: result.as_ref().err().map(ToString::to_string),
        });
        result
    }

    async fn finish_fix_inner(&self) -> Result<Branch, FlowError> {
        checks::ensure_clean(&self.git).await?;
        let fix = checks::ensure_branch(&self.git, Branch::is_fix, "a \"fix/*\" branch").await?;

        let release = self.latest_release().await?;
        info!("assuming latest release branch is {}", release.name());

        // Release first: a conflict here stops the dev merge from running
        self.git.checkout(release.name()).await?;
        if self.git.merge_no_ff(fix.name()).await.is_err() {
            return Err(conflicts::report_conflicts(&self.git, release.name()).await);
        }

        self.git.checkout(DEV_BRANCH).await?;
        if self.git.merge_no_ff(fix.name()).await.is_err() {
            return Err(conflicts::report_conflicts(&self.git, DEV_BRANCH).await);
        }

        self.git.checkout(release.name()).await?;
        Ok(release)
    }

    /// `fix-push`: push the latest release branch and dev to the remote.
    pub async fn push_fix(&self) -> Result<Branch, FlowError> {
        let release = self.latest_release().await?;
        info!("assuming latest release branch is {}", release.name());

        self.git.push(release.name()).await?;
        self.git.push(DEV_BRANCH).await?;
        Ok(release)
    }

    /// `new-release`: cut the next release line off an up-to-date dev.
    ///
    /// Picks the highest existing release version plus one, or starts at
    /// `release-1` when no release branch exists yet.
    pub async fn start_release(&self) -> Result<Branch, FlowError> {
        checks::ensure_clean(&self.git).await?;
        checks::ensure_branch(
            &self.git,
            Branch::is_dev,
            "\"dev\". run `git checkout dev` to switch",
        )
        .await?;

        if let Err(err) = self.git.pull_rebase(DEV_BRANCH).await {
            warn!(%err, "pull not possible, continuing with the local dev state");
        }

        let listing = self.git.list_branches().await?;
        let next = match branch::latest_release(&listing) {
            Some(latest) => latest.release_version().unwrap_or(0) + 1,
            None => 1,
        };

        let release = Branch::release(next);
        self.git.checkout_new(release.name()).await?;
        Ok(release)
    }

    async fn latest_release(&self) -> Result<Branch, FlowError> {
        let listing = self.git.list_branches().await?;
        branch::latest_release(&listing).ok_or(FlowError::NoReleaseBranch)
    }
}
