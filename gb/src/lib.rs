//! Brancher - guarded git branching workflows
//!
//! Encodes a release/dev/task/fix branching convention as a small set of
//! guarded commands. Each command validates the working tree and the
//! current branch, then drives the git CLI through the required pulls,
//! checkouts, merges, and pushes.
//!
//! # Branch roles
//!
//! ```text
//! release-<N>   long-lived branch for a shipped version line
//! dev           shared integration branch
//! task/<slug>   short-lived branch for one task, started from dev
//! fix/<slug>    short-lived branch for one fix, started from a release
//! ```
//!
//! # Example
//!
//! ```ignore
//! use brancher::{GitClient, Workflow};
//!
//! let git = GitClient::new(".", "origin");
//! let workflow = Workflow::new(git);
//! let branch = workflow.start_task(Some("add oauth")).await?;
//! assert_eq!(branch.name(), "task/add-oauth");
//! ```

pub mod branch;
pub mod cli;
pub mod config;
pub mod events;
pub mod git;
pub mod naming;
pub mod workflow;

pub use branch::{Branch, DEV_BRANCH, Role, latest_release};
pub use events::{Notifier, WorkflowEvent};
pub use git::{GitClient, GitError};
pub use workflow::{FlowError, Workflow};
