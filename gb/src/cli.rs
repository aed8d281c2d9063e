//! CLI argument parsing for gb

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gb")]
#[command(author, version, about = "Guarded git branching workflows", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run as if gb was started in this directory
    #[arg(short = 'C', long = "repo", default_value = ".")]
    pub repo: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a task branch off dev
    Task {
        /// Task name (prompted for when omitted)
        #[arg(short = 'm', long = "name")]
        name: Option<String>,
    },

    /// Merge the current task branch back into dev
    TaskDone,

    /// Start a fix branch off the release branch you are on
    Fix {
        /// Fix name (prompted for when omitted)
        #[arg(short = 'm', long = "name")]
        name: Option<String>,
    },

    /// Merge the current fix into the latest release branch and into dev
    FixDone,

    /// Push the latest release branch and dev to the remote
    FixPush,

    /// Cut the next release branch off dev
    NewRelease,
}

impl Command {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Task { .. } => "task",
            Self::TaskDone => "task-done",
            Self::Fix { .. } => "fix",
            Self::FixDone => "fix-done",
            Self::FixPush => "fix-push",
            Self::NewRelease => "new-release",
        }
    }
}
