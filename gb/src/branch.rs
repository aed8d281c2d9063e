//! Parsed branch names and release-branch resolution
//!
//! Branch names are parsed once at the git boundary; everything downstream
//! matches on [`Role`] variants instead of raw string prefixes.

use std::fmt;

/// Name of the shared integration branch
pub const DEV_BRANCH: &str = "dev";

const RELEASE_PREFIX: &str = "release-";
const TASK_PREFIX: &str = "task/";
const FIX_PREFIX: &str = "fix/";

/// Role a branch plays in the branching convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Shared integration branch (`dev`)
    Dev,
    /// Long-lived release line (`release-<N>`)
    Release(u64),
    /// Short-lived task branch (`task/<slug>`)
    Task(String),
    /// Short-lived fix branch (`fix/<slug>`)
    Fix(String),
    /// Anything outside the convention
    Other,
}

/// A branch name together with its parsed role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    name: String,
    role: Role,
}

impl Branch {
    /// Parse a raw branch name into its conventional role.
    ///
    /// Names that look like a release but carry a non-numeric version
    /// token (e.g. `release-notes`) classify as [`Role::Other`], so they
    /// never enter release resolution.
    pub fn parse(name: &str) -> Self {
        let role = if name == DEV_BRANCH {
            Role::Dev
        } else if let Some(version) = name.strip_prefix(RELEASE_PREFIX) {
            match version.parse::<u64>() {
                Ok(v) => Role::Release(v),
                Err(_) => Role::Other,
            }
        } else if let Some(slug) = name.strip_prefix(TASK_PREFIX) {
            if slug.is_empty() {
                Role::Other
            } else {
                Role::Task(slug.to_string())
            }
        } else if let Some(slug) = name.strip_prefix(FIX_PREFIX) {
            if slug.is_empty() {
                Role::Other
            } else {
                Role::Fix(slug.to_string())
            }
        } else {
            Role::Other
        };

        Self {
            name: name.to_string(),
            role,
        }
    }

    /// Build a `task/<slug>` branch
    pub fn task(slug: &str) -> Self {
        Self {
            name: format!("{}{}", TASK_PREFIX, slug),
            role: Role::Task(slug.to_string()),
        }
    }

    /// Build a `fix/<slug>` branch
    pub fn fix(slug: &str) -> Self {
        Self {
            name: format!("{}{}", FIX_PREFIX, slug),
            role: Role::Fix(slug.to_string()),
        }
    }

    /// Build a `release-<N>` branch
    pub fn release(version: u64) -> Self {
        Self {
            name: format!("{}{}", RELEASE_PREFIX, version),
            role: Role::Release(version),
        }
    }

    /// Full branch name as git knows it
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parsed role
    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_dev(&self) -> bool {
        self.role == Role::Dev
    }

    pub fn is_release(&self) -> bool {
        matches!(self.role, Role::Release(_))
    }

    pub fn is_task(&self) -> bool {
        matches!(self.role, Role::Task(_))
    }

    pub fn is_fix(&self) -> bool {
        matches!(self.role, Role::Fix(_))
    }

    /// Version token for release branches, `None` otherwise
    pub fn release_version(&self) -> Option<u64> {
        match self.role {
            Role::Release(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Pick the highest-versioned release branch out of raw `git branch` output.
///
/// Each line is trimmed and the current-branch marker (`* `) stripped
/// before parsing; only names that parse as `release-<N>` survive. The
/// sort is stable, so when two entries carry the same version token the
/// one listed last wins.
pub fn latest_release(listing: &str) -> Option<Branch> {
    let mut releases: Vec<Branch> = listing
        .lines()
        .map(|line| line.trim().strip_prefix("* ").unwrap_or(line.trim()).trim())
        .filter(|name| !name.is_empty())
        .map(Branch::parse)
        .filter(Branch::is_release)
        .collect();

    releases.sort_by_key(|b| b.release_version().unwrap_or(0));
    releases.pop()
}
