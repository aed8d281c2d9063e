//! Branch-name generation from free-text descriptions
//!
//! Free text comes in from the `-m` flag or, when that is absent, from a
//! one-line interactive prompt. Either way it is slugified into a git-safe
//! branch suffix before use.

use rustyline::DefaultEditor;
use tracing::debug;

/// Errors from name resolution
#[derive(Debug, thiserror::Error)]
pub enum NamingError {
    #[error("name {0:?} is empty after sanitization")]
    Empty(String),

    #[error("failed to read name from prompt: {0}")]
    Prompt(#[from] rustyline::error::ReadlineError),
}

/// Slugify free text into a branch suffix.
///
/// Lowercases, strips apostrophes entirely, and collapses every other run
/// of non-alphanumeric characters to a single hyphen.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None // straight and curly apostrophes
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Resolve a branch suffix from the `-m` flag, prompting when absent.
pub fn resolve_slug(flag: Option<&str>, label: &str) -> Result<String, NamingError> {
    let raw = match flag {
        Some(text) => text.to_string(),
        None => {
            debug!(%label, "resolve_slug: prompting");
            let mut rl = DefaultEditor::new()?;
            rl.readline(&format!("{}: ", label))?
        }
    };

    let slug = slugify(&raw);
    if slug.is_empty() {
        return Err(NamingError::Empty(raw));
    }
    Ok(slug)
}
