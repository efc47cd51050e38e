//! Locating the newest post folder.
//!
//! Posts live in sibling directories named `Blog Post 1`, `Blog Post 2`,
//! ... (or `Post N` for social posts). Generated images go into the one
//! with the highest number.

use crate::config::Config;
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

const BLOG_PREFIX: &str = "Blog Post";
const POST_PREFIX: &str = "Post";

/// Sub-directory of `base` named `"{prefix} N"` with the highest `N`.
pub fn latest_numbered_folder(base: &Path, prefix: &str) -> CoreResult<PathBuf> {
    let mut latest: Option<(u64, PathBuf)> = None;
    if base.is_dir() {
        for entry in std::fs::read_dir(base)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name();
            let Some(number) = name.to_str().and_then(|name| folder_number(name, prefix)) else {
                continue;
            };

            if latest.as_ref().is_none_or(|(best, _)| number > *best) {
                latest = Some((number, entry.path()));
            }
        }
    }

    latest.map(|(_, path)| path).ok_or_else(|| CoreError::NoNumberedFolder {
        prefix: prefix.to_string(),
        base: base.display().to_string(),
    })
}

fn folder_number(name: &str, prefix: &str) -> Option<u64> {
    let digits = name.strip_prefix(prefix)?.strip_prefix(' ')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Newest `Blog Post N` folder under `paths.blog_posts`.
pub fn latest_blog_folder(config: &Config) -> CoreResult<PathBuf> {
    let base = config.paths.blog_posts.as_deref().ok_or_else(|| not_configured(BLOG_PREFIX))?;
    latest_numbered_folder(base, BLOG_PREFIX)
}

/// `Code` folder of the newest `Post N` under `paths.linkedin_posts`.
pub fn latest_post_folder(config: &Config) -> CoreResult<PathBuf> {
    let base = config
        .paths
        .linkedin_posts
        .as_deref()
        .ok_or_else(|| not_configured(POST_PREFIX))?;
    Ok(latest_numbered_folder(base, POST_PREFIX)?.join("Code"))
}

fn not_configured(prefix: &str) -> CoreError {
    CoreError::NoNumberedFolder {
        prefix: prefix.to_string(),
        base: "<not configured>".to_string(),
    }
}
