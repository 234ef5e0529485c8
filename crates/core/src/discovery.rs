//! Test-file discovery with gitignore-aware filtering
//!
//! Uses the `ignore` crate (from ripgrep) to automatically respect
//! `.gitignore`, `.ignore`, and `.git/info/exclude` files while walking
//! the repository tree.

use anyhow::Result;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Discover test files under `root` whose names end with any of the given
/// `suffixes`, skipping hidden directories and paths matching
/// `ignore_patterns`.
///
/// Returns absolute paths sorted alphabetically.
pub fn discover_test_files(
    root: &Path,
    suffixes: &[String],
    ignore_patterns: &[String],
) -> Result<Vec<PathBuf>> {
    let root = root.canonicalize()?;

    let mut builder = WalkBuilder::new(&root);
    builder
        .hidden(true) // skip hidden files/dirs
        .git_ignore(true) // respect .gitignore
        .git_global(true) // respect global gitignore
        .git_exclude(true); // respect .git/info/exclude

    // Configured ignore patterns become negated overrides, which act as
    // excludes in gitignore syntax.
    if !ignore_patterns.is_empty() {
        let mut overrides = OverrideBuilder::new(&root);
        for pattern in ignore_patterns {
            // Convert directory patterns like "node_modules/" to "!node_modules/**"
            let glob = if pattern.ends_with('/') {
                format!("!{}**", pattern)
            } else {
                format!("!{}", pattern)
            };
            overrides.add(&glob)?;
        }
        builder.overrides(overrides.build()?);
    }

    let mut files = Vec::new();

    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue, // skip unreadable entries
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.into_path();
        if has_matching_suffix(&path, suffixes) {
            if path.is_absolute() {
                files.push(path);
            } else {
                files.push(root.join(path));
            }
        }
    }

    files.sort();
    Ok(files)
}

fn has_matching_suffix(path: &Path, suffixes: &[String]) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => suffixes.iter().any(|s| name.ends_with(s.as_str())),
        None => false,
    }
}
