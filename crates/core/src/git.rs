//! Git-backed version fetching: commit diffs and blob contents without checkout
//!
//! The impact engine only ever needs three things from version control:
//! the text of a commit's diff against its parent, and the content of a
//! file at the commit or at its parent. [`VersionFetcher`] captures that
//! boundary so tests can drive the classifier without a repository.

use anyhow::{Context, Result};
use git2::{Commit, DiffFormat, DiffOptions, Repository};
use std::path::Path;

/// Supplies per-commit diff text and file blobs.
///
/// Absence (a file missing at a commit, a commit with no parent) is
/// reported as `Ok(None)`, never as an error; the only fatal condition
/// is a commit reference that cannot be resolved at all.
pub trait VersionFetcher {
    /// Unified zero-context, unprefixed diff of the commit against its parent
    fn diff_text(&self, commit: &str) -> Result<String>;

    /// File content at the commit, or `None` if absent/binary
    fn content_at(&self, commit: &str, path: &Path) -> Result<Option<String>>;

    /// File content at the commit's parent, or `None` if absent/binary
    fn content_before(&self, commit: &str, path: &Path) -> Result<Option<String>>;
}

/// Reads diffs and file contents from a git repository via libgit2
pub struct GitVersionFetcher {
    repo: Repository,
}

impl GitVersionFetcher {
    /// Open the repository at the given path
    pub fn new(repo_path: &Path) -> Result<Self> {
        let repo = Repository::open(repo_path).context("Failed to open git repository")?;
        Ok(Self { repo })
    }

    fn resolve_commit(&self, spec: &str) -> Result<Commit<'_>> {
        let obj = self
            .repo
            .revparse_single(spec)
            .with_context(|| format!("Failed to resolve commit '{}'", spec))?;
        obj.peel_to_commit()
            .with_context(|| format!("'{}' does not point to a commit", spec))
    }

    /// Read a blob at a given tree, skipping binary and non-UTF-8 content
    fn read_blob(&self, tree: &git2::Tree, path: &Path) -> Result<Option<String>> {
        let entry = match tree.get_path(path) {
            Ok(e) => e,
            Err(_) => return Ok(None),
        };

        let blob = self
            .repo
            .find_blob(entry.id())
            .context("Failed to read blob")?;

        if blob.is_binary() {
            return Ok(None);
        }

        match std::str::from_utf8(blob.content()) {
            Ok(s) => Ok(Some(s.to_string())),
            Err(_) => Ok(None),
        }
    }
}

impl VersionFetcher for GitVersionFetcher {
    fn diff_text(&self, commit: &str) -> Result<String> {
        let commit = self.resolve_commit(commit)?;
        let tree = commit.tree().context("Failed to get tree from commit")?;

        // Root commits diff against the empty tree
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree().context("Failed to get parent tree")?),
            Err(_) => None,
        };

        let mut opts = DiffOptions::new();
        opts.context_lines(0).old_prefix("").new_prefix("");

        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            match line.origin() {
                '+' | '-' | ' ' => text.push(line.origin()),
                _ => {}
            }
            if let Ok(content) = std::str::from_utf8(line.content()) {
                text.push_str(content);
            }
            true
        })?;

        Ok(text)
    }

    fn content_at(&self, commit: &str, path: &Path) -> Result<Option<String>> {
        let commit = self.resolve_commit(commit)?;
        let tree = commit.tree().context("Failed to get tree from commit")?;
        self.read_blob(&tree, path)
    }

    fn content_before(&self, commit: &str, path: &Path) -> Result<Option<String>> {
        let commit = self.resolve_commit(commit)?;
        let parent = match commit.parent(0) {
            Ok(p) => p,
            Err(_) => return Ok(None),
        };
        let tree = parent.tree().context("Failed to get parent tree")?;
        self.read_blob(&tree, path)
    }
}
