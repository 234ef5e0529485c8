//! Unified diff parsing into per-file line-change sets
//!
//! The input is the text of a single commit's diff produced with zero
//! context lines and no `a/`/`b/` path prefixes (see [`crate::git`]).
//! Line numbers recorded here are absolute 1-based positions in the old
//! or new file version, not diff-relative offsets.

use regex::Regex;
use std::collections::BTreeSet;

/// Type of change to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Added,
    Deleted,
    Modified,
}

/// A file that has been changed in a commit
#[derive(Debug, Clone)]
pub struct ChangedFile {
    /// Repo-relative path
    pub path: String,

    pub change_type: ChangeType,

    /// Line numbers present in the new version that this commit added
    pub added_lines: BTreeSet<usize>,

    /// Line numbers present in the old version that this commit deleted
    pub deleted_lines: BTreeSet<usize>,
}

impl ChangedFile {
    fn new() -> Self {
        Self {
            path: String::new(),
            change_type: ChangeType::Modified,
            added_lines: BTreeSet::new(),
            deleted_lines: BTreeSet::new(),
        }
    }
}

/// Parses unified diff text into [`ChangedFile`] records
pub struct DiffParser {
    hunk_re: Regex,
}

impl Default for DiffParser {
    fn default() -> Self {
        Self {
            hunk_re: Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@")
                .expect("hunk header pattern is valid"),
        }
    }
}

impl DiffParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one commit's diff into per-file change records.
    ///
    /// Files with no textual hunks (renames, binary files) come back with
    /// empty line sets; callers must tolerate them. Unparsable hunk
    /// headers are skipped without losing the file's other hunks.
    pub fn parse(&self, diff_text: &str) -> Vec<ChangedFile> {
        let mut files: Vec<ChangedFile> = Vec::new();
        let mut current: Option<ChangedFile> = None;

        for line in diff_text.lines() {
            if line.starts_with("diff --git ") {
                if let Some(file) = current.take() {
                    if !file.path.is_empty() {
                        files.push(file);
                    }
                }
                current = Some(ChangedFile::new());
                continue;
            }

            let Some(file) = current.as_mut() else {
                continue;
            };

            if let Some(old_path) = line.strip_prefix("--- ") {
                if old_path == "/dev/null" {
                    // No old side: the file is new in this commit
                    file.change_type = ChangeType::Added;
                } else {
                    file.path = old_path.to_string();
                }
            } else if let Some(new_path) = line.strip_prefix("+++ ") {
                if new_path == "/dev/null" {
                    file.change_type = ChangeType::Deleted;
                } else {
                    file.path = new_path.to_string();
                }
            } else if line.starts_with("@@") {
                self.record_hunk(line, file);
            }
        }

        if let Some(file) = current {
            if !file.path.is_empty() {
                files.push(file);
            }
        }

        files
    }

    /// Decode one `@@ -oldStart[,oldCount] +newStart[,newCount] @@` header.
    ///
    /// Omitted counts default to 1. A malformed header is skipped silently.
    fn record_hunk(&self, line: &str, file: &mut ChangedFile) {
        let Some(caps) = self.hunk_re.captures(line) else {
            return;
        };

        let old_start: usize = match caps[1].parse() {
            Ok(n) => n,
            Err(_) => return,
        };
        let old_count: usize = match caps.get(2) {
            Some(m) => match m.as_str().parse() {
                Ok(n) => n,
                Err(_) => return,
            },
            None => 1,
        };
        let new_start: usize = match caps[3].parse() {
            Ok(n) => n,
            Err(_) => return,
        };
        let new_count: usize = match caps.get(4) {
            Some(m) => match m.as_str().parse() {
                Ok(n) => n,
                Err(_) => return,
            },
            None => 1,
        };

        for n in old_start..old_start + old_count {
            file.deleted_lines.insert(n);
        }
        for n in new_start..new_start + new_count {
            file.added_lines.insert(n);
        }
    }
}
