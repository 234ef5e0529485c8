//! Commit impact classification
//!
//! Orchestrates the diff parser, test-block extractor, and import
//! resolver to decide which tests a commit added, removed, or modified.
//! Test files contribute direct impacts by comparing their old and new
//! block sets; helper files fan out indirectly to every test file that
//! imports them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::ImpactConfig;
use crate::diff::{ChangeType, ChangedFile, DiffParser};
use crate::git::{GitVersionFetcher, VersionFetcher};
use crate::parser::{TestBlock, TestBlockParser, TypeScriptTestParser};
use crate::resolver::ImportResolver;

/// How a commit impacted a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactType {
    Added,
    Removed,
    Modified,
}

impl std::fmt::Display for ImpactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactType::Added => write!(f, "added"),
            ImpactType::Removed => write!(f, "removed"),
            ImpactType::Modified => write!(f, "modified"),
        }
    }
}

/// One impacted test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub test_name: String,

    /// Repo-relative path of the file containing the test
    pub file: String,

    pub impact_type: ImpactType,

    /// True when the cause was a change to an imported helper file
    pub indirect: bool,
}

/// Counts for display grouping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub indirect: usize,
    pub files_changed: usize,
}

/// Result of analyzing one commit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactReport {
    /// Direct impacts first, then indirect
    pub results: Vec<ImpactResult>,

    /// Per-file degradations that did not abort the analysis
    pub warnings: Vec<String>,

    pub files_changed: usize,
}

impl ImpactReport {
    pub fn summary(&self) -> ImpactSummary {
        let mut summary = ImpactSummary {
            files_changed: self.files_changed,
            ..Default::default()
        };

        for r in &self.results {
            match r.impact_type {
                ImpactType::Added => summary.added += 1,
                ImpactType::Removed => summary.removed += 1,
                ImpactType::Modified => summary.modified += 1,
            }
            if r.indirect {
                summary.indirect += 1;
            }
        }

        summary
    }
}

/// Analyzes which tests a commit impacted
pub struct ImpactAnalyzer {
    root: PathBuf,
    config: ImpactConfig,
    fetcher: Box<dyn VersionFetcher>,
    parser: TypeScriptTestParser,
    resolver: ImportResolver,
    diff_parser: DiffParser,
}

impl ImpactAnalyzer {
    /// Build an analyzer over an explicit version fetcher
    pub fn new(root: PathBuf, config: ImpactConfig, fetcher: Box<dyn VersionFetcher>) -> Self {
        let parser = TypeScriptTestParser::new(config.files.test_callees.clone());
        let resolver = ImportResolver::new(root.clone(), &config);

        Self {
            root,
            config,
            fetcher,
            parser,
            resolver,
            diff_parser: DiffParser::new(),
        }
    }

    /// Open a git repository and load its configuration
    pub fn open(repo_path: &Path) -> Result<Self> {
        let root = repo_path
            .canonicalize()
            .with_context(|| format!("Repository path '{}' not found", repo_path.display()))?;
        let config = ImpactConfig::find_and_load(&root)?;
        let fetcher = Box::new(GitVersionFetcher::new(&root)?);

        Ok(Self::new(root, config, fetcher))
    }

    pub fn config(&self) -> &ImpactConfig {
        &self.config
    }

    /// Classify every test impacted by the given commit.
    ///
    /// The only fatal error is a commit that cannot be resolved; a file
    /// whose content or parse is unavailable contributes nothing and
    /// leaves a warning on the report.
    pub fn analyze(&self, commit: &str) -> Result<ImpactReport> {
        let diff_text = self.fetcher.diff_text(commit)?;
        let changed = self.diff_parser.parse(&diff_text);

        let mut report = ImpactReport {
            files_changed: changed.len(),
            ..Default::default()
        };

        let (test_files, helper_files): (Vec<&ChangedFile>, Vec<&ChangedFile>) = changed
            .iter()
            .filter(|f| self.config.is_source_file(&f.path))
            .partition(|f| self.config.is_test_file(&f.path));

        for file in test_files {
            self.classify_test_file(commit, file, &mut report);
        }

        for file in helper_files {
            self.classify_helper_file(file, &mut report);
        }

        Ok(report)
    }

    /// Direct impacts: compare the file's own old and new block sets
    fn classify_test_file(&self, commit: &str, file: &ChangedFile, report: &mut ImpactReport) {
        match file.change_type {
            ChangeType::Added => {
                let Some(content) = self.fetch_new(commit, file, report) else {
                    return;
                };
                for block in self.parser.extract_blocks(&content) {
                    report.results.push(direct(block.name, file, ImpactType::Added));
                }
            }
            ChangeType::Deleted => {
                let Some(content) = self.fetch_old(commit, file, report) else {
                    return;
                };
                for block in self.parser.extract_blocks(&content) {
                    report
                        .results
                        .push(direct(block.name, file, ImpactType::Removed));
                }
            }
            ChangeType::Modified => {
                let Some(old) = self.fetch_old(commit, file, report) else {
                    return;
                };
                let Some(new) = self.fetch_new(commit, file, report) else {
                    return;
                };

                let old_blocks = self.parser.extract_blocks(&old);
                let new_blocks = self.parser.extract_blocks(&new);
                self.diff_blocks(file, &old_blocks, &new_blocks, report);
            }
        }
    }

    /// Name-set difference plus changed-line overlap for surviving tests.
    ///
    /// A renamed test surfaces as one removal and one addition; names are
    /// matched by exact string equality only.
    fn diff_blocks(
        &self,
        file: &ChangedFile,
        old_blocks: &[TestBlock],
        new_blocks: &[TestBlock],
        report: &mut ImpactReport,
    ) {
        let old_names: HashSet<&str> = old_blocks.iter().map(|b| b.name.as_str()).collect();
        let new_names: HashSet<&str> = new_blocks.iter().map(|b| b.name.as_str()).collect();

        // A test cannot be both added and modified in one pass
        let mut added_names: HashSet<&str> = HashSet::new();

        for block in new_blocks {
            if !old_names.contains(block.name.as_str()) {
                added_names.insert(block.name.as_str());
                report
                    .results
                    .push(direct(block.name.clone(), file, ImpactType::Added));
            }
        }

        for block in old_blocks {
            if !new_names.contains(block.name.as_str()) {
                report
                    .results
                    .push(direct(block.name.clone(), file, ImpactType::Removed));
            }
        }

        for block in new_blocks {
            if old_names.contains(block.name.as_str())
                && !added_names.contains(block.name.as_str())
                && overlaps(block, file)
            {
                report
                    .results
                    .push(direct(block.name.clone(), file, ImpactType::Modified));
            }
        }
    }

    /// Indirect impacts: every current test block of every test file that
    /// imports the changed helper. No line-overlap check applies; impact
    /// below file granularity is not attributable here.
    fn classify_helper_file(&self, file: &ChangedFile, report: &mut ImpactReport) {
        let target = self.root.join(&file.path);

        let importers = match self.resolver.test_files_importing(&target) {
            Ok(files) => files,
            Err(e) => {
                report
                    .warnings
                    .push(format!("{}: reverse-import scan failed: {}", file.path, e));
                return;
            }
        };

        // Discovery returns canonical paths; strip against the canonical root
        let canonical_root = self
            .root
            .canonicalize()
            .unwrap_or_else(|_| self.root.clone());

        for test_file in importers {
            let blocks = match self.parser.extract_blocks_from_file(&test_file) {
                Ok(blocks) => blocks,
                Err(e) => {
                    report
                        .warnings
                        .push(format!("{}: {}", test_file.display(), e));
                    continue;
                }
            };

            let rel = test_file
                .strip_prefix(&canonical_root)
                .or_else(|_| test_file.strip_prefix(&self.root))
                .unwrap_or(&test_file)
                .to_string_lossy()
                .to_string();

            for block in blocks {
                report.results.push(ImpactResult {
                    test_name: block.name,
                    file: rel.clone(),
                    impact_type: ImpactType::Modified,
                    indirect: true,
                });
            }
        }
    }

    fn fetch_new(
        &self,
        commit: &str,
        file: &ChangedFile,
        report: &mut ImpactReport,
    ) -> Option<String> {
        match self.fetcher.content_at(commit, Path::new(&file.path)) {
            Ok(content) => content,
            Err(e) => {
                report.warnings.push(format!("{}: {}", file.path, e));
                None
            }
        }
    }

    fn fetch_old(
        &self,
        commit: &str,
        file: &ChangedFile,
        report: &mut ImpactReport,
    ) -> Option<String> {
        match self.fetcher.content_before(commit, Path::new(&file.path)) {
            Ok(content) => content,
            Err(e) => {
                report.warnings.push(format!("{}: {}", file.path, e));
                None
            }
        }
    }
}

fn direct(test_name: String, file: &ChangedFile, impact_type: ImpactType) -> ImpactResult {
    ImpactResult {
        test_name,
        file: file.path.clone(),
        impact_type,
        indirect: false,
    }
}

/// At least one added line falls within the block's inclusive span
fn overlaps(block: &TestBlock, file: &ChangedFile) -> bool {
    file.added_lines
        .range(block.start_line..=block.end_line)
        .next()
        .is_some()
}
