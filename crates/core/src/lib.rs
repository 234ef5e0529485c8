//! testimpact core - commit-scoped test impact analysis
//!
//! This crate decides which browser-automation tests a commit plausibly
//! affected:
//! - Unified diff parsing into per-file line-change sets
//! - Test-block extraction via Tree-sitter
//! - Relative import resolution and reverse-import lookup
//! - Direct and indirect impact classification

pub mod config;
pub mod diff;
pub mod discovery;
pub mod git;
pub mod impact;
pub mod parser;
pub mod resolver;

pub use config::ImpactConfig;
pub use diff::{ChangeType, ChangedFile, DiffParser};
pub use discovery::discover_test_files;
pub use git::{GitVersionFetcher, VersionFetcher};
pub use impact::{ImpactAnalyzer, ImpactReport, ImpactResult, ImpactSummary, ImpactType};
pub use parser::{ParseError, TestBlock, TestBlockParser, TypeScriptTestParser};
pub use resolver::ImportResolver;

/// testimpact version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
