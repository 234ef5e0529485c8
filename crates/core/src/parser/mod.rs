//! Syntax-tree extraction of test blocks and import specifiers

pub mod typescript;

pub use typescript::TypeScriptTestParser;

use std::path::Path;
use thiserror::Error;

/// Error types for parsing operations
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),
}

/// A single test-defining call in one version of a source file.
///
/// The span covers the entire call expression, including its callback
/// body, as 1-based inclusive line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBlock {
    /// Display name, taken from the call's first (literal) argument
    pub name: String,

    pub start_line: usize,
    pub end_line: usize,
}

/// Capability interface over a syntax-tree library.
///
/// Two file versions are always parsed in isolation and their block sets
/// compared afterwards; nothing here mutates shared state.
pub trait TestBlockParser: Send + Sync {
    /// Name of the language this parser handles
    fn language_name(&self) -> &str;

    /// Enumerate well-formed test-defining calls in the source.
    ///
    /// Source that fails to parse entirely yields an empty list; isolated
    /// syntax errors elsewhere in the file do not prevent extraction of
    /// the calls that did parse.
    fn extract_blocks(&self, source: &str) -> Vec<TestBlock>;

    /// Module specifiers exactly as written in the source's import statements
    fn extract_imports(&self, source: &str) -> Vec<String>;

    /// Read a file and enumerate its test blocks
    fn extract_blocks_from_file(&self, path: &Path) -> Result<Vec<TestBlock>, ParseError> {
        let source = std::fs::read_to_string(path)?;
        Ok(self.extract_blocks(&source))
    }

    /// Read a file and enumerate its import specifiers
    fn imports_from_file(&self, path: &Path) -> Result<Vec<String>, ParseError> {
        let source = std::fs::read_to_string(path)?;
        Ok(self.extract_imports(&source))
    }
}
