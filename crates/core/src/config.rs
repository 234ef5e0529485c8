//! Configuration file parsing for .testimpact.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for .testimpact.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactConfig {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Recognized file kinds and test-call names.
///
/// These sets drive the walkers; adding a framework means adding entries
/// here, not touching the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Filename suffixes that mark a file as a test file
    #[serde(default = "default_test_suffixes")]
    pub test_suffixes: Vec<String>,

    /// Extension of source files considered for helper impact
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Callee names recognized as test-defining calls
    #[serde(default = "default_test_callees")]
    pub test_callees: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Paths skipped during repository scans
    #[serde(default = "default_ignore_paths")]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable color output
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default functions
fn default_test_suffixes() -> Vec<String> {
    vec![".spec.ts".to_string(), ".test.ts".to_string()]
}

fn default_source_extension() -> String {
    ".ts".to_string()
}

fn default_test_callees() -> Vec<String> {
    vec![
        "test".to_string(),
        "test.skip".to_string(),
        "test.only".to_string(),
        "test.fixme".to_string(),
        "test.describe".to_string(),
    ]
}

fn default_ignore_paths() -> Vec<String> {
    vec![
        "node_modules/".to_string(),
        "dist/".to_string(),
        "build/".to_string(),
        ".git/".to_string(),
        "coverage/".to_string(),
        "test-results/".to_string(),
        "playwright-report/".to_string(),
    ]
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ImpactConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty TOML should parse to defaults")
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            test_suffixes: default_test_suffixes(),
            source_extension: default_source_extension(),
            test_callees: default_test_callees(),
        }
    }
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            paths: default_ignore_paths(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
        }
    }
}

impl ImpactConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ImpactConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find and load .testimpact.toml from the given directory or ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(".testimpact.toml");
            if config_path.exists() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Whether a repo-relative path names a test file
    pub fn is_test_file(&self, path: &str) -> bool {
        self.files.test_suffixes.iter().any(|s| path.ends_with(s))
    }

    /// Whether a repo-relative path names a recognized source file
    pub fn is_source_file(&self, path: &str) -> bool {
        path.ends_with(&self.files.source_extension)
    }
}
