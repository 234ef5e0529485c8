//! Relative import resolution and reverse-import lookup
//!
//! Resolution only follows relative specifiers (`./`, `../`); bare module
//! names are external packages and never match repository files. The
//! reverse lookup is a brute-force scan over every discovered test file;
//! at the expected repository sizes (hundreds of files) this beats
//! maintaining a persistent reverse-import index.

use anyhow::Result;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::ImpactConfig;
use crate::discovery::discover_test_files;
use crate::parser::{TestBlockParser, TypeScriptTestParser};

/// Resolves import specifiers to repository files and finds the test
/// files that import a given target.
pub struct ImportResolver {
    root: PathBuf,
    source_extension: String,
    test_suffixes: Vec<String>,
    ignore_patterns: Vec<String>,
    parser: TypeScriptTestParser,
    // Memoized per-file import lists; keyed by absolute path
    import_cache: Mutex<HashMap<PathBuf, Vec<String>>>,
}

impl ImportResolver {
    pub fn new(root: PathBuf, config: &ImpactConfig) -> Self {
        Self {
            root,
            source_extension: config.files.source_extension.clone(),
            test_suffixes: config.files.test_suffixes.clone(),
            ignore_patterns: config.ignore.paths.clone(),
            parser: TypeScriptTestParser::new(config.files.test_callees.clone()),
            import_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Literal import targets of a file, as written in its source
    pub fn imports_of(&self, file: &Path) -> Result<Vec<String>> {
        if let Some(cached) = self
            .import_cache
            .lock()
            .expect("import cache poisoned")
            .get(file)
        {
            return Ok(cached.clone());
        }

        let imports = self.parser.imports_from_file(file)?;
        self.import_cache
            .lock()
            .expect("import cache poisoned")
            .insert(file.to_path_buf(), imports.clone());

        Ok(imports)
    }

    /// Resolve a module specifier against the importing file's directory.
    ///
    /// Tries the literal path, then the path with the source extension
    /// appended, then a directory index file. Non-relative specifiers
    /// (bare package names) return `None`.
    pub fn resolve(&self, from_file: &Path, specifier: &str) -> Option<PathBuf> {
        if !specifier.starts_with("./") && !specifier.starts_with("../") {
            return None;
        }

        let base = from_file.parent()?;
        let raw = base.join(specifier);

        if raw.is_file() {
            return Some(raw);
        }

        let with_ext = PathBuf::from(format!("{}{}", raw.display(), self.source_extension));
        if with_ext.is_file() {
            return Some(with_ext);
        }

        let index = raw.join(format!("index{}", self.source_extension));
        if index.is_file() {
            return Some(index);
        }

        None
    }

    /// Every test file in the repository whose resolved imports include
    /// `target`, compared by canonical absolute path.
    pub fn test_files_importing(&self, target: &Path) -> Result<Vec<PathBuf>> {
        let target = target
            .canonicalize()
            .unwrap_or_else(|_| target.to_path_buf());

        let test_files =
            discover_test_files(&self.root, &self.test_suffixes, &self.ignore_patterns)?;

        // Independent per-file scans; the cache behind a mutex is the only
        // shared state.
        let importing: Vec<PathBuf> = test_files
            .par_iter()
            .filter_map(|test_file| {
                let imports = self.imports_of(test_file).ok()?;

                let hits = imports.iter().any(|specifier| {
                    self.resolve(test_file, specifier)
                        .map(|resolved| resolved.canonicalize().unwrap_or(resolved) == target)
                        .unwrap_or(false)
                });

                hits.then(|| test_file.clone())
            })
            .collect();

        Ok(importing)
    }
}
