//! Tests for import resolution and reverse-import lookup

use std::fs;
use std::path::Path;
use testimpact_core::{ImpactConfig, ImportResolver};

fn resolver_for(root: &Path) -> ImportResolver {
    ImportResolver::new(root.to_path_buf(), &ImpactConfig::default())
}

#[test]
fn test_resolve_appends_source_extension() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("login.ts"), "export const login = () => {};").unwrap();
    fs::write(root.join("a.spec.ts"), "").unwrap();

    let resolver = resolver_for(root);
    let resolved = resolver.resolve(&root.join("a.spec.ts"), "./login").unwrap();
    assert_eq!(resolved, root.join("login.ts"));
}

#[test]
fn test_resolve_literal_path() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("login.ts"), "").unwrap();
    fs::write(root.join("a.spec.ts"), "").unwrap();

    let resolver = resolver_for(root);
    let resolved = resolver
        .resolve(&root.join("a.spec.ts"), "./login.ts")
        .unwrap();
    assert_eq!(resolved, root.join("login.ts"));
}

#[test]
fn test_resolve_directory_index() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("utils")).unwrap();
    fs::write(root.join("utils/index.ts"), "").unwrap();
    fs::write(root.join("a.spec.ts"), "").unwrap();

    let resolver = resolver_for(root);
    let resolved = resolver.resolve(&root.join("a.spec.ts"), "./utils").unwrap();
    assert_eq!(resolved, root.join("utils/index.ts"));
}

#[test]
fn test_resolve_parent_relative() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("e2e")).unwrap();
    fs::create_dir_all(root.join("helpers")).unwrap();
    fs::write(root.join("helpers/login.ts"), "").unwrap();
    fs::write(root.join("e2e/a.spec.ts"), "").unwrap();

    let resolver = resolver_for(root);
    let resolved = resolver
        .resolve(&root.join("e2e/a.spec.ts"), "../helpers/login")
        .unwrap();
    assert!(resolved.ends_with("helpers/login.ts"));
}

#[test]
fn test_bare_specifiers_stay_unresolved() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.spec.ts"), "").unwrap();

    let resolver = resolver_for(root);
    assert!(resolver
        .resolve(&root.join("a.spec.ts"), "@playwright/test")
        .is_none());
    assert!(resolver.resolve(&root.join("a.spec.ts"), "lodash").is_none());
}

#[test]
fn test_resolve_missing_target() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.spec.ts"), "").unwrap();

    let resolver = resolver_for(root);
    assert!(resolver
        .resolve(&root.join("a.spec.ts"), "./does-not-exist")
        .is_none());
}

#[test]
fn test_imports_of_returns_specifiers_as_written() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(
        root.join("a.spec.ts"),
        "import { test } from '@playwright/test';\nimport { login } from './login';\n",
    )
    .unwrap();

    let resolver = resolver_for(root);
    let imports = resolver.imports_of(&root.join("a.spec.ts")).unwrap();
    assert_eq!(imports, vec!["@playwright/test", "./login"]);

    // Second lookup hits the cache and agrees
    let again = resolver.imports_of(&root.join("a.spec.ts")).unwrap();
    assert_eq!(again, imports);
}

#[test]
fn test_test_files_importing_helper() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("helpers")).unwrap();
    fs::write(root.join("helpers/login.ts"), "export const login = 1;").unwrap();
    fs::write(root.join("helpers/other.ts"), "export const other = 1;").unwrap();

    fs::write(
        root.join("a.spec.ts"),
        "import { login } from './helpers/login';\ntest('a', async () => {});\n",
    )
    .unwrap();
    fs::write(
        root.join("b.spec.ts"),
        "import { login } from './helpers/login';\ntest('b', async () => {});\n",
    )
    .unwrap();
    fs::write(
        root.join("c.spec.ts"),
        "import { other } from './helpers/other';\ntest('c', async () => {});\n",
    )
    .unwrap();

    let resolver = resolver_for(root);
    let importing = resolver
        .test_files_importing(&root.join("helpers/login.ts"))
        .unwrap();

    let names: Vec<String> = importing
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(importing.len(), 2);
    assert!(names.contains(&"a.spec.ts".to_string()));
    assert!(names.contains(&"b.spec.ts".to_string()));
}

#[test]
fn test_test_files_importing_ignores_helpers_themselves() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("base.ts"), "export const base = 1;").unwrap();
    // A helper importing another helper is not a test file
    fs::write(root.join("derived.ts"), "import { base } from './base';").unwrap();

    let resolver = resolver_for(root);
    let importing = resolver.test_files_importing(&root.join("base.ts")).unwrap();
    assert!(importing.is_empty());
}
