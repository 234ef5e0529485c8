//! Tests for test-block and import extraction from TypeScript sources

use testimpact_core::{TestBlockParser, TypeScriptTestParser};

fn default_parser() -> TypeScriptTestParser {
    TypeScriptTestParser::new(vec![
        "test".to_string(),
        "test.skip".to_string(),
        "test.only".to_string(),
        "test.fixme".to_string(),
        "test.describe".to_string(),
    ])
}

#[test]
fn test_extract_basic_blocks() {
    let source = r#"import { test, expect } from '@playwright/test';

test('logs in with valid credentials', async ({ page }) => {
  await page.goto('/login');
  await expect(page).toHaveURL('/dashboard');
});

test('rejects bad password', async ({ page }) => {
  await page.goto('/login');
});
"#;

    let blocks = default_parser().extract_blocks(source);
    assert_eq!(blocks.len(), 2);

    assert_eq!(blocks[0].name, "logs in with valid credentials");
    assert_eq!(blocks[0].start_line, 3);
    assert_eq!(blocks[0].end_line, 6);

    assert_eq!(blocks[1].name, "rejects bad password");
    assert_eq!(blocks[1].start_line, 8);
    assert_eq!(blocks[1].end_line, 10);
}

#[test]
fn test_recognizes_qualified_forms() {
    let source = r#"
test.skip('flaky upload', async () => {});
test.only('focus here', async () => {});
test.fixme('broken thing', async () => {});
test.describe('checkout suite', () => {
  test('pays with card', async () => {});
});
"#;

    let blocks = default_parser().extract_blocks(source);
    let names: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();

    // The describe block and its inner test are both recorded
    assert!(names.contains(&"flaky upload"));
    assert!(names.contains(&"focus here"));
    assert!(names.contains(&"broken thing"));
    assert!(names.contains(&"checkout suite"));
    assert!(names.contains(&"pays with card"));
    assert_eq!(blocks.len(), 5);
}

#[test]
fn test_describe_span_covers_callback_body() {
    let source = r#"test.describe('suite', () => {
  test('inner', async () => {
    doThing();
  });
});
"#;

    let blocks = default_parser().extract_blocks(source);
    let suite = blocks.iter().find(|b| b.name == "suite").unwrap();
    assert_eq!(suite.start_line, 1);
    assert_eq!(suite.end_line, 5);

    let inner = blocks.iter().find(|b| b.name == "inner").unwrap();
    assert_eq!(inner.start_line, 2);
    assert_eq!(inner.end_line, 4);
}

#[test]
fn test_ignores_unrecognized_callees() {
    let source = r#"
it('mocha style', () => {});
myTest('custom', () => {});
test.step('not in the set', () => {});
console.log('hello', 'world');
"#;

    let blocks = default_parser().extract_blocks(source);
    assert!(blocks.is_empty());
}

#[test]
fn test_ignores_calls_with_fewer_than_two_arguments() {
    let source = r#"
test('only a name');
test.describe('empty');
test('real one', async () => {});
"#;

    let blocks = default_parser().extract_blocks(source);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].name, "real one");
}

#[test]
fn test_template_literal_name() {
    let source = "test(`template named`, async () => {});\n";

    let blocks = default_parser().extract_blocks(source);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].name, "template named");
}

#[test]
fn test_name_with_embedded_quotes() {
    let source = r#"test('clicks the "save" button', async () => {});"#;

    let blocks = default_parser().extract_blocks(source);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].name, r#"clicks the "save" button"#);
}

#[test]
fn test_resilient_to_isolated_syntax_errors() {
    let source = r#"
test('good before', async () => {});

function broken( {{{

test('good after', async () => {});
"#;

    let blocks = default_parser().extract_blocks(source);
    let names: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
    assert!(names.contains(&"good before"));
}

#[test]
fn test_custom_callee_set() {
    let parser = TypeScriptTestParser::new(vec!["it".to_string(), "describe".to_string()]);
    let source = r#"
it('mocha style', () => {});
test('playwright style', () => {});
"#;

    let blocks = parser.extract_blocks(source);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].name, "mocha style");
}

#[test]
fn test_extract_imports_as_written() {
    let source = r#"
import { test } from '@playwright/test';
import { login } from './helpers/login';
import utils from "../utils";
import './side-effect';
"#;

    let imports = default_parser().extract_imports(source);
    assert_eq!(
        imports,
        vec![
            "@playwright/test",
            "./helpers/login",
            "../utils",
            "./side-effect",
        ]
    );
}

#[test]
fn test_empty_source() {
    assert!(default_parser().extract_blocks("").is_empty());
    assert!(default_parser().extract_imports("").is_empty());
}
