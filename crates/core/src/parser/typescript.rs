//! TypeScript test-block and import extraction using Tree-sitter

use super::{TestBlock, TestBlockParser};
use tree_sitter::{Node, Parser, Tree};

/// Extracts test blocks from TypeScript sources.
///
/// A call counts as test-defining when its printed callee text exactly
/// matches one of the configured callee names (e.g. `test`,
/// `test.describe`). The recognized set is data supplied at construction,
/// so frameworks beyond the default one are added via configuration.
pub struct TypeScriptTestParser {
    language: tree_sitter::Language,
    callees: Vec<String>,
}

impl TypeScriptTestParser {
    pub fn new(callees: Vec<String>) -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            callees,
        }
    }

    fn parse_tree(&self, source: &str) -> Option<Tree> {
        let mut parser = Parser::new();
        parser.set_language(&self.language).ok()?;
        parser.parse(source, None)
    }

    /// Recursively walk the AST collecting recognized test calls
    fn collect_blocks(&self, node: &Node, source: &str, blocks: &mut Vec<TestBlock>) {
        if node.kind() == "call_expression" {
            if let Some(block) = self.block_from_call(node, source) {
                blocks.push(block);
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_blocks(&child, source, blocks);
        }
    }

    /// Turn one call_expression into a [`TestBlock`] if it qualifies.
    ///
    /// Requires a recognized callee and at least two arguments; the first
    /// argument supplies the display name, the second is the test body and
    /// is not inspected. Calls with fewer arguments are ignored.
    fn block_from_call(&self, node: &Node, source: &str) -> Option<TestBlock> {
        let callee = node.child_by_field_name("function")?;
        let callee_text = callee.utf8_text(source.as_bytes()).ok()?;

        if !self.callees.iter().any(|c| c == callee_text) {
            return None;
        }

        let args = node.child_by_field_name("arguments")?;
        if args.named_child_count() < 2 {
            return None;
        }

        let name_node = args.named_child(0)?;
        let name = literal_text(&name_node, source)?;

        Some(TestBlock {
            name,
            start_line: node.start_position().row + 1,
            end_line: node.end_position().row + 1,
        })
    }
}

/// Extract the text value of a literal or literal-like expression.
///
/// String and template literals yield their inner value; anything else
/// yields its raw text with only quote delimiters stripped.
fn literal_text(node: &Node, source: &str) -> Option<String> {
    let raw = node.utf8_text(source.as_bytes()).ok()?;

    if matches!(node.kind(), "string" | "template_string") {
        let bytes = raw.as_bytes();
        if bytes.len() >= 2 && matches!(bytes[0], b'"' | b'\'' | b'`') {
            return Some(raw[1..raw.len() - 1].to_string());
        }
    }

    Some(
        raw.trim_matches(|c| c == '"' || c == '\'' || c == '`')
            .to_string(),
    )
}

impl TestBlockParser for TypeScriptTestParser {
    fn language_name(&self) -> &str {
        "typescript"
    }

    fn extract_blocks(&self, source: &str) -> Vec<TestBlock> {
        let Some(tree) = self.parse_tree(source) else {
            return Vec::new();
        };

        let mut blocks = Vec::new();
        self.collect_blocks(&tree.root_node(), source, &mut blocks);
        blocks
    }

    fn extract_imports(&self, source: &str) -> Vec<String> {
        let Some(tree) = self.parse_tree(source) else {
            return Vec::new();
        };

        let root = tree.root_node();
        let mut specifiers = Vec::new();
        let mut cursor = root.walk();

        for child in root.children(&mut cursor) {
            if child.kind() != "import_statement" {
                continue;
            }

            let module = child
                .child_by_field_name("source")
                .and_then(|s| s.utf8_text(source.as_bytes()).ok())
                .map(|s| s.trim_matches(|c| c == '\'' || c == '"').to_string());

            if let Some(module) = module {
                specifiers.push(module);
            }
        }

        specifiers
    }
}
