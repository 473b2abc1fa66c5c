use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tree_sitter::Node as TSNode;

use super::common::{extract_text, TreeSitterParser};
use super::LanguageParser;
use crate::core::{ClassSymbols, SymbolTable};
use crate::error::{ParseError, Result};

/// Public-name predicate: no leading underscore, except constructors.
pub fn is_public(name: &str) -> bool {
    !name.starts_with('_') || name == "__init__"
}

pub struct PythonParser {
    parser: TreeSitterParser,
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        let parser = TreeSitterParser::new(tree_sitter_python::language())?;
        Ok(Self { parser })
    }

    /// Public functions declared directly at module scope
    fn extract_functions(&self, root: &TSNode, source: &[u8]) -> BTreeSet<String> {
        let mut cursor = root.walk();
        let functions = root
            .children(&mut cursor)
            .map(unwrap_decorated)
            .filter(is_plain_function)
            .filter_map(|node| public_name(&node, source))
            .collect();
        functions
    }

    /// Public classes anywhere in the tree, visited breadth-first
    fn extract_classes(&self, root: &TSNode, source: &[u8]) -> BTreeMap<String, ClassSymbols> {
        let mut classes = BTreeMap::new();
        let mut queue = VecDeque::from([*root]);

        while let Some(node) = queue.pop_front() {
            if node.kind() == "class_definition" {
                if let Some(class_name) = public_name(&node, source) {
                    let methods = self.extract_class_methods(&node, source);
                    classes.insert(class_name, ClassSymbols { methods });
                }
            }

            let mut cursor = node.walk();
            queue.extend(node.children(&mut cursor));
        }

        classes
    }

    /// Public methods in the immediate class body; nested scopes are not searched
    fn extract_class_methods(&self, class_node: &TSNode, source: &[u8]) -> BTreeSet<String> {
        let Some(body) = class_node.child_by_field_name("body") else {
            return BTreeSet::new();
        };
        let mut cursor = body.walk();
        let methods = body
            .children(&mut cursor)
            .map(unwrap_decorated)
            .filter(is_plain_function)
            .filter_map(|node| public_name(&node, source))
            .collect();
        methods
    }
}

fn unwrap_decorated(node: TSNode) -> TSNode {
    if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition").unwrap_or(node)
    } else {
        node
    }
}

// `async def` is a separate definition kind and is not tracked
fn is_plain_function(node: &TSNode) -> bool {
    node.kind() == "function_definition"
        && node.child(0).map_or(true, |first| first.kind() != "async")
}

fn public_name(node: &TSNode, source: &[u8]) -> Option<String> {
    let name_node = node.child_by_field_name("name")?;
    let name = extract_text(&name_node, source);
    (!name.is_empty() && is_public(name)).then(|| name.to_string())
}

impl LanguageParser for PythonParser {
    fn extract(&mut self, source: &str) -> std::result::Result<SymbolTable, ParseError> {
        let tree = self.parser.parse_strict(source)?;
        let root_node = tree.root_node();
        let source_bytes = source.as_bytes();

        Ok(SymbolTable {
            classes: self.extract_classes(&root_node, source_bytes),
            functions: self.extract_functions(&root_node, source_bytes),
        })
    }

    fn language_name(&self) -> &str {
        "python"
    }
}
