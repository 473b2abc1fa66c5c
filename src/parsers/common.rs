use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Point, Tree};

use crate::error::{CrawlError, ParseError, Result};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(language)
            .map_err(|e| CrawlError::ParserInit(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse `source`, rejecting any tree that needed error recovery
    pub fn parse_strict(&mut self, source: &str) -> std::result::Result<Tree, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        if let Some(point) = first_error_position(&tree.root_node()) {
            return Err(ParseError::Syntax {
                line: point.row + 1,
                column: point.column + 1,
            });
        }
        Ok(tree)
    }
}

/// Buffered whole-file read
pub fn read_source(file_path: &Path) -> io::Result<String> {
    let file = File::open(file_path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut reader =
        BufReader::with_capacity(if file_size < 8192 { file_size.max(1) } else { 8192 }, file);

    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;
    Ok(content)
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

/// Start of the first ERROR or MISSING node in document order
pub fn first_error_position(node: &TSNode) -> Option<Point> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position());
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<TSNode> = node.children(&mut cursor).collect();
    children.iter().find_map(first_error_position)
}
