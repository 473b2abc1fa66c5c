pub mod common;
pub mod python;

use crate::core::SymbolTable;
use crate::error::{CrawlError, ParseError, Result};

/// Extracts the public symbol table of one module from its source text.
pub trait LanguageParser {
    fn extract(&mut self, source: &str) -> std::result::Result<SymbolTable, ParseError>;
    fn language_name(&self) -> &str;
}

pub struct ParserFactory;

impl ParserFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_parser(&self, extension: &str) -> Result<Box<dyn LanguageParser>> {
        match extension {
            "py" | "pyi" | "pyw" => Ok(Box::new(python::PythonParser::new()?)),
            _ => Err(CrawlError::ParserInit(format!(
                "no parser for .{} files",
                extension
            ))),
        }
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}
