//! # API-CRAWLER
//!
//! Static extraction of a Python tree's public API surface, and a structural
//! diff of that surface between two snapshots (for example two releases).
//!
//! ## Pipeline
//!
//! - **FileScanner**: top-down walk with exclusion fragments and a file-name filter
//! - **PythonParser**: tree-sitter front end producing a module's `SymbolTable`
//! - **SnapshotBuilder**: module path -> `SymbolTable` for a whole tree
//! - **ApiDiffer**: three-tier set diff (modules, classes/functions, methods)
//! - **ReportFormatter**: `ADDED pkg.module.Class.method` style change lines

pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use crate::config::CrawlerConfig;
pub use crate::core::{ApiCrawler, ApiDiffer, ApiReport, Direction, Snapshot, StructuralDiff};
pub use crate::error::{CrawlError, ParseError, Result};
