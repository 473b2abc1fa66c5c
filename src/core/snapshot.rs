use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

use super::scanner::FileScanner;
use crate::config::CrawlerConfig;
use crate::error::{CrawlError, Result};
use crate::parsers::{common::read_source, LanguageParser, ParserFactory};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSymbols {
    #[serde(default)]
    pub methods: BTreeSet<String>,
}

/// Public surface of a single module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(default)]
    pub classes: BTreeMap<String, ClassSymbols>,
    #[serde(default)]
    pub functions: BTreeSet<String>,
}

/// Public API surface of a whole tree, keyed by module path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    modules: BTreeMap<String, SymbolTable>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module_path: impl Into<String>, symbols: SymbolTable) {
        self.modules.insert(module_path.into(), symbols);
    }

    pub fn get(&self, module_path: &str) -> Option<&SymbolTable> {
        self.modules.get(module_path)
    }

    pub fn contains(&self, module_path: &str) -> bool {
        self.modules.contains_key(module_path)
    }

    pub fn module_paths(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn modules(&self) -> impl Iterator<Item = (&str, &SymbolTable)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| CrawlError::io(path, e))?;
        Self::from_json(&data).map_err(|source| CrawlError::Snapshot {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?).map_err(|e| CrawlError::io(path, e))
    }
}

impl FromIterator<(String, SymbolTable)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, SymbolTable)>>(iter: I) -> Self {
        Self {
            modules: iter.into_iter().collect(),
        }
    }
}

/// Walks a tree and extracts every candidate module; fails on the first bad file.
pub struct SnapshotBuilder {
    file_scanner: FileScanner,
    parser: Box<dyn LanguageParser>,
}

impl SnapshotBuilder {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            file_scanner: FileScanner::from_config(config),
            parser: ParserFactory::new().get_parser(&config.extension)?,
        })
    }

    pub fn build(&mut self, root_path: &Path) -> Result<Snapshot> {
        if !root_path.is_dir() {
            return Err(CrawlError::io(
                root_path,
                io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let files = self.file_scanner.scan_directory(root_path);
        let mut snapshot = Snapshot::new();

        for file_info in &files {
            let source =
                read_source(&file_info.path).map_err(|e| CrawlError::io(&file_info.path, e))?;
            let symbols = self
                .parser
                .extract(&source)
                .map_err(|source| CrawlError::Parse {
                    path: file_info.path.clone(),
                    source,
                })?;
            debug!(
                "{}: {} functions, {} classes",
                file_info.module_path,
                symbols.functions.len(),
                symbols.classes.len()
            );
            snapshot.insert(file_info.module_path.clone(), symbols);
        }

        info!(
            "Built {} snapshot of {} modules from {}",
            self.parser.language_name(),
            snapshot.len(),
            root_path.display()
        );
        Ok(snapshot)
    }
}
