use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::CrawlerConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    /// Path relative to the crawl root (or its parent with `keep_root_name`)
    /// with `/` separators; the snapshot key
    pub module_path: String,
}

/// Top-down directory walk yielding candidate source modules in a stable order.
pub struct FileScanner {
    exclude: Vec<String>,
    suffix: String,
    keep_root_name: bool,
}

impl FileScanner {
    pub fn new(exclude: Vec<String>, extension: &str) -> Self {
        Self {
            exclude,
            suffix: format!(".{}", extension),
            keep_root_name: false,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.exclude.clone(), &config.extension)
            .with_root_name(config.keep_root_name)
    }

    /// Prefix module keys with the crawl root's own directory name
    pub fn with_root_name(mut self, keep_root_name: bool) -> Self {
        self.keep_root_name = keep_root_name;
        self
    }

    pub fn scan_directory(&self, root_path: &Path) -> Vec<FileInfo> {
        let key_base = self.key_base(root_path);
        let files: Vec<FileInfo> = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(root_path, entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|entry| !entry.file_type().is_dir() && self.is_candidate(entry))
            .map(|entry| FileInfo {
                module_path: relative_key(key_base, entry.path()),
                path: entry.into_path(),
            })
            .collect();

        info!(
            "Found {} candidate modules under {}",
            files.len(),
            root_path.display()
        );
        files
    }

    fn key_base<'a>(&self, root_path: &'a Path) -> &'a Path {
        match (self.keep_root_name, root_path.file_name()) {
            (true, Some(_)) => root_path.parent().unwrap_or(root_path),
            _ => root_path,
        }
    }

    fn is_excluded_dir(&self, root_path: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let relative = relative_key(root_path, entry.path());
        self.exclude
            .iter()
            .any(|fragment| relative.contains(fragment.as_str()))
    }

    fn is_candidate(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        name.ends_with(&self.suffix) && !name.starts_with('_')
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}

fn relative_key(root_path: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root_path).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
