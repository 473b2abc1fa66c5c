use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CrawlError, Result};

/// Directory fragments skipped by default: test suites, static assets,
/// sample data and vendored plugins.
pub const DEFAULT_EXCLUDES: &[&str] = &["tests", "static", "sampledata", "mplexplorer"];

pub const DEFAULT_EXTENSION: &str = "py";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Substrings of directory paths (relative to the crawl root) to prune
    pub exclude: Vec<String>,

    /// Source file extension, without the leading dot
    pub extension: String,

    /// Key modules relative to the root's parent, so `bokeh/` yields `bokeh.util...`
    pub keep_root_name: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            keep_root_name: false,
        }
    }
}

impl CrawlerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CrawlError::io(path, e))?;
        Self::from_toml(&content)
            .map_err(|e| CrawlError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn with_root_name(mut self, keep_root_name: bool) -> Self {
        self.keep_root_name = keep_root_name;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = CrawlerConfig::from_toml("exclude = [\"vendor\"]\n").unwrap();
        assert_eq!(config.exclude, vec!["vendor".to_string()]);
        assert_eq!(config.extension, "py");
        assert!(!config.keep_root_name);

        let empty = CrawlerConfig::from_toml("").unwrap();
        assert_eq!(empty, CrawlerConfig::default());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(CrawlerConfig::from_toml("exclude = 3").is_err());
    }
}
