use std::path::Path;
use tracing::info;

use super::differ::{ApiDiffer, Direction, StructuralDiff};
use super::snapshot::{Snapshot, SnapshotBuilder};
use crate::config::CrawlerConfig;
use crate::error::Result;
use crate::formatters::ReportFormatter;

/// Both directions of a comparison, structural and rendered.
#[derive(Debug, Clone)]
pub struct ApiReport {
    pub removed_diff: StructuralDiff,
    pub added_diff: StructuralDiff,
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl ApiReport {
    /// DELETED lines followed by ADDED lines
    pub fn lines(&self) -> Vec<String> {
        self.removed.iter().chain(&self.added).cloned().collect()
    }

    pub fn has_removals(&self) -> bool {
        !self.removed.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

pub struct ApiCrawler {
    snapshot_builder: SnapshotBuilder,
    differ: ApiDiffer,
    report_formatter: ReportFormatter,
}

impl ApiCrawler {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            snapshot_builder: SnapshotBuilder::new(config)?,
            differ: ApiDiffer::new(),
            report_formatter: ReportFormatter::new(),
        })
    }

    pub fn snapshot(&mut self, root_path: &Path) -> Result<Snapshot> {
        self.snapshot_builder.build(root_path)
    }

    pub fn diff(&self, former: &Snapshot, latter: &Snapshot, direction: Direction) -> StructuralDiff {
        self.differ.diff(former, latter, direction)
    }

    pub fn compare(&self, former: &Snapshot, latter: &Snapshot) -> ApiReport {
        let removed_diff = self.diff(former, latter, Direction::Removed);
        let added_diff = self.diff(former, latter, Direction::Added);
        let removed = self.report_formatter.render(&removed_diff);
        let added = self.report_formatter.render(&added_diff);

        info!(
            "Compared {} former and {} latter modules: {} removals, {} additions",
            former.len(),
            latter.len(),
            removed.len(),
            added.len()
        );

        ApiReport {
            removed_diff,
            added_diff,
            removed,
            added,
        }
    }

    pub fn compare_trees(&mut self, former_root: &Path, latter_root: &Path) -> Result<ApiReport> {
        let former = self.snapshot(former_root)?;
        let latter = self.snapshot(latter_root)?;
        Ok(self.compare(&former, &latter))
    }
}
