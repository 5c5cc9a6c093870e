//! Shared data models for the scan, aggregation, and report printers.

pub mod severity;

pub use severity::{Severity, Thresholds};

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One measured file. Lives only between measurement and deduplication.
pub struct FileRecord {
    pub group_key: String,
    pub file_name: String,
    pub path: PathBuf,
    pub line_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// The representative (largest) file retained for a group key.
pub struct GroupEntry {
    pub group_key: String,
    pub line_count: usize,
    pub file_name: String,
    pub path: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A file that was discovered but could not be measured.
pub struct SkippedFile {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Bucket membership counts used by printers.
pub struct Summary {
    pub groups: usize,
    pub files: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub ok: usize,
    pub requires_action: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Read-only view of one run. `groups` is sorted by line count descending.
pub struct Report {
    pub root: String,
    pub thresholds: Thresholds,
    pub summary: Summary,
    pub groups: Vec<GroupEntry>,
    pub skipped: Vec<SkippedFile>,
}

impl Report {
    /// Members of one bucket, in report order.
    pub fn bucket(&self, sev: Severity) -> impl Iterator<Item = &GroupEntry> {
        self.groups.iter().filter(move |g| g.severity == sev)
    }
}
