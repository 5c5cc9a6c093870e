//! Aggregation: keep the largest file per group, classify, and summarize.
//!
//! The result does not depend on discovery order. Ties in line count keep
//! the lexicographically smaller path, and the report is sorted explicitly.

use crate::config::Effective;
use crate::error::ConfigError;
use crate::models::{FileRecord, GroupEntry, Report, Severity, SkippedFile, Summary, Thresholds};
use crate::scan::{run_scan, ScanOptions, ScanOutput};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

/// Collapse records to one per group key, retaining the maximum.
pub fn dedupe(records: impl IntoIterator<Item = FileRecord>) -> BTreeMap<String, FileRecord> {
    let mut groups: BTreeMap<String, FileRecord> = BTreeMap::new();
    for rec in records {
        match groups.entry(rec.group_key.clone()) {
            Entry::Vacant(v) => {
                v.insert(rec);
            }
            Entry::Occupied(mut o) => {
                let cur = o.get();
                let wins = rec.line_count > cur.line_count
                    || (rec.line_count == cur.line_count && rec.path < cur.path);
                if wins {
                    log::debug!(
                        "group {}: {} ({} lines) replaces {} ({} lines)",
                        rec.group_key,
                        rec.path.display(),
                        rec.line_count,
                        cur.path.display(),
                        cur.line_count
                    );
                    o.insert(rec);
                }
            }
        }
    }
    groups
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Turn deduplicated records into classified entries sorted for display.
pub fn classify(
    root: &Path,
    groups: BTreeMap<String, FileRecord>,
    thresholds: &Thresholds,
) -> Vec<GroupEntry> {
    let mut entries: Vec<GroupEntry> = groups
        .into_values()
        .map(|rec| GroupEntry {
            severity: thresholds.classify(rec.line_count),
            path: display_path(root, &rec.path),
            group_key: rec.group_key,
            line_count: rec.line_count,
            file_name: rec.file_name,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.line_count
            .cmp(&a.line_count)
            .then_with(|| a.group_key.cmp(&b.group_key))
    });
    entries
}

fn summarize(entries: &[GroupEntry], files: usize, skipped: usize) -> Summary {
    let mut s = Summary {
        groups: entries.len(),
        files,
        skipped,
        ..Summary::default()
    };
    for e in entries {
        match e.severity {
            Severity::Critical => s.critical += 1,
            Severity::High => s.high += 1,
            Severity::Medium => s.medium += 1,
            Severity::Ok => s.ok += 1,
        }
    }
    s.requires_action = entries
        .iter()
        .filter(|e| e.severity.requires_action())
        .count();
    s
}

/// Build the full report from one scan.
pub fn build_report(root: &Path, scan: ScanOutput, thresholds: Thresholds) -> Report {
    let files = scan.records.len();
    let mut skipped: Vec<SkippedFile> = scan
        .errors
        .iter()
        .map(|e| SkippedFile {
            path: display_path(root, e.path()),
            error: e.to_string(),
        })
        .collect();
    skipped.sort_by(|a, b| a.path.cmp(&b.path));

    let groups = classify(root, dedupe(scan.records), &thresholds);
    let summary = summarize(&groups, files, skipped.len());
    Report {
        root: root.to_string_lossy().to_string(),
        thresholds,
        summary,
        groups,
        skipped,
    }
}

/// Scan the configured root and aggregate the result.
pub fn run_report(eff: &Effective) -> Result<Report, ConfigError> {
    let opts = ScanOptions {
        root: eff.root.clone(),
        suffix: eff.suffix.clone(),
        depth: eff.depth,
        exclude: eff.exclude.clone(),
    };
    let scan = run_scan(&opts)?;
    Ok(build_report(&eff.root, scan, eff.thresholds))
}
