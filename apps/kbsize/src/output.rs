//! Output rendering for the size report.
//!
//! Supports `human` (default) and `json` outputs. Both are composed as
//! pure values first and printed to stdout afterwards.

use crate::config::OutputMode;
use crate::models::{Report, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::fmt::Write as _;

fn paint(sev: Severity, text: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match sev {
        Severity::Critical => text.red().bold().to_string(),
        Severity::High => text.yellow().bold().to_string(),
        Severity::Medium => text.cyan().to_string(),
        Severity::Ok => text.green().to_string(),
    }
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Render the human report (pure) so it can be compared across runs.
pub fn render_human(report: &Report, color: bool) -> String {
    let mut out = String::new();
    let s = &report.summary;
    let _ = writeln!(
        out,
        "{}",
        heading(&format!("Knowledge base size report: {}", report.root), color)
    );
    let _ = writeln!(out, "Groups: {} (files measured: {})", s.groups, s.files);

    if !report.groups.is_empty() {
        out.push('\n');
        let key_width = report
            .groups
            .iter()
            .map(|g| g.group_key.chars().count())
            .max()
            .unwrap_or(0);
        for g in &report.groups {
            let label = format!("{:<8}", g.severity.label());
            let _ = writeln!(
                out,
                "  {:>6}  {}  {:<kw$}  {}",
                g.line_count,
                paint(g.severity, &label, color),
                g.group_key,
                g.path,
                kw = key_width
            );
        }
    }

    out.push('\n');
    for sev in Severity::ACTIONABLE {
        let title = format!("{} ({})", sev.label(), report.thresholds.describe(sev));
        let members: Vec<_> = report.bucket(sev).collect();
        if members.is_empty() {
            let _ = writeln!(out, "{}: none", paint(sev, &title, color));
            continue;
        }
        let _ = writeln!(out, "{}: {}", paint(sev, &title, color), members.len());
        for g in members {
            let _ = writeln!(
                out,
                "  - {}: {} lines ({})",
                g.group_key, g.line_count, g.file_name
            );
        }
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "{}",
        heading(&format!("Requires action: {}", s.requires_action), color)
    );
    let _ = writeln!(out, "OK: {}", s.ok);

    if !report.skipped.is_empty() {
        out.push('\n');
        let title = format!("Skipped files: {}", s.skipped);
        if color {
            let _ = writeln!(out, "{}", title.red().bold());
        } else {
            let _ = writeln!(out, "{}", title);
        }
        for sk in &report.skipped {
            let _ = writeln!(out, "  - {}: {}", sk.path, sk.error);
        }
    }
    out
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &Report) -> JsonVal {
    let keys = |sev: Severity| {
        report
            .bucket(sev)
            .map(|g| g.group_key.as_str())
            .collect::<Vec<_>>()
    };
    json!({
        "root": report.root,
        "thresholds": report.thresholds,
        "summary": report.summary,
        "groups": report.groups,
        "buckets": {
            "critical": keys(Severity::Critical),
            "high": keys(Severity::High),
            "medium": keys(Severity::Medium),
        },
        "skipped": report.skipped,
    })
}

/// Print the report in the requested format.
pub fn print_report(report: &Report, mode: OutputMode, color: bool) -> serde_json::Result<()> {
    match mode {
        OutputMode::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&compose_report_json(report))?
            );
        }
        OutputMode::Human => print!("{}", render_human(report, color)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupEntry, SkippedFile, Summary, Thresholds};

    fn entry(key: &str, n: usize, sev: Severity) -> GroupEntry {
        GroupEntry {
            group_key: key.into(),
            line_count: n,
            file_name: "notes.md".into(),
            path: format!("{}/kb/notes.md", key),
            severity: sev,
        }
    }

    fn sample() -> Report {
        Report {
            root: "/kb".into(),
            thresholds: Thresholds::default(),
            summary: Summary {
                groups: 3,
                files: 4,
                critical: 0,
                high: 1,
                medium: 1,
                ok: 1,
                requires_action: 2,
                skipped: 1,
            },
            groups: vec![
                entry("B", 1000, Severity::High),
                entry("A", 600, Severity::Medium),
                entry("C", 150, Severity::Ok),
            ],
            skipped: vec![SkippedFile {
                path: "D/kb/bad.md".into(),
                error: "D/kb/bad.md is not valid UTF-8".into(),
            }],
        }
    }

    #[test]
    fn test_render_human_sections_in_order() {
        let text = render_human(&sample(), false);
        assert!(text.contains("Groups: 3"));
        let b = text.find("  1000  HIGH").unwrap();
        let a = text.find("   600  MEDIUM").unwrap();
        let c = text.find("   150  OK").unwrap();
        assert!(b < a && a < c);

        assert!(text.contains("CRITICAL (>1000 lines): none"));
        assert!(text.contains("HIGH (800-1000 lines): 1\n  - B: 1000 lines (notes.md)"));
        assert!(text.contains("MEDIUM (600-799 lines): 1\n  - A: 600 lines (notes.md)"));
        let crit = text.find("CRITICAL (").unwrap();
        let high = text.find("HIGH (").unwrap();
        let med = text.find("MEDIUM (").unwrap();
        assert!(crit < high && high < med);

        assert!(text.contains("Requires action: 2\nOK: 1"));
        assert!(text.contains("Skipped files: 1\n  - D/kb/bad.md: D/kb/bad.md is not valid UTF-8"));
    }

    #[test]
    fn test_render_human_empty_report() {
        let report = Report {
            root: "/empty".into(),
            thresholds: Thresholds::default(),
            summary: Summary::default(),
            groups: Vec::new(),
            skipped: Vec::new(),
        };
        let text = render_human(&report, false);
        assert!(text.contains("Groups: 0"));
        assert!(text.contains("HIGH (800-1000 lines): none"));
        assert!(text.contains("Requires action: 0\nOK: 0"));
        assert!(!text.contains("Skipped"));
    }

    #[test]
    fn test_compose_report_json_shape() {
        let out = compose_report_json(&sample());
        assert_eq!(out["summary"]["requires_action"], 2);
        assert_eq!(out["summary"]["ok"], 1);
        assert_eq!(out["groups"][0]["group_key"], "B");
        assert_eq!(out["groups"][0]["severity"], "HIGH");
        assert_eq!(out["buckets"]["high"][0], "B");
        assert_eq!(out["buckets"]["critical"].as_array().unwrap().len(), 0);
        assert_eq!(out["thresholds"]["critical"], 1000);
        assert_eq!(out["skipped"][0]["path"], "D/kb/bad.md");
    }
}
