//! End-to-end runs of the report pipeline over temporary trees.

use kbsize::aggregate::run_report;
use kbsize::config::resolve_effective;
use kbsize::models::Severity;
use kbsize::output::{compose_report_json, render_human};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write_lines(path: &Path, n: usize) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let body: String = (0..n).map(|i| format!("- fact {}\n", i)).collect();
    fs::write(path, body).unwrap();
}

/// Temp root marked as a repository so config discovery stays inside it.
fn repo() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    dir
}

#[test]
fn scenario_three_groups() {
    let dir = repo();
    let root = dir.path();
    write_lines(&root.join("A/knowledge/notes.md"), 600);
    write_lines(&root.join("B/knowledge/notes.md"), 1000);
    write_lines(&root.join("C/knowledge/notes.md"), 150);
    // Smaller sibling in B must not replace the 1000-line file
    write_lines(&root.join("B/knowledge/extra.md"), 20);
    // Different suffix is ignored
    write_lines(&root.join("C/knowledge/raw.txt"), 5000);

    let eff = resolve_effective(root, None, None, None, None, None).unwrap();
    let report = run_report(&eff).unwrap();

    let order: Vec<&str> = report.groups.iter().map(|g| g.group_key.as_str()).collect();
    assert_eq!(order, vec!["B", "A", "C"]);
    assert_eq!(report.groups[0].severity, Severity::High);
    assert_eq!(report.groups[0].file_name, "notes.md");
    assert_eq!(report.groups[1].severity, Severity::Medium);
    assert_eq!(report.groups[2].severity, Severity::Ok);
    assert_eq!(report.summary.files, 4);
    assert_eq!(report.summary.requires_action, 2);
    assert_eq!(report.summary.ok, 1);

    let json = compose_report_json(&report);
    assert_eq!(json["buckets"]["high"][0], "B");
    assert_eq!(json["buckets"]["medium"][0], "A");
}

#[test]
fn empty_root_reports_nothing() {
    let dir = repo();
    let eff = resolve_effective(dir.path(), None, None, None, None, None).unwrap();
    let report = run_report(&eff).unwrap();
    assert_eq!(report.summary.groups, 0);
    assert!(report.groups.is_empty());
    assert!(report.skipped.is_empty());
    let text = render_human(&report, false);
    assert!(text.contains("CRITICAL (>1000 lines): none"));
    assert!(text.contains("MEDIUM (600-799 lines): none"));
}

#[test]
fn rerun_renders_identically() {
    let dir = repo();
    let root = dir.path();
    write_lines(&root.join("x/kb/a.md"), 1200);
    write_lines(&root.join("y/kb/b.md"), 810);
    write_lines(&root.join("y/kb/c.md"), 810);
    write_lines(&root.join("z/kb/d.md"), 3);

    let eff = resolve_effective(root, None, None, None, None, None).unwrap();
    let first = run_report(&eff).unwrap();
    let second = run_report(&eff).unwrap();
    assert_eq!(first, second);
    assert_eq!(render_human(&first, false), render_human(&second, false));
    // Tie inside y resolves to the smaller path
    let y = first.groups.iter().find(|g| g.group_key == "y").unwrap();
    assert_eq!(y.file_name, "b.md");
}

#[test]
fn undecodable_file_is_skipped_and_listed() {
    let dir = repo();
    let root = dir.path();
    write_lines(&root.join("good/kb/a.md"), 700);
    let bad = root.join("bad/kb/b.md");
    fs::create_dir_all(bad.parent().unwrap()).unwrap();
    fs::write(&bad, [b'o', b'k', b'\n', 0xc3, 0x28]).unwrap();

    let eff = resolve_effective(root, None, None, None, None, None).unwrap();
    let report = run_report(&eff).unwrap();
    assert_eq!(report.summary.groups, 1);
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.skipped[0].path, "bad/kb/b.md");

    let text = render_human(&report, false);
    assert!(text.contains("Skipped files: 1"));
    assert!(text.contains("bad/kb/b.md"));
}

#[test]
fn config_file_shapes_the_run() {
    let dir = repo();
    let root = dir.path();
    fs::write(
        root.join("kbsize.toml"),
        r#"
root = "agents"
suffix = "-knowledge.md"
depth = 1
exclude = ["archived/**"]
[thresholds]
critical = 100
high = 50
medium = 10
"#,
    )
    .unwrap();
    write_lines(&root.join("agents/alpha/alpha-knowledge.md"), 120);
    write_lines(&root.join("agents/beta/beta-knowledge.md"), 50);
    write_lines(&root.join("agents/beta/README.md"), 500);
    write_lines(&root.join("agents/archived/old-knowledge.md"), 999);

    let eff = resolve_effective(root, None, None, None, None, None).unwrap();
    let report = run_report(&eff).unwrap();
    let keyed: Vec<(&str, Severity)> = report
        .groups
        .iter()
        .map(|g| (g.group_key.as_str(), g.severity))
        .collect();
    assert_eq!(
        keyed,
        vec![("alpha", Severity::Critical), ("beta", Severity::High)]
    );
}
