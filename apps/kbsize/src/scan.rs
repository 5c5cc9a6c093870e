//! File discovery and measurement.
//!
//! Discovery globs `<root>/**/*<suffix>` and yields regular files lazily.
//! Each file is read once, decoded as UTF-8, and its newline-delimited
//! lines are counted. Files that fail to read or decode are reported as
//! `ScanError`s instead of aborting the walk.

use crate::error::{ConfigError, ScanError};
use crate::models::FileRecord;
use glob::{glob_with, MatchOptions, Pattern};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Group key used when the ancestor directory is the root or above it.
pub const ROOT_GROUP: &str = ".";

#[derive(Debug, Clone)]
/// Inputs for one scan.
pub struct ScanOptions {
    pub root: PathBuf,
    pub suffix: String,
    pub depth: usize,
    pub exclude: Vec<Pattern>,
}

/// Records that were measured plus the files that had to be skipped.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub records: Vec<FileRecord>,
    pub errors: Vec<ScanError>,
}

/// Lazily yield files under `opts.root` whose name ends with `opts.suffix`.
///
/// Hidden files and directories (leading `.`) below the root are not
/// walked. Unreadable directory entries are logged and dropped. Paths
/// matching one of the `exclude` patterns (relative to the root) are
/// skipped.
pub fn discover(opts: &ScanOptions) -> Result<impl Iterator<Item = PathBuf> + '_, ConfigError> {
    let pattern = format!(
        "{}/**/*{}",
        Pattern::escape(&opts.root.to_string_lossy()),
        Pattern::escape(&opts.suffix)
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let paths = glob_with(&pattern, options).map_err(|source| ConfigError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;
    Ok(paths.filter_map(move |entry| match entry {
        Ok(p) if p.is_file() => {
            if is_excluded(&opts.root, &p, &opts.exclude) {
                log::debug!("excluded {}", p.display());
                None
            } else {
                Some(p)
            }
        }
        Ok(_) => None,
        Err(e) => {
            log::warn!("cannot read {}: {}", e.path().display(), e.error());
            None
        }
    }))
}

fn is_excluded(root: &Path, path: &Path, exclude: &[Pattern]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let rel = path.strip_prefix(root).unwrap_or(path);
    exclude.iter().any(|p| p.matches_path(rel))
}

/// Count newline-delimited lines. A trailing line without `\n` still counts.
pub fn count_lines(text: &str) -> usize {
    let newlines = text.bytes().filter(|b| *b == b'\n').count();
    if text.is_empty() || text.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Derive the group key: the ancestor `depth` levels above `path`, relative
/// to `root` and joined with `/`. Falls back to [`ROOT_GROUP`] when that
/// ancestor is the root itself or lies outside it.
pub fn group_key(root: &Path, path: &Path, depth: usize) -> String {
    let Some(ancestor) = path.ancestors().nth(depth) else {
        return ROOT_GROUP.to_string();
    };
    let Some(rel) = pathdiff::diff_paths(ancestor, root) else {
        return ROOT_GROUP.to_string();
    };
    let mut parts: Vec<String> = Vec::new();
    for comp in rel.components() {
        match comp {
            Component::Normal(s) => parts.push(s.to_string_lossy().to_string()),
            Component::CurDir => {}
            _ => return ROOT_GROUP.to_string(),
        }
    }
    if parts.is_empty() {
        ROOT_GROUP.to_string()
    } else {
        parts.join("/")
    }
}

/// Read and measure a single file. The handle is dropped before returning.
pub fn measure(root: &Path, path: &Path, depth: usize) -> Result<FileRecord, ScanError> {
    let bytes = fs::read(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ScanError::Decode {
        path: path.to_path_buf(),
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(FileRecord {
        group_key: group_key(root, path, depth),
        file_name,
        path: path.to_path_buf(),
        line_count: count_lines(&text),
    })
}

/// Discover and measure every matching file, one at a time.
pub fn run_scan(opts: &ScanOptions) -> Result<ScanOutput, ConfigError> {
    let mut out = ScanOutput::default();
    for path in discover(opts)? {
        match measure(&opts.root, &path, opts.depth) {
            Ok(rec) => {
                log::debug!(
                    "{} lines in {} (group {})",
                    rec.line_count,
                    path.display(),
                    rec.group_key
                );
                out.records.push(rec);
            }
            Err(e) => {
                log::warn!("skipping {}", e);
                out.errors.push(e);
            }
        }
    }
    log::info!(
        "measured {} files under {} ({} skipped)",
        out.records.len(),
        opts.root.display(),
        out.errors.len()
    );
    Ok(out)
}
