//! Configuration discovery and effective settings resolution.
//!
//! kbsize reads `kbsize.toml|yaml|yml` from the working directory (or the
//! closest ancestor, stopping at a `.git` directory) and merges it with CLI
//! flags to produce an `Effective` config.
//! Defaults:
//! - `root`: the working directory
//! - `suffix`: `.md`
//! - `depth`: 2
//! - `output`: `human`
//! - `thresholds`: critical 1000, high 800, medium 600
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{ConfigError, Result};
use crate::models::Thresholds;
use glob::Pattern;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_NAMES: [&str; 3] = ["kbsize.toml", "kbsize.yaml", "kbsize.yml"];
pub const DEFAULT_SUFFIX: &str = ".md";
pub const DEFAULT_DEPTH: usize = 2;

#[derive(Debug, Default, Deserialize, Clone)]
/// Threshold overrides under `[thresholds]`; missing keys keep defaults.
pub struct ThresholdsCfg {
    pub critical: Option<usize>,
    pub high: Option<usize>,
    pub medium: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `kbsize.toml|yaml`.
pub struct KbsizeConfig {
    pub root: Option<String>,
    pub suffix: Option<String>,
    pub depth: Option<usize>,
    pub output: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub thresholds: Option<ThresholdsCfg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            _ => Err(ConfigError::InvalidOutput(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the run after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub suffix: String,
    pub depth: usize,
    pub output: OutputMode,
    pub thresholds: Thresholds,
    pub exclude: Vec<Pattern>,
    /// Config file that contributed settings, if any.
    pub config_path: Option<PathBuf>,
}

/// Walk upward from `start` looking for a config file.
///
/// Stops at the first directory holding a `.git` entry.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        for name in CONFIG_NAMES {
            let p = cur.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Parse a config file; the format follows the extension (TOML unless
/// `.yaml`/`.yml`).
pub fn load_config(path: &Path) -> Result<KbsizeConfig> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolve `Effective` by merging CLI flags, the config file, and defaults.
///
/// `start` is the directory config discovery begins from (normally the
/// working directory). A relative `root` from the config file is taken
/// relative to that file; a relative CLI `root` relative to `start`.
pub fn resolve_effective(
    start: &Path,
    cli_config: Option<&Path>,
    cli_root: Option<&str>,
    cli_suffix: Option<&str>,
    cli_depth: Option<usize>,
    cli_output: Option<&str>,
) -> Result<Effective> {
    let config_path = match cli_config {
        Some(p) => Some(start.join(p)),
        None => find_config(start),
    };
    let cfg = match config_path.as_deref() {
        Some(p) => load_config(p)?,
        None => KbsizeConfig::default(),
    };
    let cfg_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(start)
        .to_path_buf();

    let root = match (cli_root, cfg.root.as_deref()) {
        (Some(r), _) => start.join(r),
        (None, Some(r)) => cfg_dir.join(r),
        (None, None) => start.to_path_buf(),
    };
    if !root.is_dir() {
        return Err(ConfigError::RootNotFound(root));
    }
    // Canonical root keeps group keys stable however the root was spelled
    let root = fs::canonicalize(&root).unwrap_or(root);

    let suffix = cli_suffix
        .map(|s| s.to_string())
        .or(cfg.suffix)
        .unwrap_or_else(|| DEFAULT_SUFFIX.to_string());

    let depth = cli_depth.or(cfg.depth).unwrap_or(DEFAULT_DEPTH);
    if depth == 0 {
        return Err(ConfigError::InvalidDepth(depth));
    }

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string())
        .parse::<OutputMode>()?;

    let defaults = Thresholds::default();
    let tcfg = cfg.thresholds.unwrap_or_default();
    let thresholds = Thresholds {
        critical: tcfg.critical.unwrap_or(defaults.critical),
        high: tcfg.high.unwrap_or(defaults.high),
        medium: tcfg.medium.unwrap_or(defaults.medium),
    }
    .validate()?;

    let exclude = cfg
        .exclude
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| ConfigError::Pattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Effective {
        root,
        suffix,
        depth,
        output,
        thresholds,
        exclude,
        config_path,
    })
}
