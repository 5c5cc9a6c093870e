//! Error types for scanning and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Per-file failure during measurement. These never abort a run; the file
/// is skipped and the error is carried into the report.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    Decode { path: PathBuf },
}

impl ScanError {
    /// Path of the file that failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            ScanError::Read { path, .. } | ScanError::Decode { path } => path,
        }
    }
}

/// Problems detected before aggregation starts. The binary maps these to
/// exit code 2.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config {path} is not valid TOML: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config {path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(
        "thresholds must satisfy critical >= high >= medium (got critical={critical}, high={high}, medium={medium})"
    )]
    InvalidThresholds {
        critical: usize,
        high: usize,
        medium: usize,
    },

    #[error("depth must be at least 1 (got {0})")]
    InvalidDepth(usize),

    #[error("root is not a directory: {0}")]
    RootNotFound(PathBuf),

    #[error("unknown output mode '{0}' (expected human|json)")]
    InvalidOutput(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
