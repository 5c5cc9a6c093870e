//! Severity buckets and the thresholds that drive them.
//!
//! Classification is a pure function of a line count:
//! - `n > critical` → `Critical`
//! - `n >= high` → `High`
//! - `n >= medium` → `Medium`
//! - otherwise `Ok`

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
/// Ordered from most to least severe.
pub enum Severity {
    Critical,
    High,
    Medium,
    Ok,
}

impl Severity {
    /// Buckets listed in the report's detail section, in print order.
    pub const ACTIONABLE: [Severity; 3] = [Severity::Critical, Severity::High, Severity::Medium];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Ok => "OK",
        }
    }

    pub fn requires_action(&self) -> bool {
        !matches!(self, Severity::Ok)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Lower bounds for each bucket. `critical` is exclusive, the others inclusive.
pub struct Thresholds {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical: 1000,
            high: 800,
            medium: 600,
        }
    }
}

impl Thresholds {
    /// Reject sets where a bucket would be unreachable in the wrong order.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.critical >= self.high && self.high >= self.medium {
            Ok(self)
        } else {
            Err(ConfigError::InvalidThresholds {
                critical: self.critical,
                high: self.high,
                medium: self.medium,
            })
        }
    }

    pub fn classify(&self, line_count: usize) -> Severity {
        if line_count > self.critical {
            Severity::Critical
        } else if line_count >= self.high {
            Severity::High
        } else if line_count >= self.medium {
            Severity::Medium
        } else {
            Severity::Ok
        }
    }

    /// Human description of the range a bucket covers, e.g. `800-1000 lines`.
    pub fn describe(&self, sev: Severity) -> String {
        match sev {
            Severity::Critical => format!(">{} lines", self.critical),
            Severity::High => format!("{}-{} lines", self.high, self.critical),
            Severity::Medium if self.high <= self.medium => "empty".to_string(),
            Severity::Medium => format!("{}-{} lines", self.medium, self.high - 1),
            Severity::Ok => format!("<{} lines", self.medium),
        }
    }
}
