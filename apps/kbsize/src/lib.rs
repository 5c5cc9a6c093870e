//! kbsize core library.
//!
//! This crate exposes the pipeline behind the `kbsize` binary: discover
//! files by suffix, count their lines, keep the largest file per group,
//! classify groups into severity buckets, and render a report.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `scan`: File discovery, group keys, and line measurement.
//! - `aggregate`: Deduplication, classification, and report assembly.
//! - `models`: Records, severity buckets, and the report.
//! - `output`: Human/JSON printers.
//! - `error`: Scan and configuration errors.
//! - `utils`: Supporting helpers.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod scan;
pub mod utils;
