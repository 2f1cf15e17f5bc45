//! Fireport core library.
//!
//! This crate converts free-text analyzer diagnostics into structured
//! reports in the Firehose XML interchange format, and classifies raw
//! diagnostic strings into stable category ids for downstream tooling.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: The Firehose value model plus printer summary structs.
//! - `classify`: Ordered pattern table mapping messages to category ids.
//! - `emit`: Lazy, incrementally flushed document emitter.
//! - `report`: Host-facing message/warning/warning-once/error entry points.
//! - `convert`: Log-to-report conversion driver.
//! - `output`: Human/JSON printers for conversion summaries.
//! - `utils`: Supporting helpers.
pub mod classify;
pub mod cli;
pub mod config;
pub mod convert;
pub mod emit;
pub mod models;
pub mod output;
pub mod report;
pub mod utils;
