//! Log-to-report conversion driver.
//!
//! Reads host diagnostic logs matched by glob patterns, parses the
//! severity prefix out of each line, and routes the text through the
//! [`Reporter`]: warnings and notes become `<info>` elements, the first
//! error becomes a `<failure>` and finalizes the document. Unprefixed
//! lines are plain messages and never enter the report.

use crate::classify::classify;
use crate::models::ConvertSummary;
use crate::report::Reporter;
use glob::glob;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Optional tool prefix ("KLEE: ", "fireport: ", ...) followed by a
/// severity token. "WARNING ONCE" must be tried before "WARNING".
const LINE_PATTERN: &str =
    r"^(?:[A-Za-z0-9_.-]+:\s+)?(WARNING ONCE|WARNING|ERROR|NOTE):\s?(.*)$";

/// Severity channel parsed from a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    WarningOnce,
    Note,
    Error,
}

/// Split a log line into its severity channel and message text.
/// Returns `None` for plain (unprefixed) messages.
pub fn parse_line<'a>(re: &Regex, line: &'a str) -> Option<(Severity, &'a str)> {
    let caps = re.captures(line)?;
    let severity = match caps.get(1).map(|m| m.as_str()) {
        Some("WARNING ONCE") => Severity::WarningOnce,
        Some("WARNING") => Severity::Warning,
        Some("NOTE") => Severity::Note,
        Some("ERROR") => Severity::Error,
        _ => return None,
    };
    // The text capture always exists when the line matched.
    let text = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some((severity, text))
}

/// Run conversion across files matched by the input patterns.
///
/// Sink errors propagate (the host treats an unwritable report as
/// fatal); unreadable inputs and bad patterns are collected as
/// non-fatal error strings. Processing stops at the first ERROR line,
/// mirroring the host's fatal-error exit path.
pub fn run_convert(
    root: &Path,
    patterns: &[String],
    reporter: &mut Reporter,
) -> io::Result<(ConvertSummary, Vec<String>)> {
    let line_re = Regex::new(LINE_PATTERN).expect("severity pattern is valid");
    let mut summary = ConvertSummary::new();
    let mut errors: Vec<String> = Vec::new();

    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(paths) => {
                for entry in paths.flatten() {
                    targets.push(entry);
                }
            }
            Err(e) => errors.push(format!("bad glob pattern '{}': {}", pat, e)),
        }
    }
    // Deterministic processing order regardless of glob traversal.
    targets.sort();

    'files: for path in &targets {
        let data = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                errors.push(format!("cannot read '{}': {}", path.display(), e));
                continue;
            }
        };
        summary.files += 1;
        let site = path.to_string_lossy().to_string();
        for line in data.lines() {
            match parse_line(&line_re, line) {
                None => {
                    if !line.trim().is_empty() {
                        summary.messages += 1;
                    }
                }
                Some((Severity::Warning, text)) => {
                    reporter.warning(text)?;
                    summary.infos += 1;
                    summary.count_category(classify(text));
                }
                Some((Severity::WarningOnce, text)) => {
                    if reporter.warning_once(&site, text)? {
                        summary.infos += 1;
                        summary.count_category(classify(text));
                    }
                }
                Some((Severity::Note, text)) => {
                    reporter.note(text)?;
                    summary.infos += 1;
                    summary.count_category(classify(text));
                }
                Some((Severity::Error, text)) => {
                    reporter.error(text)?;
                    summary.failures += 1;
                    summary.count_category(classify(text));
                    // The host exits on its first error; anything after
                    // this line in the logs was never produced.
                    break 'files;
                }
            }
        }
    }

    reporter.finish()?;
    summary.report = reporter
        .report_path()
        .map(|p| p.to_string_lossy().to_string());
    Ok((summary, errors))
}
