//! Host-facing diagnostic entry points feeding the report emitter.
//!
//! Mirrors the four logging calls a host analysis tool makes: plain
//! message, warning, warning-once, and fatal error (plus notes, which
//! share the warning channel). Warnings and notes become `<info>`
//! elements, errors become `<failure>` elements; plain messages are
//! echoed but never reported. The severity channel decides the element
//! kind; the classifier only supplies the category id.

use crate::classify::classify;
use crate::emit::Emitter;
use crate::models::firehose::{Element, Failure, Info, Message};
use crate::utils;
use std::collections::HashSet;
use std::io;

/// Messages matching this prefix carry call-specific argument lists, so
/// warn-once keys are normalized down to the prefix itself.
const CALLING_EXTERNAL: &str = "calling external";

/// Single-writer diagnostic reporter owning the document emitter.
pub struct Reporter {
    emitter: Emitter,
    seen: HashSet<(String, String)>,
    echo: bool,
}

impl Reporter {
    pub fn new(emitter: Emitter, echo: bool) -> Self {
        Reporter {
            emitter,
            seen: HashSet::new(),
            echo,
        }
    }

    /// Plain message: console only, never part of the report.
    pub fn message(&mut self, text: &str) {
        if self.echo {
            eprintln!("{}", text);
        }
    }

    /// Warning: classified and reported as an `<info>` element.
    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        if self.echo {
            eprintln!("{} {}", utils::warning_prefix(), text);
        }
        self.emit_info(text)
    }

    /// Warning deduplicated per (call-site identity, normalized message).
    /// Returns whether the warning was actually reported.
    pub fn warning_once(&mut self, site: &str, text: &str) -> io::Result<bool> {
        let key_msg = if text.starts_with(CALLING_EXTERNAL) {
            CALLING_EXTERNAL
        } else {
            text
        };
        let key = (site.to_string(), key_msg.to_string());
        if !self.seen.insert(key) {
            return Ok(false);
        }
        if self.echo {
            eprintln!("{} {}", utils::warning_once_prefix(), text);
        }
        self.emit_info(text)?;
        Ok(true)
    }

    /// Note: informational, shares the warning channel in the report.
    pub fn note(&mut self, text: &str) -> io::Result<()> {
        if self.echo {
            eprintln!("{} {}", utils::note_prefix(), text);
        }
        self.emit_info(text)
    }

    /// Fatal error: reported as a `<failure>` element, then the document
    /// is finalized. Process exit stays with the caller.
    pub fn error(&mut self, text: &str) -> io::Result<()> {
        if self.echo {
            eprintln!("{} {}", utils::error_prefix(), text);
        }
        let failure = Failure::new(classify(text), Message::new(text));
        self.emitter.emit(&Element::Failure(failure))?;
        self.emitter.close()
    }

    /// Emit an already-constructed element, e.g. an `<issue>` built by
    /// the analysis engine with location and trace information.
    pub fn emit(&mut self, element: &Element) -> io::Result<()> {
        self.emitter.emit(element)
    }

    /// Finalize the report on graceful completion.
    pub fn finish(&mut self) -> io::Result<()> {
        self.emitter.close()
    }

    /// Report path when a document was actually written.
    pub fn report_path(&self) -> Option<&std::path::Path> {
        if self.emitter.opened() {
            Some(self.emitter.path())
        } else {
            None
        }
    }

    fn emit_info(&mut self, text: &str) -> io::Result<()> {
        let info = Info::new(classify(text), Message::new(text));
        self.emitter.emit(&Element::Info(info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::firehose::Generator;
    use tempfile::tempdir;

    fn reporter(path: &std::path::Path) -> Reporter {
        Reporter::new(
            Emitter::new(path, Generator::new("fireport", "0.1.0"), true),
            false,
        )
    }

    #[test]
    fn test_warning_becomes_info_element() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut rep = reporter(&path);
        rep.warning("undefined reference to variable: acs_map")
            .unwrap();
        rep.finish().unwrap();
        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.contains("<info failure-id=\"undefined-variable-reference\">"));
        assert!(doc.contains("<message>undefined reference to variable: acs_map</message>"));
    }

    #[test]
    fn test_error_becomes_failure_and_finalizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut rep = reporter(&path);
        rep.error("unable to load symbol(foo)").unwrap();
        // Document is already closed; later diagnostics are dropped.
        rep.warning("calling external: bar()").unwrap();
        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.contains("<failure failure-id=\"symbol-loading\">"));
        assert!(!doc.contains("calling external"));
        assert!(doc.ends_with("</results>\n</analysis>\n"));
    }

    #[test]
    fn test_warning_once_dedup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut rep = reporter(&path);
        rep.warning_once("site-a", "execve: ignoring (EACCES)").unwrap();
        rep.warning_once("site-a", "execve: ignoring (EACCES)").unwrap();
        rep.warning_once("site-b", "execve: ignoring (EACCES)").unwrap();
        rep.finish().unwrap();
        let doc = std::fs::read_to_string(&path).unwrap();
        // Same site suppressed, distinct site reported.
        assert_eq!(doc.matches("<info failure-id=\"execve\">").count(), 2);
    }

    #[test]
    fn test_warning_once_normalizes_calling_external() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut rep = reporter(&path);
        rep.warning_once("site", "calling external: f(1)").unwrap();
        rep.warning_once("site", "calling external: f(2)").unwrap();
        rep.finish().unwrap();
        let doc = std::fs::read_to_string(&path).unwrap();
        assert_eq!(doc.matches("<info failure-id=\"calling-external\">").count(), 1);
    }

    #[test]
    fn test_plain_message_not_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut rep = reporter(&path);
        rep.message("halting execution, dumping remaining states");
        rep.finish().unwrap();
        assert!(!path.exists());
    }
}
