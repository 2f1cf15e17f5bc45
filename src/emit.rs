//! Incremental Firehose document emission.
//!
//! The emitter appends one serialized element per diagnostic event to an
//! output file and guarantees the closing tags are written on every exit
//! path. The file is created lazily on the first event; if no event ever
//! arrives, no file is created. Each write is flushed immediately so the
//! document stays well-formed up to the last emitted element even if the
//! process is killed afterwards.

use crate::models::firehose::{Element, Generator, Metadata, Render};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

enum Sink {
    /// No report requested yet; nothing on disk.
    Closed,
    /// Root opening tags written, stream active.
    Open(fs::File),
    /// Closing tags written; further events are dropped.
    Finished,
}

/// Sequential writer for one Firehose document per process run.
///
/// Exactly one emitter instance should exist per run; concurrent
/// producers must serialize their calls (single logical writer).
pub struct Emitter {
    path: PathBuf,
    generator: Generator,
    enabled: bool,
    sink: Sink,
    ever_opened: bool,
}

impl Emitter {
    pub fn new(path: impl AsRef<Path>, generator: Generator, enabled: bool) -> Self {
        Emitter {
            path: path.as_ref().to_path_buf(),
            generator,
            enabled,
            sink: Sink::Closed,
            ever_opened: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        matches!(self.sink, Sink::Open(_))
    }

    /// Whether a document was ever started (and hence exists on disk).
    pub fn opened(&self) -> bool {
        self.ever_opened
    }

    /// Serialize one element and append it to the report.
    ///
    /// Opens the document on the first event. Elements that render to
    /// the empty string are skipped without touching the sink. No-op
    /// when emission is disabled or the document is already finalized.
    pub fn emit(&mut self, element: &Element) -> io::Result<()> {
        if !self.enabled || matches!(self.sink, Sink::Finished) {
            return Ok(());
        }
        let rendered = element.render();
        if rendered.is_empty() {
            return Ok(());
        }
        if matches!(self.sink, Sink::Closed) {
            self.open()?;
        }
        if let Sink::Open(file) = &mut self.sink {
            file.write_all(rendered.as_bytes())?;
            file.write_all(b"\n")?;
            file.flush()?;
        }
        Ok(())
    }

    /// Write the root closing tags and release the sink.
    ///
    /// Idempotent. When no element was ever emitted, the document was
    /// never opened and no file is created or finalized.
    pub fn close(&mut self) -> io::Result<()> {
        match std::mem::replace(&mut self.sink, Sink::Finished) {
            Sink::Open(mut file) => {
                file.write_all(b"</results>\n</analysis>\n")?;
                file.flush()?;
                Ok(())
            }
            Sink::Closed | Sink::Finished => Ok(()),
        }
    }

    fn open(&mut self) -> io::Result<()> {
        let mut file = fs::File::create(&self.path)?;
        file.write_all(b"<analysis>\n")?;
        let metadata = Metadata::new(self.generator.clone()).render();
        if !metadata.is_empty() {
            file.write_all(metadata.as_bytes())?;
            file.write_all(b"\n")?;
        }
        file.write_all(b"<results>\n")?;
        file.flush()?;
        self.sink = Sink::Open(file);
        self.ever_opened = true;
        Ok(())
    }
}

impl Drop for Emitter {
    fn drop(&mut self) {
        // Finalization on every exit path; errors have nowhere to go here.
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::firehose::{Failure, File as SrcFile, Function, Info, Issue, Location, Message};
    use tempfile::tempdir;

    fn gen() -> Generator {
        Generator::new("fireport", "0.1.0")
    }

    fn info(id: &str, text: &str) -> Element {
        Element::Info(Info::new(id, Message::new(text)))
    }

    #[test]
    fn test_no_file_before_first_event() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut emitter = Emitter::new(&path, gen(), true);
        assert!(!path.exists());
        emitter.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_lazy_open_and_well_formed_close() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut emitter = Emitter::new(&path, gen(), true);
        emitter
            .emit(&info("execve", "execve: ignoring (EACCES)"))
            .unwrap();
        assert!(path.exists());
        assert!(emitter.is_open());
        emitter
            .emit(&Element::Failure(Failure::new(
                "external-call",
                Message::new("failed external call: foo"),
            )))
            .unwrap();
        emitter.close().unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.starts_with("<analysis>\n<metadata>\n"));
        assert!(doc.contains("<generator name=\"fireport\" version=\"0.1.0\"/>"));
        assert!(doc.contains("<results>\n"));
        assert!(doc.contains("<info failure-id=\"execve\">"));
        assert!(doc.contains("<failure failure-id=\"external-call\">"));
        assert!(doc.ends_with("</results>\n</analysis>\n"));
        assert_eq!(doc.matches("<analysis>").count(), 1);
    }

    #[test]
    fn test_close_is_idempotent_and_emit_after_close_is_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut emitter = Emitter::new(&path, gen(), true);
        emitter.emit(&info("other", "something odd")).unwrap();
        emitter.close().unwrap();
        emitter.close().unwrap();
        emitter.emit(&info("other", "after close")).unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(!doc.contains("after close"));
        assert_eq!(doc.matches("</analysis>").count(), 1);
    }

    #[test]
    fn test_empty_render_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut emitter = Emitter::new(&path, gen(), true);
        // An absent issue renders to "" and must not open the document.
        emitter.emit(&Element::Issue(Issue::default())).unwrap();
        assert!(!path.exists());
        emitter.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_disabled_never_opens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut emitter = Emitter::new(&path, gen(), false);
        emitter.emit(&info("execve", "execve: denied")).unwrap();
        emitter.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_finalizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        {
            let mut emitter = Emitter::new(&path, gen(), true);
            emitter
                .emit(&info("symbol-loading", "unable to load symbol(x)"))
                .unwrap();
            // No explicit close; Drop must append the closing tags.
        }
        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.ends_with("</results>\n</analysis>\n"));
    }

    #[test]
    fn test_issue_emission() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("firehose.xml");
        let mut emitter = Emitter::new(&path, gen(), true);
        let issue = Issue::new(
            Message::new("Out of memory"),
            Location::new(SrcFile::new("Test.c"), Function::new("Test1")),
        );
        emitter.emit(&Element::Issue(issue)).unwrap();
        emitter.close().unwrap();
        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.contains("<issue>\n<message>Out of memory</message>"));
    }
}
