//! Test builders: a watched log file inside a private temp directory, plus
//! helpers that mimic what writers and log rotators do to it.
//!
//! These are for readability in test bodies, not for production use. They
//! panic on I/O failure rather than returning `Result`.

use campfire::core::{parse, LogRecord};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// LogFile
// ---------------------------------------------------------------------------

/// A log file path in its own temp directory. The file itself is not created
/// until something is written.
///
/// ```rust
/// let log = LogFile::absent("app.log");
/// log.write("INFO a\nERRO b\n");
/// log.rotate_to("WARN c\n");
/// ```
pub struct LogFile {
    // Held for its Drop; the directory goes away with the test.
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl LogFile {
    /// A path that does not exist yet.
    pub fn absent(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        Self { _dir: dir, path }
    }

    /// A file created with `content`.
    pub fn with_content(name: &str, content: &str) -> Self {
        let log = Self::absent(name);
        log.write(content);
        log
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the whole file, creating it if needed.
    pub fn write(&self, content: &str) {
        fs::write(&self.path, content).expect("write log file");
    }

    pub fn write_bytes(&self, content: &[u8]) {
        fs::write(&self.path, content).expect("write log file");
    }

    /// Append like a running service would.
    pub fn append(&self, content: &str) {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .expect("open log file for append");
        file.write_all(content.as_bytes()).expect("append to log file");
    }

    /// `> app.log`
    pub fn truncate(&self) {
        fs::write(&self.path, b"").expect("truncate log file");
    }

    pub fn remove(&self) {
        fs::remove_file(&self.path).expect("remove log file");
    }

    /// Move the current file aside to `<name>.1` and start a fresh one with
    /// `content` at the original path.
    pub fn rotate_to(&self, content: &str) {
        let mut rotated = self.path.clone().into_os_string();
        rotated.push(".1");
        fs::rename(&self.path, &rotated).expect("rotate log file");
        self.write(content);
    }

    /// Put a directory where the file should be.
    pub fn replace_with_dir(&self) {
        if self.path.exists() {
            self.remove();
        }
        fs::create_dir(&self.path).expect("create directory at log path");
    }

    pub fn remove_dir(&self) {
        fs::remove_dir(&self.path).expect("remove directory at log path");
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Join lines with `\n` and parse them, as if read from a file.
pub fn records_of(lines: &[&str]) -> Vec<LogRecord> {
    parse(lines.join("\n").as_bytes())
}

/// Only the records with text, since a trailing newline yields an empty last
/// record.
pub fn non_empty(records: &[LogRecord]) -> Vec<&LogRecord> {
    records.iter().filter(|r| !r.text().is_empty()).collect()
}
