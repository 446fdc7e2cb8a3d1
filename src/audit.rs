//! Audit logging of split requests.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::split::{Mode, SplitError};

/// An audit log entry.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Dialect used for the split.
    pub mode: Mode,
    /// The input line, truncated.
    pub input: String,
    /// Number of words produced (zero on error).
    pub words: usize,
    /// Error message if the split failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry from an input line and its split result.
    pub fn new(input: &str, mode: Mode, result: &Result<Vec<String>, SplitError>) -> Self {
        let (words, error) = match result {
            Ok(words) => (words.len(), None),
            Err(e) => (0, Some(e.to_string())),
        };

        Self {
            timestamp: Utc::now(),
            mode,
            input: truncate_string(input, 200),
            words,
            error,
        }
    }
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars - 3).collect();
        out.push_str("...");
        out
    }
}

/// Audit logger for writing entries to a file.
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create an audit log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write an audit entry to the log.
    pub fn log(&mut self, entry: &AuditEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }

    /// Log the outcome of splitting one line.
    pub fn log_split(
        &mut self,
        input: &str,
        mode: Mode,
        result: &Result<Vec<String>, SplitError>,
    ) -> std::io::Result<()> {
        let entry = AuditEntry::new(input, mode, result);
        self.log(&entry)
    }
}
