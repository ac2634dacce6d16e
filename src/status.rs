//! Incremental progress messages emitted while a conversion runs.
//!
//! A conversion blocks on one external process, so statuses are pushed into a
//! [`StatusSink`] as they happen. The CLI prints them; a UI can hand in a
//! [`crossbeam_channel::Sender`] and render from another thread.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Status {
    Reading,
    Scanning,
    Found { pdf_count: usize },
    Starting,
    Completed { message: String },
    Preview { path: PathBuf, content: String },
    Warning { message: String },
    Failed { message: String },
}

impl Status {
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Failed { .. })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Reading => f.write_str("⏳ Reading PDF..."),
            Status::Scanning => f.write_str("⏳ Scanning folder..."),
            Status::Found { pdf_count } => write!(f, "📊 Found {pdf_count} PDF files"),
            Status::Starting => f.write_str("⏳ Starting batch conversion..."),
            Status::Completed { message } => f.write_str(message),
            Status::Preview { content, .. } => write!(f, "👁 {content}"),
            Status::Warning { message } => write!(f, "⚠️ {message}"),
            Status::Failed { message } => f.write_str(message),
        }
    }
}

pub trait StatusSink {
    fn emit(&mut self, status: Status);
}

impl StatusSink for Vec<Status> {
    fn emit(&mut self, status: Status) {
        self.push(status);
    }
}

impl StatusSink for crossbeam_channel::Sender<Status> {
    fn emit(&mut self, status: Status) {
        // A dropped receiver only means nobody is watching anymore.
        let _ = self.send(status);
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F: FnMut(Status)>(pub F);

impl<F: FnMut(Status)> StatusSink for FnSink<F> {
    fn emit(&mut self, status: Status) {
        (self.0)(status)
    }
}

/// Discards everything.
pub struct NullSink;

impl StatusSink for NullSink {
    fn emit(&mut self, _status: Status) {}
}
