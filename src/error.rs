use std::path::PathBuf;
use thiserror::Error;

/// Prefix of every user-facing failure line.
pub const ERROR_MARKER: &str = "❌";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("No PDF file selected")]
    NoInput,

    #[error("No folder path provided")]
    NoFolder,

    #[error("Folder not found: {path}")]
    FolderNotFound { path: String },

    #[error("Could not list folder {path}: {source}")]
    FolderUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("pdf2html not found at {}", path.display())]
    ExecutableMissing { path: PathBuf },

    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("waiting for {}: {source}", program.display())]
    Io {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} {}: {diagnostic}", program.display(), describe_exit(*code))]
    Failed {
        program: PathBuf,
        code: Option<i32>,
        diagnostic: String,
    },

    #[error("{} exceeded timeout ({secs}s); stderr: {stderr}", program.display())]
    Timeout {
        program: PathBuf,
        secs: u64,
        stderr: String,
    },
}

impl ConvertError {
    /// True for errors raised by the external process rather than by input checks.
    pub fn is_process_error(&self) -> bool {
        matches!(
            self,
            ConvertError::ExecutableMissing { .. }
                | ConvertError::Spawn { .. }
                | ConvertError::Io { .. }
                | ConvertError::Failed { .. }
                | ConvertError::Timeout { .. }
        )
    }

    pub fn user_message(&self) -> String {
        if self.is_process_error() {
            format!("{ERROR_MARKER} Error: {self}")
        } else {
            format!("{ERROR_MARKER} {self}")
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("returned non-zero exit status {c}"),
        None => "was terminated by a signal".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("no output file at {}", tried.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" or "))]
    NotFound { tried: Vec<PathBuf> },

    #[error("{}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
