use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub ok: bool,
    pub batch: bool,
    pub source: PathBuf,
    pub output_dir: String,
    pub args: Vec<String>,
    /// Final user-facing text; starts with the error marker on failure.
    pub message: String,
    /// pdf2html's stdout, verbatim, when it succeeded.
    pub stdout: Option<String>,
    pub output_file: Option<PathBuf>,
    pub pdf_count: Option<usize>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub started: String,
    pub finished: String,
}
