use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Modern,
    Minimal,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Modern => "modern",
            Theme::Minimal => "minimal",
        }
    }

    pub fn is_default(self) -> bool {
        self == Theme::default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one run of the external converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// A PDF file, or a folder of PDFs when `batch` is set.
    pub source: PathBuf,
    pub output_dir: String,
    pub body_only: bool,
    pub no_toc: bool,
    pub theme: Theme,
    pub batch: bool,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            body_only: false,
            no_toc: false,
            theme: Theme::default(),
            batch: false,
        }
    }

    pub fn body_only(mut self, on: bool) -> Self {
        self.body_only = on;
        self
    }

    pub fn no_toc(mut self, on: bool) -> Self {
        self.no_toc = on;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn batch(mut self, on: bool) -> Self {
        self.batch = on;
        self
    }
}
