use crate::{config::Config, error::PreviewError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlPreview {
    pub path: PathBuf,
    pub file_bytes: u64,
    pub content: String,
    pub truncated: bool,
}

impl HtmlPreview {
    pub fn size_kb(&self) -> f64 {
        self.file_bytes as f64 / 1024.0
    }
}

/// Where pdf2html is expected to leave the HTML for `source`.
///
/// The tool nests its output under a folder named like the output dir itself,
/// e.g. `output/output/doc.html`. That layout is observed, not documented, so
/// the flat `output/doc.html` comes second when enabled.
pub fn candidate_paths(cfg: &Config, output_dir: &str, source: &Path) -> Vec<PathBuf> {
    let out = output_dir.trim_end_matches('/');
    let nested_name = if out.is_empty() { "output" } else { out };
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}.html");

    let mut paths = vec![Path::new(out).join(nested_name).join(&file_name)];
    if cfg.preview.probe_flat_layout {
        paths.push(Path::new(out).join(&file_name));
    }
    paths
}

pub fn locate_output(cfg: &Config, output_dir: &str, source: &Path) -> Result<PathBuf, PreviewError> {
    let tried = candidate_paths(cfg, output_dir, source);
    tried
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or(PreviewError::NotFound { tried })
}

pub fn read_preview(cfg: &Config, path: &Path) -> Result<HtmlPreview, PreviewError> {
    let read_err = |source| PreviewError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file_bytes = std::fs::metadata(path).map_err(read_err)?.len();
    let mut content = if cfg.preview.enabled {
        std::fs::read_to_string(path).map_err(read_err)?
    } else {
        String::new()
    };

    let max = cfg.preview.max_bytes;
    let truncated = max > 0 && content.len() > max;
    if truncated {
        let mut cut = max;
        while !content.is_char_boundary(cut) {
            cut -= 1;
        }
        content.truncate(cut);
    }

    Ok(HtmlPreview {
        path: path.to_path_buf(),
        file_bytes,
        content,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_layout_comes_first() {
        let cfg = Config::default();
        let paths = candidate_paths(&cfg, "output/", Path::new("/tmp/in/report.pdf"));
        assert_eq!(paths[0], PathBuf::from("output/output/report.html"));
        assert_eq!(paths[1], PathBuf::from("output/report.html"));
    }

    #[test]
    fn empty_output_dir_falls_back_to_output_name() {
        let mut cfg = Config::default();
        cfg.preview.probe_flat_layout = false;
        let paths = candidate_paths(&cfg, "", Path::new("doc.pdf"));
        assert_eq!(paths, vec![PathBuf::from("output/doc.html")]);
    }
}
