use crate::request::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub converter: Converter,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub preview: Preview,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw)
            .with_context(|| format!("parsing TOML: {}", path.display()))?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Converter {
    /// Location of the external pdf2html executable.
    pub executable: String,
    /// 0 waits for the child forever.
    pub timeout_seconds: u64,
    /// Pass `--theme modern` even though modern is the tool's own default.
    pub pass_default_theme: bool,
    pub env: BTreeMap<String, String>,
}
impl Default for Converter {
    fn default() -> Self {
        Self {
            executable: "/opt/pdf2html/pdf2html".into(),
            timeout_seconds: 0,
            pass_default_theme: false,
            env: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub output_dir: String,
    pub theme: Theme,
}
impl Default for Defaults {
    fn default() -> Self {
        Self {
            output_dir: "output/".into(),
            theme: Theme::Modern,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Preview {
    pub enabled: bool,
    pub max_bytes: usize,
    /// Also look for `<out>/<stem>.html` when the nested layout is absent.
    pub probe_flat_layout: bool,
}
impl Default for Preview {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: 64 * 1024,
            probe_flat_layout: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
