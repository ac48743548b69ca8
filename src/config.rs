use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    /// Ask before opening the pull request.
    #[default]
    Prompt,
    Always,
    Never,
}

/// Defaults read from `config.toml`; command line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub interval_secs: u64,
    pub timeout_secs: Option<u64>,
    pub max_errors: u32,
    pub host: String,
    pub api_base: Option<String>,
    pub notify: bool,
    pub open: OpenMode,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            timeout_secs: None,
            max_errors: 3,
            host: "github.com".to_string(),
            api_base: None,
            notify: true,
            open: OpenMode::Prompt,
        }
    }
}

impl FileConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read config {}", path.display()));
            }
        };
        toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("prwatch").join("config.toml"))
}
