//! Configuration from `dts-etch.toml`
//!
//! ```toml
//! [diff]
//! dedupe_shared_names = false
//! format = "text"        # text | json | html
//! color = true
//!
//! [output]
//! directory = "changes"
//! ```
//!
//! Every key is optional. Command line flags override file values.

use crate::diagnostics::{EtchError, EtchResult};
use crate::diff::DiffOptions;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "dts-etch.toml";

/// Output format for change reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl ReportFormat {
    /// File extension for reports in this format
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = EtchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            other => Err(EtchError::config(format!(
                "unknown report format '{}', expected text, json or html",
                other
            ))),
        }
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
        };
        f.write_str(name)
    }
}

/// `[diff]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub dedupe_shared_names: bool,
    pub format: ReportFormat,
    pub color: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            dedupe_shared_names: false,
            format: ReportFormat::Text,
            color: true,
        }
    }
}

/// `[output]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where changelog reports are written
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("changes"),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtchConfig {
    pub diff: DiffConfig,
    pub output: OutputConfig,
}

impl EtchConfig {
    /// Parse configuration text
    pub fn parse(text: &str) -> EtchResult<Self> {
        toml::from_str(text).map_err(|e| EtchError::config(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> EtchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text)
            .map_err(|e| EtchError::config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `dts-etch.toml` from `dir` if present, defaults otherwise
    pub fn discover(dir: impl AsRef<Path>) -> EtchResult<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Comparison options derived from the `[diff]` table
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::default().with_dedupe_shared_names(self.diff.dedupe_shared_names)
    }
}
