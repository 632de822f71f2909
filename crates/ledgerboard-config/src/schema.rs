//! Configuration schema definitions using serde.

use ledgerboard_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Ledgerboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record input configuration.
    pub data: DataConfig,
    /// Dashboard layout configuration.
    pub dashboard: DashboardConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Encoding of the record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// JSON array of rows or object of columns.
    Json,
    /// YAML with the same shapes as JSON.
    Yaml,
}

/// Record input configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the record file.
    pub path: Option<PathBuf>,
    /// Explicit file format; inferred from the extension when absent.
    pub format: Option<DataFormat>,
}

impl DataConfig {
    /// Format to parse the record file with.
    #[must_use]
    pub fn resolved_format(&self) -> DataFormat {
        self.format.unwrap_or_else(|| {
            self.path
                .as_deref()
                .map_or(DataFormat::Json, format_from_extension)
        })
    }
}

fn format_from_extension(path: &Path) -> DataFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            DataFormat::Yaml
        }
        _ => DataFormat::Json,
    }
}

/// Dashboard layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page title.
    pub title: String,
    /// Optional subtitle shown under the title.
    pub subtitle: Option<String>,
    /// Optional footer text.
    pub footer: Option<String>,
    /// Number of cards per grid row.
    pub columns: u32,
    /// YAML view catalog; the built-in catalog is used when absent.
    pub catalog_path: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file; stdout when absent.
    pub path: Option<PathBuf>,
    /// Whether to pretty-print the document.
    pub pretty: bool,
}
