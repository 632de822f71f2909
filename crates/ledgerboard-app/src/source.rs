//! Swappable record sources.
//!
//! A source only produces the raw shape the record store accepts (an array
//! of rows or an object of columns, as JSON or YAML); parsing into records
//! happens in the core.

use crate::error::AppResult;
use async_trait::async_trait;
use ledgerboard_config::{DataConfig, DataFormat};
use ledgerboard_views::RawInput;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Supplies the raw input for one render.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches the current raw input.
    async fn fetch(&self) -> AppResult<RawInput>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Reads records from a JSON or YAML file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: DataFormat,
}

impl FileSource {
    /// Creates a source for `path` parsed as `format`.
    pub fn new(path: impl Into<PathBuf>, format: DataFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Builds a source from the `data` configuration section.
    ///
    /// Returns `None` when no path is configured.
    #[must_use]
    pub fn from_config(config: &DataConfig) -> Option<Self> {
        config
            .path
            .as_ref()
            .map(|path| Self::new(path.clone(), config.resolved_format()))
    }

    /// Path being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> AppResult<RawInput> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let value = match self.format {
            DataFormat::Json => RawInput::Json(serde_json::from_str(&contents)?),
            DataFormat::Yaml => RawInput::Yaml(serde_yaml::from_str(&contents)?),
        };
        debug!(bytes = contents.len(), "Read record file");
        Ok(value)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Serves a fixed in-memory value.
#[derive(Debug, Clone)]
pub struct StaticSource {
    value: RawInput,
}

impl StaticSource {
    /// Wraps a parsed JSON or YAML value.
    #[must_use]
    pub fn new(value: impl Into<RawInput>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch(&self) -> AppResult<RawInput> {
        Ok(self.value.clone())
    }

    fn describe(&self) -> String {
        "static records".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerboard_views::load_input;
    use std::io::Write;

    #[tokio::test]
    async fn test_yaml_file_source() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(
            file,
            "- {{ 일: 1일, 매출: 100, 매입: 80, 주: 1주 }}\n- {{ 일: 2일, 매출: 50, 매입: 80, 주: 1주 }}"
        )
        .unwrap();

        let config = DataConfig {
            path: Some(file.path().to_path_buf()),
            format: None,
        };
        let source = FileSource::from_config(&config).unwrap();
        let raw = source.fetch().await.unwrap();
        let records = load_input(&raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records.records()[1].revenue, 50.0);
    }

    #[tokio::test]
    async fn test_yaml_file_source_keeps_nan_amounts() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "- {{ 일: 1일, 매출: .nan, 매입: 80, 주: 1주 }}").unwrap();

        let source = FileSource::new(file.path(), DataFormat::Yaml);
        let records = load_input(&source.fetch().await.unwrap()).unwrap();
        assert!(records.records()[0].revenue.is_nan());
        assert_eq!(records.records()[0].cost, 80.0);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = FileSource::new("/nonexistent/records.json", DataFormat::Json);
        assert!(matches!(
            source.fetch().await,
            Err(crate::error::AppError::Io(_))
        ));
    }

    #[test]
    fn test_no_path_no_source() {
        assert!(FileSource::from_config(&DataConfig::default()).is_none());
    }
}
