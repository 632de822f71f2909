//! Render driver: source → record store → composer → adapter.

use crate::adapter::{JsonAdapter, Layout, PresentationAdapter};
use crate::error::{AppError, AppResult};
use crate::source::{FileSource, RecordSource};
use ledgerboard_config::{Config, ConfigError};
use ledgerboard_views::{compose, default_catalog, load_input, ViewCatalog};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// One dashboard: where records come from, which views to build, and how
/// to present them.
pub struct Dashboard {
    layout: Layout,
    catalog: ViewCatalog,
    source: Box<dyn RecordSource>,
    adapter: Box<dyn PresentationAdapter>,
}

impl Dashboard {
    /// Creates a dashboard from its parts.
    pub fn new(
        layout: Layout,
        catalog: ViewCatalog,
        source: Box<dyn RecordSource>,
        adapter: Box<dyn PresentationAdapter>,
    ) -> Self {
        Self {
            layout,
            catalog,
            source,
            adapter,
        }
    }

    /// Wires a file source, the configured (or built-in) catalog, and the
    /// JSON adapter from configuration.
    ///
    /// # Errors
    ///
    /// Fails when no data path is configured or the catalog file cannot be
    /// read, parsed, or validated.
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let source = FileSource::from_config(&config.data).ok_or_else(|| {
            ConfigError::Invalid("data.path must point at a record file".to_string())
        })?;

        let catalog = match &config.dashboard.catalog_path {
            Some(path) => load_catalog(path).await?,
            None => default_catalog().clone(),
        };

        Ok(Self::new(
            Layout::from(&config.dashboard),
            catalog,
            Box::new(source),
            Box::new(JsonAdapter::new(config.output.pretty)),
        ))
    }

    /// Views this dashboard builds, in grid order.
    #[must_use]
    pub const fn catalog(&self) -> &ViewCatalog {
        &self.catalog
    }

    /// Runs one render pass and returns the adapter's document.
    ///
    /// Either every view is built or the pass fails; a dashboard with
    /// silently missing panels is never produced.
    ///
    /// # Errors
    ///
    /// Propagates source, record, composition, and adapter errors.
    #[instrument(skip(self), fields(source = %self.source.describe(), views = self.catalog.len()))]
    pub async fn render(&self) -> AppResult<String> {
        let raw = self.source.fetch().await?;
        let records = load_input(&raw)?;
        let views = compose(&records, &self.catalog)?;
        let document = self.adapter.present(&self.layout, &views)?;
        info!(
            records = records.len(),
            "Rendered {} views into {} bytes",
            views.len(),
            document.len()
        );
        Ok(document)
    }
}

async fn load_catalog(path: &Path) -> AppResult<ViewCatalog> {
    let contents = tokio::fs::read_to_string(path).await?;
    let catalog = ViewCatalog::from_yaml_str(&contents)?;
    debug!(path = %path.display(), views = catalog.len(), "Loaded view catalog");
    Ok(catalog)
}

/// Writes the document to `path`, or stdout when `path` is `None`.
///
/// File output is atomic: the document is written to a temporary file in
/// the destination directory and renamed into place.
///
/// # Errors
///
/// Returns I/O errors from writing or persisting the file.
pub async fn write_output(path: Option<&Path>, document: &str) -> AppResult<()> {
    let Some(path) = path else {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(document.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        return Ok(());
    };

    let path: PathBuf = path.to_path_buf();
    let document = document.to_owned();
    tokio::task::spawn_blocking(move || -> AppResult<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(document.as_bytes())?;
        file.persist(&path).map_err(|e| AppError::Io(e.error))?;
        info!(path = %path.display(), "Wrote dashboard document");
        Ok(())
    })
    .await?
}
