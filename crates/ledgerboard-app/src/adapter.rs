//! Presentation adapters consume finished views and lay them out.
//!
//! The core hands over `RenderableView`s and never looks at what happens
//! next. The JSON adapter here places cards on a row-major grid and emits a
//! document for whatever front end draws the charts.

use crate::error::AppResult;
use chrono::{DateTime, Utc};
use ledgerboard_config::DashboardConfig;
use ledgerboard_views::RenderableView;
use serde::Serialize;

/// Page-level settings an adapter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Page heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: Option<String>,
    /// Text below the grid.
    pub footer: Option<String>,
    /// Cards per row, at least one.
    pub columns: usize,
}

impl From<&DashboardConfig> for Layout {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            footer: config.footer.clone(),
            columns: usize::try_from(config.columns).unwrap_or(1).max(1),
        }
    }
}

/// Turns composed views into a presentable document.
pub trait PresentationAdapter: Send + Sync {
    /// Renders `views` in order onto `layout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be produced.
    fn present(&self, layout: &Layout, views: &[RenderableView]) -> AppResult<String>;
}

/// One view placed on the grid.
#[derive(Debug, Serialize)]
pub struct Card<'a> {
    /// Zero-based grid row.
    pub row: usize,
    /// Zero-based grid column.
    pub column: usize,
    /// The view shown in this cell.
    #[serde(flatten)]
    pub view: &'a RenderableView,
}

/// The complete dashboard as handed to a front end.
#[derive(Debug, Serialize)]
pub struct DashboardDocument<'a> {
    /// Page heading.
    pub title: &'a str,
    /// Line under the heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'a str>,
    /// Text below the grid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<&'a str>,
    /// Cards per row.
    pub columns: usize,
    /// When the document was built.
    pub generated_at: DateTime<Utc>,
    /// Views in grid order.
    pub cards: Vec<Card<'a>>,
}

impl<'a> DashboardDocument<'a> {
    /// Lays `views` out row-major: card `i` lands at `(i / columns, i % columns)`.
    #[must_use]
    pub fn build(layout: &'a Layout, views: &'a [RenderableView]) -> Self {
        let columns = layout.columns.max(1);
        Self {
            title: &layout.title,
            subtitle: layout.subtitle.as_deref(),
            footer: layout.footer.as_deref(),
            columns,
            generated_at: Utc::now(),
            cards: views
                .iter()
                .enumerate()
                .map(|(i, view)| Card {
                    row: i / columns,
                    column: i % columns,
                    view,
                })
                .collect(),
        }
    }
}

/// Emits the dashboard as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAdapter {
    pretty: bool,
}

impl JsonAdapter {
    /// Creates an adapter; `pretty` indents the output.
    #[must_use]
    pub const fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl PresentationAdapter for JsonAdapter {
    fn present(&self, layout: &Layout, views: &[RenderableView]) -> AppResult<String> {
        let document = DashboardDocument::build(layout, views);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(rendered)
    }
}
