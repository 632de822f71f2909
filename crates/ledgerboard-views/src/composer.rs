//! Composer: evaluates a [`ViewCatalog`] against a [`RecordSet`].
//!
//! The composer holds no state between calls. Within a single call, a
//! transform shared by several views is resolved once and each view gets its
//! own copy of the resulting series.

use crate::aggregator::{aggregate_by, difference};
use crate::catalog::{ChartKind, Transform, ViewCatalog};
use ledgerboard_common::{LedgerError, RecordSet, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};

/// One (x, y) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Day label or group key.
    pub x: String,
    /// Value at `x`.
    pub y: f64,
}

/// A named, ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Field name, or `minuend-subtrahend` for differences.
    pub name: String,
    /// Points in record or first-seen group order.
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// The y values in order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

/// A fully computed panel, ready for a presentation adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderableView {
    /// Id of the view spec this was built from.
    pub id: String,
    /// Panel title.
    pub title: String,
    /// Requested visual encoding.
    pub chart_kind: ChartKind,
    /// Series in declaration order of the transform's fields.
    pub series: Vec<Series>,
    /// Copied verbatim from the view spec.
    pub style_hints: Value,
}

impl RenderableView {
    /// Looks up a series by name.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Builds one [`RenderableView`] per catalog entry, in catalog order.
///
/// The pass stops at the first failing view; no partial output is returned.
///
/// # Errors
///
/// - [`LedgerError::EmptyRecordSet`] when `records` is empty and the catalog is not
/// - [`LedgerError::FieldNotFound`] when a view references a field the records lack
/// - [`LedgerError::Config`] when a view's field list is unusable
#[instrument(skip_all, fields(records = records.len(), views = catalog.len()))]
pub fn compose(records: &RecordSet, catalog: &ViewCatalog) -> Result<Vec<RenderableView>> {
    if catalog.is_empty() {
        return Ok(Vec::new());
    }
    if records.is_empty() {
        return Err(LedgerError::empty("compose"));
    }

    let mut derived: HashMap<&Transform, Vec<Series>> = HashMap::new();
    let mut views = Vec::with_capacity(catalog.len());

    for spec in catalog {
        let series = match derived.entry(&spec.transform) {
            Entry::Occupied(cached) => {
                debug!(view = %spec.id, "Reusing series for shared {} transform", spec.transform.name());
                cached.get().clone()
            }
            Entry::Vacant(slot) => {
                let resolved = resolve(records, &spec.transform).map_err(|e| {
                    error!(view = %spec.id, error = %e, "View failed to compose");
                    e
                })?;
                slot.insert(resolved).clone()
            }
        };

        debug!(view = %spec.id, chart_kind = %spec.chart_kind, series = series.len(), "Composed view");
        views.push(RenderableView {
            id: spec.id.clone(),
            title: spec.title.clone(),
            chart_kind: spec.chart_kind,
            series,
            style_hints: spec.style_hints.clone(),
        });
    }

    info!(
        "Composed {} views ({} distinct transforms)",
        views.len(),
        derived.len()
    );
    Ok(views)
}

fn resolve(records: &RecordSet, transform: &Transform) -> Result<Vec<Series>> {
    match transform {
        Transform::Identity { fields } => {
            if fields.is_empty() {
                return Err(LedgerError::config("identity transform needs at least one field"));
            }
            fields.iter().map(|field| by_day(records, field)).collect()
        }
        Transform::Pairwise { fields } => {
            if fields.len() < 2 {
                return Err(LedgerError::config("pairwise transform needs at least two fields"));
            }
            fields.iter().map(|field| by_day(records, field)).collect()
        }
        Transform::WeeklyAggregateBy { field, group_by } => {
            let groups = aggregate_by(records, group_by, &[field.as_str()])?;
            let points = groups
                .into_iter()
                .map(|group| SeriesPoint {
                    y: group.sums.first().map_or(0.0, |s| s.sum),
                    x: group.key,
                })
                .collect();
            Ok(vec![Series {
                name: field.clone(),
                points,
            }])
        }
        Transform::Difference {
            minuend,
            subtrahend,
        } => {
            let points = difference(records, minuend, subtrahend)?
                .into_iter()
                .map(|p| SeriesPoint {
                    x: p.date_label,
                    y: p.value,
                })
                .collect();
            Ok(vec![Series {
                name: format!("{minuend}-{subtrahend}"),
                points,
            }])
        }
        Transform::Distribution { field } => Ok(vec![by_day(records, field)?]),
    }
}

fn by_day(records: &RecordSet, field: &str) -> Result<Series> {
    let values = records.column(field)?;
    let points = records
        .iter()
        .zip(values)
        .map(|(record, y)| SeriesPoint {
            x: record.date_label.clone(),
            y,
        })
        .collect();
    Ok(Series {
        name: field.to_string(),
        points,
    })
}
