//! Declarative view catalog.
//!
//! A catalog is plain data: an ordered list of [`ViewSpec`]s, each naming a
//! transform over the record set and the chart kind that will present it.
//! Declaration order is grid order, left-to-right then top-to-bottom.

use ledgerboard_common::fields::{COST, REVENUE, WEEK_LABEL};
use ledgerboard_common::{LedgerError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Visual encoding requested for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Filled area under a line.
    Area,
    /// One bar per x value.
    Bar,
    /// Bars of several series side by side.
    GroupedBar,
    /// Line per series.
    Line,
    /// Unconnected markers.
    Scatter,
    /// Binned counts of raw values.
    Histogram,
    /// Box plot of raw values.
    Box,
    /// Colour-scaled grid.
    Heatmap,
}

impl ChartKind {
    /// Stable snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Bar => "bar",
            Self::GroupedBar => "grouped_bar",
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Histogram => "histogram",
            Self::Box => "box",
            Self::Heatmap => "heatmap",
        }
    }

    /// Whether this kind summarises a raw value distribution.
    #[must_use]
    pub const fn expects_distribution(self) -> bool {
        matches!(self, Self::Histogram | Self::Box)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_group_by() -> String {
    WEEK_LABEL.to_string()
}

fn default_minuend() -> String {
    REVENUE.to_string()
}

fn default_subtrahend() -> String {
    COST.to_string()
}

/// Transformation a view applies to the record set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    /// One series per named field, by day.
    Identity {
        /// Fields to plot, in series order.
        fields: Vec<String>,
    },
    /// One series per field on a shared day axis, for "A vs B" views.
    Pairwise {
        /// Fields to compare, at least two.
        fields: Vec<String>,
    },
    /// One field summed per group (week by default).
    WeeklyAggregateBy {
        /// Numeric field to sum.
        field: String,
        /// Label field to group on.
        #[serde(default = "default_group_by")]
        group_by: String,
    },
    /// Day-by-day `minuend - subtrahend`.
    Difference {
        /// Field subtracted from.
        #[serde(default = "default_minuend")]
        minuend: String,
        /// Field subtracted.
        #[serde(default = "default_subtrahend")]
        subtrahend: String,
    },
    /// Raw values of one field; binning is left to the presentation layer.
    Distribution {
        /// Field whose values are distributed.
        field: String,
    },
}

impl Transform {
    /// Plots `fields` as they are.
    pub fn identity<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Identity {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Compares `left` against `right`.
    pub fn pairwise(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::Pairwise {
            fields: vec![left.into(), right.into()],
        }
    }

    /// Sums `field` per week label.
    pub fn weekly(field: impl Into<String>) -> Self {
        Self::WeeklyAggregateBy {
            field: field.into(),
            group_by: default_group_by(),
        }
    }

    /// Revenue minus cost.
    #[must_use]
    pub fn difference() -> Self {
        Self::Difference {
            minuend: default_minuend(),
            subtrahend: default_subtrahend(),
        }
    }

    /// Raw values of `field`.
    pub fn distribution(field: impl Into<String>) -> Self {
        Self::Distribution {
            field: field.into(),
        }
    }

    /// Short name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Identity { .. } => "identity",
            Self::Pairwise { .. } => "pairwise",
            Self::WeeklyAggregateBy { .. } => "weekly_aggregate_by",
            Self::Difference { .. } => "difference",
            Self::Distribution { .. } => "distribution",
        }
    }

    /// Every field name this transform reads.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::Identity { fields } | Self::Pairwise { fields } => {
                fields.iter().map(String::as_str).collect()
            }
            Self::WeeklyAggregateBy { field, group_by } => vec![field.as_str(), group_by.as_str()],
            Self::Difference {
                minuend,
                subtrahend,
            } => vec![minuend.as_str(), subtrahend.as_str()],
            Self::Distribution { field } => vec![field.as_str()],
        }
    }
}

/// Declarative description of one dashboard panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// Stable identifier, unique within a catalog.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Data transformation.
    pub transform: Transform,
    /// Visual encoding.
    pub chart_kind: ChartKind,
    /// Presentation settings passed through untouched.
    #[serde(default)]
    pub style_hints: Value,
}

impl ViewSpec {
    /// Creates a view with no style hints.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        transform: Transform,
        chart_kind: ChartKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            transform,
            chart_kind,
            style_hints: Value::Null,
        }
    }

    /// Attaches opaque style hints.
    #[must_use]
    pub fn with_style(mut self, style_hints: Value) -> Self {
        self.style_hints = style_hints;
        self
    }
}

/// Ordered, immutable list of views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewCatalog {
    views: Vec<ViewSpec>,
}

impl ViewCatalog {
    /// Wraps views in declaration order. Call [`ViewCatalog::validate`] before use
    /// when the views come from outside the program.
    #[must_use]
    pub const fn new(views: Vec<ViewSpec>) -> Self {
        Self { views }
    }

    /// Parses and validates a YAML list of views.
    ///
    /// # Errors
    ///
    /// Returns a YAML error for malformed documents or a configuration error
    /// from [`ViewCatalog::validate`].
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses and validates a JSON array of views.
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed documents or a
    /// configuration error from [`ViewCatalog::validate`].
    pub fn from_json_str(source: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Number of views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the catalog declares no views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Iterates views in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ViewSpec> {
        self.views.iter()
    }

    /// Looks up a view by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ViewSpec> {
        self.views.iter().find(|view| view.id == id)
    }

    /// Checks structural rules that do not depend on the data.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Config`] for an empty or duplicate id, an empty
    /// title, an empty field name, or a pairwise view with fewer than two fields.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.views.len());
        for view in &self.views {
            if view.id.trim().is_empty() {
                return Err(LedgerError::config("view id cannot be empty"));
            }
            if !ids.insert(view.id.as_str()) {
                return Err(LedgerError::config(format!("duplicate view id '{}'", view.id)));
            }
            if view.title.trim().is_empty() {
                return Err(LedgerError::config(format!("view '{}' has no title", view.id)));
            }
            let fields = view.transform.fields();
            if fields.is_empty() || fields.iter().any(|f| f.trim().is_empty()) {
                return Err(LedgerError::config(format!(
                    "view '{}' has an empty field list or field name",
                    view.id
                )));
            }
            if let Transform::Pairwise { fields } = &view.transform {
                if fields.len() < 2 {
                    return Err(LedgerError::config(format!(
                        "pairwise view '{}' needs at least two fields",
                        view.id
                    )));
                }
            }
            if view.chart_kind.expects_distribution()
                && !matches!(view.transform, Transform::Distribution { .. })
            {
                warn!(
                    view = %view.id,
                    chart_kind = %view.chart_kind,
                    transform = view.transform.name(),
                    "Distribution chart fed by a non-distribution transform"
                );
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ViewCatalog {
    type Item = &'a ViewSpec;
    type IntoIter = std::slice::Iter<'a, ViewSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.iter()
    }
}

static DEFAULT_CATALOG: Lazy<ViewCatalog> = Lazy::new(build_default_catalog);

/// The sixteen-panel revenue/cost dashboard, defined once per process.
#[must_use]
pub fn default_catalog() -> &'static ViewCatalog {
    &DEFAULT_CATALOG
}

fn build_default_catalog() -> ViewCatalog {
    use ChartKind::{Area, Bar, GroupedBar, Heatmap, Histogram, Line, Scatter};

    let gap = Transform::difference();

    ViewCatalog::new(vec![
        ViewSpec::new("revenue_area", "매출", Transform::identity([REVENUE]), Area)
            .with_style(json!({"colors": ["#E74C3C"]})),
        ViewSpec::new("cost_bar", "매입", Transform::identity([COST]), Bar)
            .with_style(json!({"colors": ["#3498DB"]})),
        ViewSpec::new(
            "revenue_vs_cost",
            "매출 vs 매입",
            Transform::pairwise(REVENUE, COST),
            GroupedBar,
        )
        .with_style(json!({"colors": ["#2ECC71", "#F1C40F"], "show_legend": true})),
        ViewSpec::new("weekly_revenue", "주별 매출", Transform::weekly(REVENUE), Bar)
            .with_style(json!({"palette": "Set3", "color_by": "group"})),
        ViewSpec::new(
            "revenue_cost_trend",
            "매출 & 매입 추세",
            Transform::identity([REVENUE, COST]),
            Line,
        )
        .with_style(json!({"colors": ["#9B59B6", "#1ABC9C"], "markers": true, "show_legend": true})),
        ViewSpec::new("revenue_cost_gap", "매출 vs 매입 차이", gap.clone(), Line)
            .with_style(json!({"colors": ["#E67E22"], "markers": true})),
        ViewSpec::new("weekly_cost", "주별 매입", Transform::weekly(COST), Bar)
            .with_style(json!({"palette": "Set3", "color_by": "group"})),
        ViewSpec::new(
            "revenue_cost_scatter",
            "매출 & 매입 분포",
            Transform::pairwise(REVENUE, COST),
            Scatter,
        )
        .with_style(json!({"size_by": REVENUE, "color_by": "x", "show_legend": true})),
        ViewSpec::new("monthly_gap", "월별 차이", gap, Line)
            .with_style(json!({"colors": ["#BDC3C7"], "markers": true})),
        ViewSpec::new(
            "trend_area",
            "트렌드 분석",
            Transform::identity([REVENUE, COST]),
            Area,
        )
        .with_style(json!({"colors": ["#7F8C8D", "#D35400"], "show_legend": true})),
        ViewSpec::new(
            "revenue_histogram",
            "평균 매출",
            Transform::distribution(REVENUE),
            Histogram,
        )
        .with_style(json!({"colors": ["#C0392B"], "bins": 10})),
        ViewSpec::new(
            "cost_histogram",
            "평균 매입",
            Transform::distribution(COST),
            Histogram,
        )
        .with_style(json!({"colors": ["#8E44AD"], "bins": 10})),
        ViewSpec::new(
            "revenue_box",
            "매출 분포",
            Transform::distribution(REVENUE),
            ChartKind::Box,
        )
        .with_style(json!({"colors": ["#16A085"]})),
        ViewSpec::new(
            "cost_box",
            "매입 분포",
            Transform::distribution(COST),
            ChartKind::Box,
        )
        .with_style(json!({"colors": ["#E74C3C"]})),
        ViewSpec::new(
            "revenue_heatmap",
            "매출 히트맵",
            Transform::identity([REVENUE]),
            Heatmap,
        )
        .with_style(json!({"color_scale": "Viridis"})),
        ViewSpec::new(
            "cost_heatmap",
            "매입 히트맵",
            Transform::identity([COST]),
            Heatmap,
        )
        .with_style(json!({"color_scale": "Cividis"})),
    ])
}
