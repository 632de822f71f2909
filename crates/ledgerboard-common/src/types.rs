//! Daily record model shared by the loader, aggregator, and composer.

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in field names.
pub mod fields {
    /// Day label, e.g. "1일".
    pub const DATE_LABEL: &str = "date_label";
    /// Revenue (매출) amount.
    pub const REVENUE: &str = "revenue";
    /// Cost (매입) amount.
    pub const COST: &str = "cost";
    /// Week label, e.g. "1주".
    pub const WEEK_LABEL: &str = "week_label";
}

/// Resolves a field name to its canonical form.
///
/// The Korean sheet headers (`일`, `매출`, `매입`, `주`) are accepted as
/// aliases for the built-in fields; every other name is returned unchanged.
#[must_use]
pub fn canonical_field(name: &str) -> &str {
    match name {
        "일" => fields::DATE_LABEL,
        "매출" => fields::REVENUE,
        "매입" => fields::COST,
        "주" => fields::WEEK_LABEL,
        other => other,
    }
}

/// One day's revenue, cost, and week label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Day label; unique within a record set.
    pub date_label: String,
    /// Revenue amount. Not validated: negative and NaN values pass through.
    pub revenue: f64,
    /// Cost amount. Not validated either.
    pub cost: f64,
    /// Week label grouping a run of days.
    pub week_label: String,
    /// Additional numeric columns carried by the input row.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

impl DailyRecord {
    /// Creates a record with no extra columns.
    pub fn new(
        date_label: impl Into<String>,
        revenue: f64,
        cost: f64,
        week_label: impl Into<String>,
    ) -> Self {
        Self {
            date_label: date_label.into(),
            revenue,
            cost,
            week_label: week_label.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds an extra numeric column.
    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: f64) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Looks up a numeric field by (possibly aliased) name.
    #[must_use]
    pub fn numeric(&self, field: &str) -> Option<f64> {
        match canonical_field(field) {
            fields::REVENUE => Some(self.revenue),
            fields::COST => Some(self.cost),
            other => self.extra.get(other).copied(),
        }
    }

    /// Looks up a label field by (possibly aliased) name.
    #[must_use]
    pub fn label(&self, field: &str) -> Option<&str> {
        match canonical_field(field) {
            fields::DATE_LABEL => Some(&self.date_label),
            fields::WEEK_LABEL => Some(&self.week_label),
            _ => None,
        }
    }
}

/// Ordered, immutable sequence of daily records.
///
/// Insertion order is chronological order and is what every "by day" view
/// uses as its x axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<DailyRecord>,
}

impl RecordSet {
    /// Wraps records in the given order.
    #[must_use]
    pub const fn new(records: Vec<DailyRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DailyRecord> {
        self.records.iter()
    }

    /// Borrows the underlying records.
    #[must_use]
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DailyRecord> {
        self.records.get(index)
    }

    /// Extracts a numeric column.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::FieldNotFound`] naming the first record that lacks
    /// the field. A missing value is never read as zero.
    pub fn column(&self, field: &str) -> Result<Vec<f64>> {
        self.records
            .iter()
            .map(|record| {
                record.numeric(field).ok_or_else(|| {
                    LedgerError::field_not_found(field, format!("record '{}'", record.date_label))
                })
            })
            .collect()
    }

    /// Extracts a label column (`date_label` or `week_label`).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::FieldNotFound`] when `field` is not a label field.
    pub fn labels(&self, field: &str) -> Result<Vec<&str>> {
        if !matches!(
            canonical_field(field),
            fields::DATE_LABEL | fields::WEEK_LABEL
        ) {
            return Err(LedgerError::field_not_found(field, "not a label field"));
        }
        Ok(self
            .records
            .iter()
            .filter_map(|record| record.label(field))
            .collect())
    }
}

impl From<Vec<DailyRecord>> for RecordSet {
    fn from(records: Vec<DailyRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<DailyRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = DailyRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a DailyRecord;
    type IntoIter = std::slice::Iter<'a, DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::new(vec![
            DailyRecord::new("1일", 100.0, 80.0, "1주").with_extra("visits", 12.0),
            DailyRecord::new("2일", 50.0, 80.0, "1주"),
        ])
    }

    #[test]
    fn test_korean_aliases_resolve() {
        let record = DailyRecord::new("1일", 100.0, 80.0, "1주");
        assert_eq!(record.numeric("매출"), Some(100.0));
        assert_eq!(record.numeric("매입"), Some(80.0));
        assert_eq!(record.label("일"), Some("1일"));
        assert_eq!(record.label("주"), Some("1주"));
        assert_eq!(record.numeric("date_label"), None);
    }

    #[test]
    fn test_column_reports_first_missing_record() {
        let set = sample();
        assert_eq!(set.column("revenue").unwrap(), vec![100.0, 50.0]);

        let err = set.column("visits").unwrap_err();
        match err {
            LedgerError::FieldNotFound { field, context } => {
                assert_eq!(field, "visits");
                assert_eq!(context, "record '2일'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_labels_rejects_numeric_field() {
        let set = sample();
        assert_eq!(set.labels("week_label").unwrap(), vec!["1주", "1주"]);
        assert!(set.labels("revenue").unwrap_err().is_field_not_found());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["extra"]["visits"], 12.0);
        assert!(json[1].get("extra").is_none());
    }
}
