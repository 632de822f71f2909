//! Week-level sums and day-level difference series over a [`RecordSet`].
//!
//! Both operations are pure and recompute from the record set on every call.

use ledgerboard_common::fields::{COST, REVENUE, WEEK_LABEL};
use ledgerboard_common::{canonical_field, LedgerError, RecordSet, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Running sum of one field within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSum {
    /// Field name as requested.
    pub field: String,
    /// Sum over every record in the group.
    pub sum: f64,
}

/// Sums for one distinct group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAggregate {
    /// Group key, e.g. "1주".
    pub key: String,
    /// One entry per requested sum field, in request order.
    pub sums: Vec<FieldSum>,
}

impl GroupAggregate {
    fn new(key: &str, sum_fields: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            sums: sum_fields
                .iter()
                .map(|field| FieldSum {
                    field: (*field).to_string(),
                    sum: 0.0,
                })
                .collect(),
        }
    }

    /// Sum for `field`, accepting aliased names.
    #[must_use]
    pub fn sum(&self, field: &str) -> Option<f64> {
        let wanted = canonical_field(field);
        self.sums
            .iter()
            .find(|s| canonical_field(&s.field) == wanted)
            .map(|s| s.sum)
    }
}

/// Revenue and cost totals for one week label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    /// Week label, as first seen in the record set.
    pub week_label: String,
    /// Sum of revenue over the week.
    pub revenue_sum: f64,
    /// Sum of cost over the week.
    pub cost_sum: f64,
}

/// One day's difference between two fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferencePoint {
    /// Day the value belongs to.
    pub date_label: String,
    /// `minuend - subtrahend` for that day.
    pub value: f64,
}

/// Difference values aligned index-for-index with the record set.
pub type DifferenceSeries = Vec<DifferencePoint>;

/// Groups records by a label field and sums the requested numeric fields.
///
/// Groups come out in the order their key first appears in `records`, not
/// sorted: week labels such as "10주" do not order correctly as strings.
///
/// # Errors
///
/// - [`LedgerError::EmptyRecordSet`] when `records` is empty
/// - [`LedgerError::FieldNotFound`] when `group_field` is not a label field or
///   a sum field is absent from any record
#[instrument(skip(records), fields(records = records.len()))]
pub fn aggregate_by(
    records: &RecordSet,
    group_field: &str,
    sum_fields: &[&str],
) -> Result<Vec<GroupAggregate>> {
    if records.is_empty() {
        return Err(LedgerError::empty("aggregate_by"));
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupAggregate> = Vec::new();

    for record in records {
        let key = record
            .label(group_field)
            .ok_or_else(|| LedgerError::field_not_found(group_field, "not a label field"))?;

        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(GroupAggregate::new(key, sum_fields));
            groups.len() - 1
        });

        for (total, field) in groups[slot].sums.iter_mut().zip(sum_fields) {
            total.sum += record.numeric(field).ok_or_else(|| {
                LedgerError::field_not_found(*field, format!("record '{}'", record.date_label))
            })?;
        }
    }

    debug!("Aggregated {} records into {} groups", records.len(), groups.len());
    Ok(groups)
}

/// Revenue and cost totals per week label, in first-seen order.
///
/// # Errors
///
/// Returns [`LedgerError::EmptyRecordSet`] when `records` is empty.
pub fn weekly_totals(records: &RecordSet) -> Result<Vec<WeeklyAggregate>> {
    Ok(aggregate_by(records, WEEK_LABEL, &[REVENUE, COST])?
        .into_iter()
        .map(|group| WeeklyAggregate {
            revenue_sum: group.sum(REVENUE).unwrap_or_default(),
            cost_sum: group.sum(COST).unwrap_or_default(),
            week_label: group.key,
        })
        .collect())
}

/// Elementwise `minuend - subtrahend` for every record.
///
/// A missing value is an error, never read as zero, and no gaps are filled.
///
/// # Errors
///
/// - [`LedgerError::EmptyRecordSet`] when `records` is empty
/// - [`LedgerError::FieldNotFound`] when either field is absent from a record
#[instrument(skip(records), fields(records = records.len()))]
pub fn difference(records: &RecordSet, minuend: &str, subtrahend: &str) -> Result<DifferenceSeries> {
    if records.is_empty() {
        return Err(LedgerError::empty("difference"));
    }

    records
        .iter()
        .map(|record| -> Result<DifferencePoint> {
            let lookup = |field: &str| {
                record.numeric(field).ok_or_else(|| {
                    LedgerError::field_not_found(field, format!("record '{}'", record.date_label))
                })
            };
            Ok(DifferencePoint {
                date_label: record.date_label.clone(),
                value: lookup(minuend)? - lookup(subtrahend)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerboard_common::test_utils::record_fixtures::{out_of_order_weeks, two_day_records};
    use ledgerboard_common::DailyRecord;

    #[test]
    fn test_two_day_weekly_totals() {
        let weeks = aggregate_by(&two_day_records(), "week_label", &["revenue", "cost"]).unwrap();
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].key, "1주");
        assert_eq!(weeks[0].sum("revenue"), Some(150.0));
        assert_eq!(weeks[0].sum("cost"), Some(160.0));

        let typed = weekly_totals(&two_day_records()).unwrap();
        assert_eq!(
            typed,
            vec![WeeklyAggregate {
                week_label: "1주".to_string(),
                revenue_sum: 150.0,
                cost_sum: 160.0,
            }]
        );
    }

    #[test]
    fn test_two_day_difference() {
        let diff = difference(&two_day_records(), "revenue", "cost").unwrap();
        assert_eq!(
            diff,
            vec![
                DifferencePoint {
                    date_label: "1일".to_string(),
                    value: 20.0,
                },
                DifferencePoint {
                    date_label: "2일".to_string(),
                    value: -30.0,
                },
            ]
        );
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let weeks = weekly_totals(&out_of_order_weeks()).unwrap();
        let labels: Vec<_> = weeks.iter().map(|w| w.week_label.as_str()).collect();
        assert_eq!(labels, vec!["2주", "1주"]);
        assert_eq!(weeks[0].revenue_sum, 40.0);
    }

    #[test]
    fn test_korean_field_names_aggregate() {
        let weeks = aggregate_by(&two_day_records(), "주", &["매출"]).unwrap();
        assert_eq!(weeks[0].sum("revenue"), Some(150.0));
        assert_eq!(weeks[0].sums[0].field, "매출");
    }

    #[test]
    fn test_empty_record_set_errors() {
        let empty = RecordSet::default();
        assert!(aggregate_by(&empty, "week_label", &["revenue"])
            .unwrap_err()
            .is_empty_record_set());
        assert!(difference(&empty, "revenue", "cost")
            .unwrap_err()
            .is_empty_record_set());
    }

    #[test]
    fn test_numeric_group_field_is_rejected() {
        let err = aggregate_by(&two_day_records(), "revenue", &["cost"]).unwrap_err();
        assert!(err.is_field_not_found());
    }

    #[test]
    fn test_missing_extra_field_is_not_zero() {
        let set = RecordSet::new(vec![
            DailyRecord::new("1일", 1.0, 1.0, "1주").with_extra("refunds", 3.0),
            DailyRecord::new("2일", 1.0, 1.0, "1주"),
        ]);
        assert!(difference(&set, "revenue", "refunds")
            .unwrap_err()
            .is_field_not_found());
        assert!(aggregate_by(&set, "week_label", &["refunds"])
            .unwrap_err()
            .is_field_not_found());
    }

    #[test]
    fn test_nan_passes_through() {
        let set = RecordSet::new(vec![DailyRecord::new("1일", f64::NAN, 1.0, "1주")]);
        let diff = difference(&set, "revenue", "cost").unwrap();
        assert!(diff[0].value.is_nan());
    }
}
