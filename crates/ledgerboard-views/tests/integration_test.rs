//! Integration tests for ledgerboard-views crate.
//!
//! These tests drive the full load → aggregate → compose path and check the
//! record-set properties the dashboard relies on.

use ledgerboard_common::test_utils::{
    assert_approx_eq, init_test_logging,
    property_testing::{record_set_strategy, shuffled_weeks_strategy},
    record_fixtures::{fortnight_columns, fortnight_rows},
};
use ledgerboard_common::RecordSet;
use ledgerboard_views::{
    aggregate_by, compose, default_catalog, difference, load, load_value, weekly_totals,
    ChartKind, Transform, ViewCatalog, ViewSpec,
};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_fortnight_dashboard() {
    init_test_logging();

    let records = load(&fortnight_rows()).unwrap();
    assert_eq!(records.len(), 14);

    let views = compose(&records, default_catalog()).unwrap();
    assert_eq!(views.len(), 16);

    let weekly = views.iter().find(|v| v.id == "weekly_revenue").unwrap();
    let series = weekly.series("revenue").unwrap();
    assert_eq!(series.points.len(), 2);
    assert_eq!(series.points[0].x, "1주");
    assert_approx_eq(series.points[0].y, 20_949_653.0, 1e-6);
    assert_approx_eq(series.points[1].y, 19_960_753.0, 1e-6);

    let gap = views.iter().find(|v| v.id == "revenue_cost_gap").unwrap();
    assert_approx_eq(gap.series[0].points[0].y, -99_166.0, 1e-6);

    let histogram = views.iter().find(|v| v.id == "revenue_histogram").unwrap();
    assert_eq!(histogram.chart_kind, ChartKind::Histogram);
    assert_eq!(histogram.series[0].points.len(), 14);
}

#[test]
fn test_column_layout_matches_row_layout() {
    let from_rows = load(&fortnight_rows()).unwrap();
    let from_columns = load_value(&fortnight_columns()).unwrap();
    assert_eq!(from_rows, from_columns);
}

#[test]
fn test_end_to_end_two_days() {
    let rows = vec![
        json!({"date_label": "1일", "revenue": 100, "cost": 80, "week_label": "1주"}),
        json!({"date_label": "2일", "revenue": 50, "cost": 80, "week_label": "1주"}),
    ];
    let records = load(&rows).unwrap();

    let weeks = weekly_totals(&records).unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].week_label, "1주");
    assert_eq!(weeks[0].revenue_sum, 150.0);
    assert_eq!(weeks[0].cost_sum, 160.0);

    let diff = difference(&records, "revenue", "cost").unwrap();
    let values: Vec<_> = diff.iter().map(|p| (p.date_label.as_str(), p.value)).collect();
    assert_eq!(values, vec![("1일", 20.0), ("2일", -30.0)]);
}

#[test]
fn test_yaml_catalog_drives_composer() {
    let catalog = ViewCatalog::from_yaml_str(
        r#"
- id: margin
  title: 마진
  transform: { kind: difference }
  chart_kind: bar
- id: spread
  title: 분포
  transform: { kind: distribution, field: 매입 }
  chart_kind: box
"#,
    )
    .unwrap();

    let records = load(&fortnight_rows()).unwrap();
    let views = compose(&records, &catalog).unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].title, "마진");
    assert_eq!(views[1].series[0].name, "매입");
}

#[test]
fn test_missing_field_aborts_composition() {
    let records = load(&fortnight_rows()).unwrap();
    let catalog = ViewCatalog::new(vec![
        ViewSpec::new("ok", "ok", Transform::identity(["revenue"]), ChartKind::Line),
        ViewSpec::new("bad", "bad", Transform::pairwise("revenue", "refunds"), ChartKind::Scatter),
    ]);
    assert!(compose(&records, &catalog).unwrap_err().is_field_not_found());
}

#[test]
fn test_concurrent_renders_share_records() {
    let records = Arc::new(load(&fortnight_rows()).unwrap());
    let expected = compose(&records, default_catalog()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let records = Arc::clone(&records);
                scope.spawn(move || compose(&records, default_catalog()).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

proptest! {
    #[test]
    fn test_property_one_view_per_spec(records in record_set_strategy(21)) {
        let views = compose(&records, default_catalog()).unwrap();
        prop_assert_eq!(views.len(), default_catalog().len());
    }

    #[test]
    fn test_property_difference_is_elementwise(records in record_set_strategy(21)) {
        let diff = difference(&records, "revenue", "cost").unwrap();
        prop_assert_eq!(diff.len(), records.len());
        for (point, record) in diff.iter().zip(records.iter()) {
            prop_assert_eq!(point.value, record.revenue - record.cost);
            prop_assert_eq!(&point.date_label, &record.date_label);
        }
    }

    #[test]
    fn test_property_aggregation_conserves_mass(records in record_set_strategy(21)) {
        let groups = aggregate_by(&records, "week_label", &["revenue"]).unwrap();
        let grouped: f64 = groups.iter().map(|g| g.sums[0].sum).sum();
        let total: f64 = records.iter().map(|r| r.revenue).sum();
        prop_assert!((grouped - total).abs() <= 1e-6 * total.abs().max(1.0));
    }

    #[test]
    fn test_property_groups_in_first_seen_order(records in shuffled_weeks_strategy(30)) {
        let groups = aggregate_by(&records, "week_label", &["revenue"]).unwrap();
        let mut first_seen: Vec<&str> = Vec::new();
        for record in records.iter() {
            if !first_seen.contains(&record.week_label.as_str()) {
                first_seen.push(&record.week_label);
            }
        }
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        prop_assert_eq!(keys, first_seen);
    }

    #[test]
    fn test_property_recomputation_is_idempotent(records in record_set_strategy(14)) {
        prop_assert_eq!(weekly_totals(&records).unwrap(), weekly_totals(&records).unwrap());
        prop_assert_eq!(
            compose(&records, default_catalog()).unwrap(),
            compose(&records, default_catalog()).unwrap()
        );
    }
}

#[test]
fn test_empty_record_set_is_explicit_error() {
    let empty = RecordSet::default();
    assert!(aggregate_by(&empty, "week_label", &["revenue"]).unwrap_err().is_empty_record_set());
    assert!(difference(&empty, "revenue", "cost").unwrap_err().is_empty_record_set());
}
