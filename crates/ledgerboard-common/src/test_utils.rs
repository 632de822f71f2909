//! Test utilities and shared fixtures for Ledgerboard.
//!
//! Available to other crates through the `testing` feature.

use crate::types::{DailyRecord, RecordSet};
use serde_json::{json, Value};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Record fixtures.
pub mod record_fixtures {
    use super::*;

    /// The two-day example: revenue 100/50, cost 80/80, both in week "1주".
    pub fn two_day_records() -> RecordSet {
        RecordSet::new(vec![
            DailyRecord::new("1일", 100.0, 80.0, "1주"),
            DailyRecord::new("2일", 50.0, 80.0, "1주"),
        ])
    }

    /// Records whose week labels first appear out of lexical order.
    pub fn out_of_order_weeks() -> RecordSet {
        RecordSet::new(vec![
            DailyRecord::new("1일", 10.0, 4.0, "2주"),
            DailyRecord::new("2일", 20.0, 8.0, "1주"),
            DailyRecord::new("3일", 30.0, 16.0, "2주"),
        ])
    }

    /// A fortnight of sheet rows keyed by the Korean headers.
    pub fn fortnight_rows() -> Vec<Value> {
        let revenue = [
            2_280_834, 3_421_424, 1_944_679, 2_198_679, 2_278_834, 4_525_524, 4_299_679,
            3_418_679, 3_763_679, 1_876_679, 2_947_679, 2_412_679, 1_726_679, 3_814_679,
        ];
        let cost = [
            2_380_000, 4_210_000, 2_220_000, 2_660_000, 2_380_000, 4_850_000, 4_490_000,
            3_440_000, 4_590_000, 2_050_000, 2_930_000, 2_360_000, 1_710_000, 3_500_000,
        ];
        revenue
            .iter()
            .zip(cost.iter())
            .enumerate()
            .map(|(i, (revenue, cost))| {
                let week = if i < 7 { "1주" } else { "2주" };
                json!({
                    "일": format!("{}일", i + 1),
                    "매출": revenue,
                    "매입": cost,
                    "주": week,
                })
            })
            .collect()
    }

    /// The same fortnight in column-oriented layout.
    pub fn fortnight_columns() -> Value {
        let rows = fortnight_rows();
        let column = |key: &str| -> Value { rows.iter().map(|row| row[key].clone()).collect() };
        json!({
            "일": column("일"),
            "매출": column("매출"),
            "매입": column("매입"),
            "주": column("주"),
        })
    }
}

/// Property-based testing utilities using proptest.
#[cfg(any(test, feature = "proptest"))]
pub mod property_testing {
    use crate::types::{DailyRecord, RecordSet};
    use proptest::prelude::*;

    /// Strategy for non-empty record sets with unique date labels and
    /// contiguous week runs of seven days.
    pub fn record_set_strategy(max_days: usize) -> impl Strategy<Value = RecordSet> {
        prop::collection::vec((-1.0e7f64..1.0e7, -1.0e7f64..1.0e7), 1..=max_days).prop_map(
            |amounts| {
                amounts
                    .into_iter()
                    .enumerate()
                    .map(|(i, (revenue, cost))| {
                        DailyRecord::new(
                            format!("{}일", i + 1),
                            revenue,
                            cost,
                            format!("{}주", i / 7 + 1),
                        )
                    })
                    .collect::<RecordSet>()
            },
        )
    }

    /// Strategy for record sets whose week labels arrive in arbitrary order.
    pub fn shuffled_weeks_strategy(max_days: usize) -> impl Strategy<Value = RecordSet> {
        prop::collection::vec((0u8..5, 0.0f64..1.0e6), 1..=max_days).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (week, revenue))| {
                    DailyRecord::new(format!("{}일", i + 1), revenue, 0.0, format!("{week}주"))
                })
                .collect::<RecordSet>()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        // Should not panic when called multiple times
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_fortnight_fixtures_agree() {
        let rows = record_fixtures::fortnight_rows();
        let columns = record_fixtures::fortnight_columns();
        assert_eq!(rows.len(), 14);
        assert_eq!(columns["매출"].as_array().unwrap().len(), 14);
        assert_eq!(rows[7]["주"], "2주");
        assert_eq!(columns["일"][13], "14일");
    }

    proptest! {
        #[test]
        fn test_property_date_labels_unique(set in property_testing::record_set_strategy(21)) {
            let mut labels: Vec<_> = set.iter().map(|r| r.date_label.clone()).collect();
            labels.sort();
            labels.dedup();
            prop_assert_eq!(labels.len(), set.len());
        }
    }
}
