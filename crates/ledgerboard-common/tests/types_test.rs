//! Tests for the shared record model and error type.

use ledgerboard_common::{canonical_field, fields, DailyRecord, LedgerError, RecordSet};
use std::sync::Arc;

#[test]
fn test_canonical_field_aliases() {
    assert_eq!(canonical_field("일"), fields::DATE_LABEL);
    assert_eq!(canonical_field("매출"), fields::REVENUE);
    assert_eq!(canonical_field("매입"), fields::COST);
    assert_eq!(canonical_field("주"), fields::WEEK_LABEL);
    assert_eq!(canonical_field("visits"), "visits");
}

#[test]
fn test_record_set_preserves_insertion_order() {
    let set: RecordSet = vec![
        DailyRecord::new("3일", 1.0, 1.0, "1주"),
        DailyRecord::new("1일", 2.0, 2.0, "1주"),
        DailyRecord::new("2일", 3.0, 3.0, "1주"),
    ]
    .into();

    let labels: Vec<_> = set.iter().map(|r| r.date_label.as_str()).collect();
    assert_eq!(labels, vec!["3일", "1일", "2일"]);
    assert_eq!(set.get(1).map(|r| r.revenue), Some(2.0));
    assert!(set.get(3).is_none());
}

#[test]
fn test_record_deserializes_without_extra() {
    let record: DailyRecord = serde_json::from_str(
        r#"{"date_label":"1일","revenue":100,"cost":80,"week_label":"1주"}"#,
    )
    .unwrap();
    assert_eq!(record, DailyRecord::new("1일", 100.0, 80.0, "1주"));
}

#[test]
fn test_record_set_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RecordSet>();
    assert_send_sync::<LedgerError>();

    let set = Arc::new(RecordSet::new(vec![DailyRecord::new("1일", 5.0, 3.0, "1주")]));
    let handles: Vec<_> = (0..3)
        .map(|_| {
            let set = Arc::clone(&set);
            std::thread::spawn(move || set.column("revenue").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec![5.0]);
    }
}

#[test]
fn test_yaml_errors_convert() {
    let err: LedgerError = serde_yaml::from_str::<DailyRecord>("[").unwrap_err().into();
    assert!(matches!(err, LedgerError::Yaml(_)));
}
