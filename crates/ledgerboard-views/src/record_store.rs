//! Record store: builds a [`RecordSet`] from raw input rows.
//!
//! Rows arrive as JSON or YAML from whichever source owns the data. The
//! store checks that the four required fields are present and typed, keeps
//! the rows in the order given, and performs no deduplication or sorting.

use ledgerboard_common::fields::{COST, DATE_LABEL, REVENUE, WEEK_LABEL};
use ledgerboard_common::{canonical_field, DailyRecord, LedgerError, RecordSet, Result};
use serde_json::{Map, Value};
use serde_yaml::{Mapping, Value as YamlValue};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, instrument, warn};

/// Raw input as parsed by a record source.
///
/// YAML input keeps non-finite amounts such as `.nan`, which a JSON value
/// cannot hold, so it is loaded without going through JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Parsed JSON document.
    Json(Value),
    /// Parsed YAML document.
    Yaml(YamlValue),
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<YamlValue> for RawInput {
    fn from(value: YamlValue) -> Self {
        Self::Yaml(value)
    }
}

/// One cell of a raw row.
trait RawCell {
    fn amount(&self) -> Option<f64>;
    fn label(&self) -> Option<String>;
    fn render(&self) -> String;
}

impl RawCell for Value {
    fn amount(&self) -> Option<f64> {
        self.as_f64()
    }

    fn label(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl RawCell for YamlValue {
    fn amount(&self) -> Option<f64> {
        self.as_f64()
    }

    fn label(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn render(&self) -> String {
        serde_yaml::to_string(self)
            .map_or_else(|_| format!("{self:?}"), |s| s.trim_end().to_owned())
    }
}

type Cells<'a, V> = Vec<(&'a str, &'a V)>;

/// Loads row-oriented input.
///
/// # Errors
///
/// Returns [`LedgerError::MalformedRecord`] for the first row that is not an
/// object, lacks a required field, repeats one under an alias, or carries a
/// non-numeric amount.
#[instrument(skip(raw_rows), fields(rows = raw_rows.len()))]
pub fn load(raw_rows: &[Value]) -> Result<RecordSet> {
    let rows = raw_rows
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            let object = raw.as_object().ok_or_else(|| not_an_object(row))?;
            Ok(object
                .iter()
                .map(|(key, value)| (key.as_str(), value))
                .collect::<Cells<'_, Value>>())
        })
        .collect::<Result<Vec<_>>>()?;
    build(&rows)
}

/// Loads column-oriented input, e.g. `{"일": [...], "매출": [...], ...}`.
///
/// # Errors
///
/// Returns [`LedgerError::MalformedRecord`] when a column is not an array or
/// the columns differ in length, then anything [`load`] rejects.
pub fn load_columns(columns: &Map<String, Value>) -> Result<RecordSet> {
    let arrays = columns
        .iter()
        .map(|(name, column)| {
            column
                .as_array()
                .map(|values| (name.as_str(), values.as_slice()))
                .ok_or_else(|| not_an_array(name))
        })
        .collect::<Result<Vec<_>>>()?;
    build(&transpose(&arrays)?)
}

/// Loads either layout: an array of rows or an object of columns.
///
/// # Errors
///
/// Returns [`LedgerError::MalformedRecord`] for any other JSON shape.
pub fn load_value(value: &Value) -> Result<RecordSet> {
    match value {
        Value::Array(rows) => load(rows),
        Value::Object(columns) => load_columns(columns),
        _ => Err(wrong_shape()),
    }
}

/// Loads a YAML document in either layout, keeping `.nan` and `.inf`
/// amounts as they are.
///
/// # Errors
///
/// Returns [`LedgerError::MalformedRecord`] for non-text column names and
/// everything [`load_value`] rejects.
#[instrument(skip(value))]
pub fn load_yaml_value(value: &YamlValue) -> Result<RecordSet> {
    match value {
        YamlValue::Sequence(raw_rows) => {
            let rows = raw_rows
                .iter()
                .enumerate()
                .map(|(row, raw)| {
                    let mapping = raw.as_mapping().ok_or_else(|| not_an_object(row))?;
                    yaml_cells(row, mapping)
                })
                .collect::<Result<Vec<_>>>()?;
            build(&rows)
        }
        YamlValue::Mapping(columns) => {
            let arrays = yaml_cells(0, columns)?
                .into_iter()
                .map(|(name, column)| {
                    column
                        .as_sequence()
                        .map(|values| (name, values.as_slice()))
                        .ok_or_else(|| not_an_array(name))
                })
                .collect::<Result<Vec<_>>>()?;
            build(&transpose(&arrays)?)
        }
        _ => Err(wrong_shape()),
    }
}

/// Loads whatever a record source produced.
///
/// # Errors
///
/// See [`load_value`] and [`load_yaml_value`].
pub fn load_input(input: &RawInput) -> Result<RecordSet> {
    match input {
        RawInput::Json(value) => load_value(value),
        RawInput::Yaml(value) => load_yaml_value(value),
    }
}

fn build<V: RawCell>(rows: &[Cells<'_, V>]) -> Result<RecordSet> {
    let records = rows
        .iter()
        .enumerate()
        .map(|(row, cells)| parse_row(row, cells))
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.date_label.as_str()) {
            warn!(date_label = %record.date_label, "Duplicate date label in input");
        }
    }

    debug!("Loaded {} daily records", records.len());
    Ok(RecordSet::new(records))
}

fn transpose<'a, V>(columns: &[(&'a str, &'a [V])]) -> Result<Vec<Cells<'a, V>>> {
    let expected = columns.first().map_or(0, |(_, values)| values.len());
    if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != expected) {
        return Err(LedgerError::malformed(
            values.len().min(expected),
            Some(*name),
            format!(
                "column '{name}' has {} values, expected {expected}",
                values.len()
            ),
        ));
    }

    Ok((0..expected)
        .map(|i| {
            columns
                .iter()
                .map(|&(name, values)| (name, &values[i]))
                .collect()
        })
        .collect())
}

fn yaml_cells(row: usize, mapping: &Mapping) -> Result<Cells<'_, YamlValue>> {
    mapping
        .iter()
        .map(|(key, value)| {
            key.as_str().map(|name| (name, value)).ok_or_else(|| {
                LedgerError::malformed(
                    row,
                    None,
                    format!("column name {} is not text", key.render()),
                )
            })
        })
        .collect()
}

fn parse_row<V: RawCell>(row: usize, cells: &[(&str, &V)]) -> Result<DailyRecord> {
    let mut date_label = None;
    let mut week_label = None;
    let mut revenue = None;
    let mut cost = None;
    let mut extra = BTreeMap::new();

    for &(key, value) in cells {
        match canonical_field(key) {
            DATE_LABEL => assign(row, DATE_LABEL, &mut date_label, label_value(row, DATE_LABEL, value)?)?,
            WEEK_LABEL => assign(row, WEEK_LABEL, &mut week_label, label_value(row, WEEK_LABEL, value)?)?,
            REVENUE => assign(row, REVENUE, &mut revenue, amount_value(row, REVENUE, value)?)?,
            COST => assign(row, COST, &mut cost, amount_value(row, COST, value)?)?,
            other => match value.amount() {
                Some(v) => {
                    extra.insert(other.to_string(), v);
                }
                None => debug!(row, field = other, "Ignoring non-numeric extra column"),
            },
        }
    }

    Ok(DailyRecord {
        date_label: date_label.ok_or_else(|| missing(row, DATE_LABEL))?,
        revenue: revenue.ok_or_else(|| missing(row, REVENUE))?,
        cost: cost.ok_or_else(|| missing(row, COST))?,
        week_label: week_label.ok_or_else(|| missing(row, WEEK_LABEL))?,
        extra,
    })
}

/// A field and its alias in the same row is ambiguous.
fn assign<T>(row: usize, field: &str, slot: &mut Option<T>, value: T) -> Result<()> {
    if slot.replace(value).is_some() {
        return Err(LedgerError::malformed(
            row,
            Some(field),
            format!("'{field}' is given more than once"),
        ));
    }
    Ok(())
}

fn missing(row: usize, field: &str) -> LedgerError {
    LedgerError::malformed(row, Some(field), format!("missing required field '{field}'"))
}

fn not_an_object(row: usize) -> LedgerError {
    LedgerError::malformed(row, None, "row is not an object")
}

fn not_an_array(name: &str) -> LedgerError {
    LedgerError::malformed(0, Some(name), format!("column '{name}' is not an array"))
}

fn wrong_shape() -> LedgerError {
    LedgerError::malformed(
        0,
        None,
        "input must be an array of rows or an object of columns",
    )
}

fn label_value<V: RawCell>(row: usize, field: &str, value: &V) -> Result<String> {
    value.label().ok_or_else(|| {
        LedgerError::malformed(
            row,
            Some(field),
            format!("'{field}' must be a text label, got {}", value.render()),
        )
    })
}

fn amount_value<V: RawCell>(row: usize, field: &str, value: &V) -> Result<f64> {
    value.amount().ok_or_else(|| {
        LedgerError::malformed(
            row,
            Some(field),
            format!("'{field}' must be numeric, got {}", value.render()),
        )
    })
}
