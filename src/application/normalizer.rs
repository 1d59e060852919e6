// Dataset normalizer - Turns loosely typed records into a typed table
use crate::domain::dataset::{DATE_FIELD, DatasetName, NUMERIC_FIELDS, Record};
use crate::domain::table::{CellValue, NormalizedTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Numeric,
    Date,
    Untyped,
}

fn column_type(name: &str) -> ColumnType {
    if NUMERIC_FIELDS.contains(&name) {
        ColumnType::Numeric
    } else if name == DATE_FIELD {
        ColumnType::Date
    } else {
        ColumnType::Untyped
    }
}

/// Build a normalized table from raw records.
///
/// Column names are trimmed and kept in first-seen order. Declared numeric fields
/// become numbers and `Month` becomes a date-time; values that cannot be coerced
/// become [`CellValue::Missing`]. Rows are never added, dropped or reordered.
pub fn normalize(dataset: DatasetName, records: &[Record]) -> NormalizedTable {
    if records.is_empty() {
        return NormalizedTable::empty(dataset);
    }

    for column in trim_collisions(records) {
        tracing::warn!(
            dataset = %dataset,
            column = column,
            "Several raw fields trim to the same column, keeping the first"
        );
    }

    let columns = collect_columns(records);
    let types: Vec<ColumnType> = columns.iter().map(|c| column_type(c)).collect();
    let mut failures = vec![0usize; columns.len()];

    let rows = records
        .iter()
        .map(|record| {
            let mut raw: HashMap<&str, &Value> = HashMap::with_capacity(record.len());
            for (key, value) in record {
                // First raw key wins when several trim to the same name
                raw.entry(key.trim()).or_insert(value);
            }

            columns
                .iter()
                .zip(&types)
                .enumerate()
                .map(|(idx, (column, ty))| {
                    let value = raw.get(column.as_str()).copied();
                    let cell = match ty {
                        ColumnType::Numeric => value.map(coerce_numeric),
                        ColumnType::Date => value.map(coerce_date),
                        ColumnType::Untyped => value.map(scalar_cell),
                    }
                    .unwrap_or(CellValue::Missing);

                    if cell.is_missing() && value.is_some_and(|v| !v.is_null()) {
                        failures[idx] += 1;
                    }
                    cell
                })
                .collect()
        })
        .collect();

    for ((column, ty), count) in columns.iter().zip(&types).zip(&failures) {
        if *count > 0 && *ty != ColumnType::Untyped {
            tracing::warn!(
                dataset = %dataset,
                column = %column,
                failed = count,
                rows = records.len(),
                "Coerced unparseable values to missing"
            );
        }
    }

    NormalizedTable::new(dataset, columns, rows)
}

/// Trimmed column names in order of first appearance across all records.
fn collect_columns(records: &[Record]) -> Vec<String> {
    let mut columns = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for key in records.iter().flat_map(|r| r.keys()) {
        let trimmed = key.trim();
        if seen.insert(trimmed) {
            columns.push(trimmed.to_string());
        }
    }

    columns
}

/// Trimmed names that occur more than once within a single record.
fn trim_collisions(records: &[Record]) -> Vec<&str> {
    let mut collisions: Vec<&str> = Vec::new();

    for record in records {
        let mut in_record: HashSet<&str> = HashSet::with_capacity(record.len());
        for key in record.keys() {
            let trimmed = key.trim();
            if !in_record.insert(trimmed) && !collisions.contains(&trimmed) {
                collisions.push(trimmed);
            }
        }
    }

    collisions
}

/// Numeric coercion: numbers pass, strings are parsed, everything else is missing.
pub fn coerce_numeric(value: &Value) -> CellValue {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Object(_) => extended_number(value),
        Value::Null | Value::Array(_) => None,
    };

    match number {
        Some(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Missing,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Unwrap extended-JSON numeric wrappers such as `{"$numberLong": "42"}`.
fn extended_number(value: &Value) -> Option<f64> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    let (key, inner) = map.iter().next()?;
    match key.as_str() {
        "$numberInt" | "$numberLong" | "$numberDouble" | "$numberDecimal" => match inner {
            Value::String(s) => parse_number(s),
            Value::Number(n) => n.as_f64(),
            _ => None,
        },
        _ => None,
    }
}

/// Date coercion for the `Month` field.
pub fn coerce_date(value: &Value) -> CellValue {
    let parsed = match value {
        Value::String(s) => parse_datetime(s),
        Value::Number(n) => n.as_i64().and_then(from_epoch_millis),
        Value::Object(map) => match map.get("$date") {
            Some(Value::String(s)) => parse_datetime(s),
            Some(Value::Number(n)) => n.as_i64().and_then(from_epoch_millis),
            Some(inner @ Value::Object(_)) => extended_number(inner)
                .map(|ms| ms as i64)
                .and_then(from_epoch_millis),
            _ => None,
        },
        _ => None,
    };

    parsed.map(CellValue::DateTime).unwrap_or(CellValue::Missing)
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // Year-month, e.g. "2024-03"
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn from_epoch_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

/// Cell for a column with no declared type.
pub fn scalar_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Missing),
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Object(map) => {
            if let Some(n) = extended_number(value) {
                CellValue::Number(n)
            } else if map.contains_key("$date") {
                coerce_date(value)
            } else if let Some(Value::String(oid)) = map.get("$oid") {
                CellValue::Text(oid.clone())
            } else {
                CellValue::Text(value.to_string())
            }
        }
        Value::Array(_) => CellValue::Text(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn midnight(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::DateTime(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        for dataset in DatasetName::ALL {
            let table = normalize(dataset, &[]);
            assert!(table.is_empty());
            assert!(table.columns().is_empty());
            assert_eq!(table.dataset, dataset);
        }
    }

    #[test]
    fn test_top_customers_scenario() {
        let input = records(vec![
            json!({"CustomerName": "Alice", "TotalSpent": "250.5"}),
            json!({"CustomerName": "Bob", "TotalSpent": "not_a_number"}),
        ]);

        let table = normalize(DatasetName::TopCustomers, &input);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns(), ["CustomerName", "TotalSpent"]);
        assert_eq!(table.cell(0, "TotalSpent"), Some(&CellValue::Number(250.5)));
        assert_eq!(table.cell(1, "TotalSpent"), Some(&CellValue::Missing));
        assert_eq!(table.cell(1, "CustomerName"), Some(&CellValue::Text("Bob".to_string())));
    }

    #[test]
    fn test_invalid_numeric_leaves_other_cells_alone() {
        let input = records(vec![
            json!({"BranchName": "North", "TotalRevenue": "N/A", "Region": "EU"}),
            json!({"BranchName": "South", "TotalRevenue": 800, "Region": "US"}),
        ]);

        let table = normalize(DatasetName::BranchRevenueComparison, &input);

        assert_eq!(
            table.rows()[0],
            vec![
                CellValue::Text("North".to_string()),
                CellValue::Missing,
                CellValue::Text("EU".to_string()),
            ]
        );
        assert_eq!(table.cell(1, "TotalRevenue"), Some(&CellValue::Number(800.0)));
    }

    #[test]
    fn test_column_names_trimmed() {
        let input = records(vec![json!({" ProductName ": "Laptop", "TotalQuantity\t": "40"})]);

        let table = normalize(DatasetName::BestSellingProducts, &input);

        assert_eq!(table.columns(), ["ProductName", "TotalQuantity"]);
        assert_eq!(table.cell(0, "TotalQuantity"), Some(&CellValue::Number(40.0)));
    }

    #[test]
    fn test_trimming_is_idempotent() {
        let raw = records(vec![json!({" ProductName": "Laptop", "TotalQuantity ": 40})]);
        let once = normalize(DatasetName::BestSellingProducts, &raw);

        let renamed: Record = once
            .columns()
            .iter()
            .cloned()
            .zip(raw[0].values().cloned())
            .collect();
        let twice = normalize(DatasetName::BestSellingProducts, &[renamed]);

        assert_eq!(once.columns(), twice.columns());
        assert_eq!(once.rows(), twice.rows());
    }

    #[test]
    fn test_month_parsing() {
        let input = records(vec![
            json!({"Month": "2024-01-01", "TotalRevenue": 5000}),
            json!({"Month": "2024-02-01", "TotalRevenue": 6200}),
            json!({"Month": "not-a-date", "TotalRevenue": 7000}),
        ]);

        let table = normalize(DatasetName::MonthlySalesTrends, &input);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(0, "Month"), Some(&midnight(2024, 1, 1)));
        assert_eq!(table.cell(1, "Month"), Some(&midnight(2024, 2, 1)));
        assert_eq!(table.cell(2, "Month"), Some(&CellValue::Missing));
        assert_eq!(table.cell(2, "TotalRevenue"), Some(&CellValue::Number(7000.0)));
    }

    #[test]
    fn test_month_formats() {
        assert_eq!(coerce_date(&json!("2024-03")), midnight(2024, 3, 1));
        assert_eq!(coerce_date(&json!("2024/03/15")), midnight(2024, 3, 15));
        assert_eq!(coerce_date(&json!("03/15/2024")), midnight(2024, 3, 15));
        assert_eq!(coerce_date(&json!("2024-03-01T00:00:00Z")), midnight(2024, 3, 1));
        assert_eq!(coerce_date(&json!({"$date": "2024-03-01T00:00:00.000Z"})), midnight(2024, 3, 1));
        assert_eq!(coerce_date(&json!(1709251200000i64)), midnight(2024, 3, 1));
        assert_eq!(coerce_date(&json!(null)), CellValue::Missing);
        assert_eq!(coerce_date(&json!(true)), CellValue::Missing);
    }

    #[test]
    fn test_numeric_coercion_variants() {
        assert_eq!(coerce_numeric(&json!(" 12.5 ")), CellValue::Number(12.5));
        assert_eq!(coerce_numeric(&json!({"$numberLong": "42"})), CellValue::Number(42.0));
        assert_eq!(coerce_numeric(&json!({"$numberDecimal": "19.99"})), CellValue::Number(19.99));
        assert_eq!(coerce_numeric(&json!(true)), CellValue::Number(1.0));
        assert_eq!(coerce_numeric(&json!("")), CellValue::Missing);
        assert_eq!(coerce_numeric(&json!("NaN")), CellValue::Missing);
        assert_eq!(coerce_numeric(&json!([1])), CellValue::Missing);
        assert_eq!(coerce_numeric(&json!({"amount": 1})), CellValue::Missing);
    }

    #[test]
    fn test_heterogeneous_records() {
        let input = records(vec![
            json!({"ProductName": "Coat"}),
            json!({"ProductName": "Hat", "TotalQuantity": 5, "Note": null}),
        ]);

        let table = normalize(DatasetName::BestSellingProducts, &input);

        assert_eq!(table.columns(), ["ProductName", "TotalQuantity", "Note"]);
        assert_eq!(
            table.rows()[0],
            vec![CellValue::Text("Coat".to_string()), CellValue::Missing, CellValue::Missing]
        );
        assert_eq!(table.cell(1, "TotalQuantity"), Some(&CellValue::Number(5.0)));
    }

    #[test]
    fn test_trim_collision_keeps_first_field() {
        let input = records(vec![json!({"ProductName": "Coat", " ProductName": "Ignored"})]);

        let table = normalize(DatasetName::BestSellingProducts, &input);

        assert_eq!(table.columns(), ["ProductName"]);
        assert_eq!(table.cell(0, "ProductName"), Some(&CellValue::Text("Coat".to_string())));
    }

    #[test]
    fn test_spelling_differences_across_records_are_not_collisions() {
        let input = records(vec![
            json!({" TotalSpent": 5, "CustomerName": "A"}),
            json!({"TotalSpent": 6, "CustomerName": "B"}),
        ]);

        assert!(trim_collisions(&input).is_empty());

        let table = normalize(DatasetName::TopCustomers, &input);
        assert_eq!(table.columns(), ["TotalSpent", "CustomerName"]);
        assert_eq!(
            table.column_values("TotalSpent"),
            Some(vec![CellValue::Number(5.0), CellValue::Number(6.0)])
        );
    }

    #[test]
    fn test_collision_within_one_record_is_reported_once() {
        let input = records(vec![
            json!({"ProductName": "Coat", " ProductName": "Ignored"}),
            json!({"ProductName ": "Hat", "ProductName": "Ignored"}),
        ]);

        assert_eq!(trim_collisions(&input), vec!["ProductName"]);
    }

    #[test]
    fn test_row_order_preserved() {
        let names = ["Zed", "Amy", "Kim"];
        let input = records(
            names
                .iter()
                .map(|n| json!({"CustomerName": n, "TotalSpent": 1}))
                .collect(),
        );

        let table = normalize(DatasetName::TopCustomers, &input);
        let got: Vec<String> = table
            .column_values("CustomerName")
            .unwrap()
            .iter()
            .map(CellValue::display)
            .collect();
        assert_eq!(got, names);
    }

    #[test]
    fn test_untyped_extended_json() {
        assert_eq!(scalar_cell(&json!({"$oid": "65f0a1"})), CellValue::Text("65f0a1".to_string()));
        assert_eq!(scalar_cell(&json!({"$numberInt": "7"})), CellValue::Number(7.0));
        assert_eq!(scalar_cell(&json!([1, 2])), CellValue::Text("[1,2]".to_string()));
    }
}
