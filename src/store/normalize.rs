//! # Row Normalizer
//!
//! Turns engine rows into ordered JSON objects. Keys are the column
//! names or aliases exactly as the statement produced them.

use rusqlite::types::ValueRef;
use rusqlite::{Row, Statement};
use serde_json::{Map, Number, Value};

/// A normalized result row
pub type Record = Map<String, Value>;

/// Convert a single engine value to JSON
pub fn normalize_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

/// Normalize one row given the statement's column names
pub fn normalize_row(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<Record> {
    let mut record = Record::with_capacity(columns.len());
    for (idx, name) in columns.iter().enumerate() {
        record.insert(name.clone(), normalize_value(row.get_ref(idx)?));
    }
    Ok(record)
}

/// Column names of a prepared statement, in output order
pub fn column_names(stmt: &Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(str::to_owned).collect()
}

/// Run a prepared statement and normalize every row
pub fn normalize_rows<P: rusqlite::Params>(
    stmt: &mut Statement<'_>,
    params: P,
) -> rusqlite::Result<Vec<Record>> {
    let columns = column_names(stmt);
    let mut rows = stmt.query(params)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(normalize_row(row, &columns)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use serde_json::json;

    #[test]
    fn test_value_mapping() {
        assert_eq!(normalize_value(ValueRef::Null), Value::Null);
        assert_eq!(normalize_value(ValueRef::Integer(7)), json!(7));
        assert_eq!(normalize_value(ValueRef::Real(1.5)), json!(1.5));
        assert_eq!(normalize_value(ValueRef::Real(f64::NAN)), Value::Null);
        assert_eq!(normalize_value(ValueRef::Text(b"park")), json!("park"));
        assert_eq!(normalize_value(ValueRef::Blob(&[1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_aliases_and_order_preserved() {
        let conn = Connection::open_in_memory().unwrap();
        let mut stmt = conn
            .prepare("SELECT 2 AS zeta, 'x' AS alpha, NULL AS middle")
            .unwrap();
        let rows = normalize_rows(&mut stmt, []).unwrap();

        assert_eq!(rows.len(), 1);
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "middle"]);
        assert_eq!(rows[0]["middle"], Value::Null);
    }

    #[test]
    fn test_empty_result_is_empty_vec() {
        let conn = Connection::open_in_memory().unwrap();
        let mut stmt = conn.prepare("SELECT 1 AS one WHERE 0").unwrap();
        assert!(normalize_rows(&mut stmt, []).unwrap().is_empty());
    }
}
