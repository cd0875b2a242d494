//! # Raw Statements
//!
//! The escape hatch behind `POST /api/query`. Text runs as given; the only
//! guard is a case-insensitive DROP/TRUNCATE prefix block.

use serde::Serialize;
use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::normalize::Record;

const BLOCKED_PREFIXES: [&str; 2] = ["DROP", "TRUNCATE"];

/// Message returned when a blocked statement is submitted
pub const BLOCKED_MESSAGE: &str = "DROP and TRUNCATE not allowed via this endpoint";

/// A trimmed statement that passed the prefix guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement {
    sql: String,
}

impl RawStatement {
    /// Trim and screen statement text
    pub fn parse(text: &str) -> StoreResult<Self> {
        let sql = text.trim();
        if sql.is_empty() {
            return Err(StoreError::Rejected("SQL required".to_string()));
        }
        let upper = sql.to_ascii_uppercase();
        if BLOCKED_PREFIXES.iter().any(|p| upper.starts_with(p)) {
            return Err(StoreError::Rejected(BLOCKED_MESSAGE.to_string()));
        }
        Ok(Self {
            sql: sql.to_string(),
        })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

/// Result of running a raw statement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RawOutcome {
    /// Statement produced result columns
    #[serde(rename = "SELECT")]
    Rows { rows: Vec<Record> },

    /// Statement modified data or schema
    #[serde(rename = "WRITE")]
    Write {
        changes: usize,
        #[serde(rename = "lastInsertRowid")]
        last_insert_rowid: i64,
    },
}

impl RawOutcome {
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blocks_drop_and_truncate_any_case() {
        for text in [
            "DROP TABLE PERSON",
            "drop table PERSON",
            "  Drop Table PERSON",
            "TRUNCATE TABLE PERSON",
            "\ntruncate table PERSON",
        ] {
            match RawStatement::parse(text) {
                Err(StoreError::Rejected(msg)) => assert_eq!(msg, BLOCKED_MESSAGE),
                other => panic!("expected rejection for {:?}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(matches!(
            RawStatement::parse("   "),
            Err(StoreError::Rejected(m)) if m == "SQL required"
        ));
    }

    #[test]
    fn test_other_statements_pass_trimmed() {
        let stmt = RawStatement::parse("  SELECT 1 ").unwrap();
        assert_eq!(stmt.sql(), "SELECT 1");
        assert!(RawStatement::parse("DELETE FROM VISITOR").is_ok());
    }

    #[test]
    fn test_outcome_shapes() {
        let mut row = Record::new();
        row.insert("1".to_string(), json!(1));
        let rows = RawOutcome::Rows { rows: vec![row] };
        assert_eq!(rows.to_json(), json!({"type": "SELECT", "rows": [{"1": 1}]}));

        let write = RawOutcome::Write {
            changes: 2,
            last_insert_rowid: 9,
        };
        assert_eq!(
            write.to_json(),
            json!({"type": "WRITE", "changes": 2, "lastInsertRowid": 9})
        );
    }
}
