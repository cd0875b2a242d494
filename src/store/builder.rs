//! # Select Builder
//!
//! Assembles a SELECT from a fixed base statement plus optional filters.
//! Clause text is `&'static str`, so request values can only ever reach
//! the engine as bound parameters.

use rusqlite::types::Value as SqlValue;

/// A finished statement and its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Builder for filtered selects
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    sql: String,
    params: Vec<SqlValue>,
    has_where: bool,
    order_by: Option<&'static str>,
}

impl SelectBuilder {
    /// Start from a base statement without WHERE or ORDER BY
    pub fn new(base: &'static str) -> Self {
        Self {
            sql: base.trim_end().to_string(),
            params: Vec::new(),
            has_where: false,
            order_by: None,
        }
    }

    /// Append a clause and bind its values in order
    pub fn filter(mut self, clause: &'static str, values: Vec<SqlValue>) -> Self {
        debug_assert_eq!(
            clause.matches('?').count(),
            values.len(),
            "placeholder count mismatch in `{}`",
            clause
        );
        self.push_clause(clause);
        self.params.extend(values);
        self
    }

    /// Append a single-placeholder clause when the value is present
    pub fn filter_opt<V: Into<SqlValue>>(self, clause: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.filter(clause, vec![v.into()]),
            None => self,
        }
    }

    /// Append a parameterless clause when `enabled`
    pub fn condition_if(mut self, enabled: bool, clause: &'static str) -> Self {
        if enabled {
            self.push_clause(clause);
        }
        self
    }

    /// Set the ORDER BY expression
    pub fn order_by(mut self, ordering: &'static str) -> Self {
        self.order_by = Some(ordering);
        self
    }

    pub fn build(self) -> BuiltQuery {
        let mut sql = self.sql;
        if let Some(ordering) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(ordering);
        }
        BuiltQuery {
            sql,
            params: self.params,
        }
    }

    fn push_clause(&mut self, clause: &str) {
        self.sql.push_str(if self.has_where { " AND " } else { " WHERE " });
        self.sql.push_str(clause);
        self.has_where = true;
    }
}
