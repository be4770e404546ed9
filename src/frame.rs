//! Tabular value model
//!
//! A [`Frame`] is a realized table: named columns over rows of [`Datum`]
//! cells. Loaders build frames from whatever source they read, and the
//! normalization layer turns them into ordered JSON records.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Number, Value};

/// A single cell value.
///
/// Date and datetime cells are coerced to their string representation when
/// converted to JSON; every other variant maps to its native JSON type.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl Datum {
    /// Convert this cell to a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Datum::Null => Value::Null,
            Datum::Bool(b) => Value::Bool(*b),
            Datum::Int(i) => Value::Number(Number::from(*i)),
            Datum::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Datum::Str(s) => Value::String(s.clone()),
            Datum::Date(d) => Value::String(d.to_string()),
            Datum::DateTime(t) => Value::String(t.to_rfc3339()),
        }
    }
}

/// A realized table of rows and named columns.
///
/// Column order is fixed at construction and preserved in every emitted
/// record. Row order is preserved exactly as pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Datum>>,
}

impl Frame {
    /// Create an empty frame with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Datum>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row arity mismatch");
        self.rows.push(row);
    }

    /// Column names, in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only the first `n` rows.
    pub fn head(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }

    /// Keep only the rows for which `keep` returns true, preserving order.
    pub fn retain_rows<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&[Datum]) -> bool,
    {
        self.rows.retain(|row| keep(row));
        self
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Largest integer value in the given column, if any row has one.
    pub fn column_max_int(&self, index: usize) -> Option<i64> {
        self.rows
            .iter()
            .filter_map(|row| match row.get(index) {
                Some(Datum::Int(i)) => Some(*i),
                _ => None,
            })
            .max()
    }

    /// Append all rows of `other`. Fails if the column sets differ.
    pub fn vstack(&mut self, other: Frame) -> Result<(), String> {
        if self.columns != other.columns {
            return Err(format!(
                "column mismatch: [{}] vs [{}]",
                self.columns.join(", "),
                other.columns.join(", ")
            ));
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Convert every row into an ordered column-name -> cell-value record.
    pub fn into_records(self) -> Vec<Value> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| {
                let mut record = Map::with_capacity(columns.len());
                for (name, cell) in columns.iter().zip(row.iter()) {
                    record.insert(name.clone(), cell.to_json());
                }
                Value::Object(record)
            })
            .collect()
    }
}
