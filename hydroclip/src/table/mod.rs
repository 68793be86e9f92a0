//! Attribute table: rows of typed cells belonging to the shapes of a dataset.
//!
//! Row `i` of the table describes the shape with id `i`. Clipping and tracing produce row masks, and
//! [`AttributeTable::filter`] applies them so that the table and the geometry stay aligned.

mod interner;

use std::sync::Arc;

use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

use crate::error::HydroclipError;

pub use interner::StringInterner;

/// Type of the values of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Text.
    String,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit float. NaN is not a valid value.
    Double,
}

impl ColumnType {
    fn name(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Double => "double",
        }
    }
}

/// Value of a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Text.
    String(Arc<str>),
    /// Integer.
    Integer(i64),
    /// Float.
    Double(f64),
}

impl Value {
    /// Type of the value.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::String(_) => ColumnType::String,
            Value::Integer(_) => ColumnType::Integer,
            Value::Double(_) => ColumnType::Double,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ColumnData {
    String(Vec<Arc<str>>),
    Integer(Vec<i64>),
    Double(Vec<f64>),
}

impl ColumnData {
    fn new(column_type: ColumnType, capacity: usize) -> Self {
        match column_type {
            ColumnType::String => ColumnData::String(Vec::with_capacity(capacity)),
            ColumnType::Integer => ColumnData::Integer(Vec::with_capacity(capacity)),
            ColumnType::Double => ColumnData::Double(Vec::with_capacity(capacity)),
        }
    }

    fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::String(_) => ColumnType::String,
            ColumnData::Integer(_) => ColumnType::Integer,
            ColumnData::Double(_) => ColumnType::Double,
        }
    }

    fn get(&self, row: usize) -> Option<Value> {
        match self {
            ColumnData::String(v) => v.get(row).map(|s| Value::String(s.clone())),
            ColumnData::Integer(v) => v.get(row).map(|i| Value::Integer(*i)),
            ColumnData::Double(v) => v.get(row).map(|d| Value::Double(*d)),
        }
    }

    fn filter(&self, mask: &[bool]) -> Self {
        fn keep<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(v, _)| v.clone())
                .collect()
        }

        match self {
            ColumnData::String(v) => ColumnData::String(keep(v, mask)),
            ColumnData::Integer(v) => ColumnData::Integer(keep(v, mask)),
            ColumnData::Double(v) => ColumnData::Double(keep(v, mask)),
        }
    }
}

/// Named column of an [`AttributeTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Name of the column.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type of the values in the column.
    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }
}

/// Table of typed cells with unique column names.
///
/// String cells are interned: equal strings in different rows share one allocation. Double cells must not be NaN,
/// which is what source datasets use to mark a missing value.
#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    interner: StringInterner,
    row_count: usize,
}

impl AttributeTable {
    /// Creates a table without columns.
    pub fn new() -> Self {
        Self {
            columns: vec![],
            index: HashMap::new(),
            interner: StringInterner::new(),
            row_count: 0,
        }
    }

    /// Creates an empty table with the given columns.
    pub fn with_columns<'a>(
        columns: impl IntoIterator<Item = (&'a str, ColumnType)>,
    ) -> Result<Self, HydroclipError> {
        let mut table = Self::new();
        for (name, column_type) in columns {
            table.add_column(name, column_type)?;
        }

        Ok(table)
    }

    /// Adds a column to a table that has no rows yet.
    pub fn add_column(&mut self, name: &str, column_type: ColumnType) -> Result<(), HydroclipError> {
        if self.row_count > 0 {
            return Err(HydroclipError::LengthMismatch {
                expected: self.row_count,
                actual: 0,
            });
        }

        self.insert_column(name, ColumnData::new(column_type, 0))
    }

    fn insert_column(&mut self, name: &str, data: ColumnData) -> Result<(), HydroclipError> {
        if self.index.contains_key(name) {
            return Err(HydroclipError::DuplicateColumn(name.to_string()));
        }

        self.index.insert(name.to_string(), self.columns.len());
        self.columns.push(Column {
            name: name.to_string(),
            data,
        });
        Ok(())
    }

    /// Appends a row. Cells must be given in column order and match the column types.
    ///
    /// If any cell is invalid, the table is left unchanged.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), HydroclipError> {
        if row.len() != self.columns.len() {
            return Err(HydroclipError::RowLength {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        for (column, value) in self.columns.iter().zip(&row) {
            check_value(column, value)?;
        }

        for (column, value) in self.columns.iter_mut().zip(row) {
            match (&mut column.data, value) {
                (ColumnData::String(v), Value::String(s)) => v.push(self.interner.intern(&s)),
                (ColumnData::Integer(v), Value::Integer(i)) => v.push(i),
                (ColumnData::Double(v), Value::Double(d)) => v.push(d),
                // Types were checked above.
                _ => {}
            }
        }

        self.row_count += 1;
        Ok(())
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Names of the columns in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &'_ str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|i| &self.columns[*i])
    }

    /// Value of a cell. `None` if the row or the column does not exist.
    pub fn value(&self, row: usize, column: &str) -> Option<Value> {
        self.column(column)?.data.get(row)
    }

    /// All values of a string column.
    pub fn strings(&self, column: &str) -> Result<&[Arc<str>], HydroclipError> {
        match &self.typed_column(column, ColumnType::String)?.data {
            ColumnData::String(v) => Ok(v),
            other => Err(type_error(column, ColumnType::String, other.column_type())),
        }
    }

    /// All values of an integer column.
    pub fn integers(&self, column: &str) -> Result<&[i64], HydroclipError> {
        match &self.typed_column(column, ColumnType::Integer)?.data {
            ColumnData::Integer(v) => Ok(v),
            other => Err(type_error(column, ColumnType::Integer, other.column_type())),
        }
    }

    /// All values of a double column.
    pub fn doubles(&self, column: &str) -> Result<&[f64], HydroclipError> {
        match &self.typed_column(column, ColumnType::Double)?.data {
            ColumnData::Double(v) => Ok(v),
            other => Err(type_error(column, ColumnType::Double, other.column_type())),
        }
    }

    fn typed_column(&self, name: &str, expected: ColumnType) -> Result<&Column, HydroclipError> {
        let column = self
            .column(name)
            .ok_or_else(|| HydroclipError::UnknownColumn(name.to_string()))?;
        if column.column_type() != expected {
            return Err(type_error(name, expected, column.column_type()));
        }

        Ok(column)
    }

    /// Sets a double column to the given values, one per row, adding the column if it does not exist.
    ///
    /// Used for values derived from geometry, such as clipped area.
    pub fn set_double_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), HydroclipError> {
        if values.len() != self.row_count {
            return Err(HydroclipError::LengthMismatch {
                expected: self.row_count,
                actual: values.len(),
            });
        }

        if values.iter().any(|v| v.is_nan()) {
            return Err(HydroclipError::MissingValue(name.to_string()));
        }

        match self.index.get(name) {
            Some(i) => {
                let column = &mut self.columns[*i];
                if column.column_type() != ColumnType::Double {
                    return Err(type_error(name, ColumnType::Double, column.column_type()));
                }
                column.data = ColumnData::Double(values);
                Ok(())
            }
            None => self.insert_column(name, ColumnData::Double(values)),
        }
    }

    /// Returns a new table with only the rows marked in the mask.
    ///
    /// The mask must have exactly one flag per row. The string pool is shared with the new table.
    pub fn filter(&self, mask: &[bool]) -> Result<Self, HydroclipError> {
        if mask.len() != self.row_count {
            return Err(HydroclipError::LengthMismatch {
                expected: self.row_count,
                actual: mask.len(),
            });
        }

        Ok(Self {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.filter(mask),
                })
                .collect(),
            index: self.index.clone(),
            interner: self.interner.clone(),
            row_count: mask.iter().filter(|keep| **keep).count(),
        })
    }

    /// Pool of the string values of the table.
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }
}

fn check_value(column: &Column, value: &Value) -> Result<(), HydroclipError> {
    if column.column_type() != value.column_type() {
        return Err(type_error(
            &column.name,
            column.column_type(),
            value.column_type(),
        ));
    }

    if let Value::Double(d) = value {
        if d.is_nan() {
            return Err(HydroclipError::MissingValue(column.name.clone()));
        }
    }

    Ok(())
}

fn type_error(column: &str, expected: ColumnType, actual: ColumnType) -> HydroclipError {
    HydroclipError::ColumnType {
        column: column.to_string(),
        expected: expected.name(),
        actual: actual.name(),
    }
}
