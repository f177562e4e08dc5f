//! The rectangular dataset every command reads or mutates.
//!
//! A [`Table`] is an ordered list of uniquely named [`Column`]s that all
//! have the same number of rows. Every constructor and mutator below keeps
//! those two invariants; operations that would break them return an error
//! and leave the table untouched.

use std::collections::HashSet;

use im::Vector;

use crate::error::{Error, ErrorKind};
use crate::types::ColumnType;
use crate::value::Value;
use crate::Result;

/// A named column of values.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    values: Vector<Value>,
}

impl Column {
    /// Creates a column from a name and its values.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values (a cheap persistent-vector handle).
    #[must_use]
    pub fn values(&self) -> &Vector<Value> {
        &self.values
    }

    /// Returns the value at `row`.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the logical type inferred from the values.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        ColumnType::infer(self.values.iter())
    }
}

/// An ordered set of equally long, uniquely named columns.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Creates an empty table (no columns, no rows).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from columns, validating names and lengths.
    ///
    /// # Errors
    ///
    /// Returns an internal error if two columns share a name or differ in length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map_or(0, Column::len);
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(Error::internal(format!(
                    "duplicate column name: {}",
                    column.name()
                )));
            }
            if column.len() != rows {
                return Err(Error::internal(format!(
                    "column {} has {} rows, expected {rows}",
                    column.name(),
                    column.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the columns in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column names in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Looks up a column's position by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Looks up a column by name, failing with `ColumnNotFound`.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` listing the available columns.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| Error::column_not_found(name, self.column_names()))
    }

    /// Looks up a numeric column by name.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` or `NonNumericColumn`.
    pub fn require_numeric(&self, name: &str) -> Result<&Column> {
        let column = self.require_column(name)?;
        let actual = column.column_type();
        if actual.is_numeric() {
            Ok(column)
        } else {
            Err(Error::non_numeric(name, actual))
        }
    }

    /// Returns the values of one row, in column order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<Value>> {
        if index >= self.rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.values[index].clone())
                .collect(),
        )
    }

    /// Inserts a column, replacing (in place) any column with the same name.
    ///
    /// The first column of an empty table sets the row count.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the column length does not match.
    pub fn upsert_column(&mut self, column: Column) -> Result<()> {
        if self.columns.is_empty() {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(Error::internal(format!(
                "column {} has {} rows, expected {}",
                column.name(),
                column.len(),
                self.rows
            )));
        }
        match self.column_index(column.name()) {
            Some(index) => self.columns[index] = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Removes a column, keeping the others in order.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` if it does not exist, or
    /// `SingleColumnDeletionRejected` if it is the only column.
    pub fn remove_column(&mut self, name: &str) -> Result<Column> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::column_not_found(name, self.column_names()))?;
        if self.columns.len() == 1 {
            return Err(Error::new(ErrorKind::SingleColumnDeletionRejected {
                column: name.to_string(),
            }));
        }
        Ok(self.columns.remove(index))
    }

    /// Builds a new table holding the given rows, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an internal error if an index is out of range.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self> {
        if let Some(bad) = indices.iter().find(|&&i| i >= self.rows) {
            return Err(Error::internal(format!(
                "row {bad} out of range ({} rows)",
                self.rows
            )));
        }
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: indices.iter().map(|&i| c.values[i].clone()).collect(),
            })
            .collect();
        Ok(Self {
            columns,
            rows: indices.len(),
        })
    }

    /// Removes one row.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the row is out of range.
    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        self.check_row(index)?;
        for column in &mut self.columns {
            column.values.remove(index);
        }
        self.rows -= 1;
        Ok(())
    }

    /// Appends a copy of one row at the end.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the row is out of range.
    pub fn duplicate_row(&mut self, index: usize) -> Result<()> {
        self.check_row(index)?;
        for column in &mut self.columns {
            let value = column.values[index].clone();
            column.values.push_back(value);
        }
        self.rows += 1;
        Ok(())
    }

    /// Overwrites one cell.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the row or column is out of range.
    pub fn set_cell(&mut self, row: usize, column: usize, value: Value) -> Result<()> {
        self.check_row(row)?;
        let count = self.columns.len();
        let target = self.columns.get_mut(column).ok_or_else(|| {
            Error::internal(format!("column {column} out of range ({count} columns)"))
        })?;
        target.values.set(row, value);
        Ok(())
    }

    /// Overwrites every cell with the same value.
    pub fn fill(&mut self, value: &Value) {
        for column in &mut self.columns {
            column.values = std::iter::repeat_n(value.clone(), self.rows).collect();
        }
    }

    /// Reverses the column order.
    pub fn reverse_columns(&mut self) {
        self.columns.reverse();
    }

    /// Renames every column at once.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the count is wrong or the names are not unique.
    pub fn rename_columns(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.columns.len() {
            return Err(Error::internal(format!(
                "expected {} names, got {}",
                self.columns.len(),
                names.len()
            )));
        }
        let unique: HashSet<&String> = names.iter().collect();
        if unique.len() != names.len() {
            return Err(Error::internal("new column names are not unique"));
        }
        for (column, name) in self.columns.iter_mut().zip(names) {
            column.name = name;
        }
        Ok(())
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if index < self.rows {
            Ok(())
        } else {
            Err(Error::internal(format!(
                "row {index} out of range ({} rows)",
                self.rows
            )))
        }
    }
}
