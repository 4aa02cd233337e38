/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw attribute row: column name to cell value
pub type RawRow = Map<String, Value>;

/// Key column of the per-instrument `description` block
pub const DESCRIPTION_KEY_COLUMN: &str = "name";
/// Value column of the per-instrument `description` block
pub const DESCRIPTION_VALUE_COLUMN: &str = "value";

/// A single ISS data block
///
/// Every block of an ISS JSON response has the same column-oriented layout:
///
/// ```json
/// { "columns": ["SECID", "SECNAME"], "data": [["SU26238RMFS4", "OFZ 26238"]] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssTable {
    /// Column names, in cell order
    pub columns: Vec<String>,
    /// Rows of cells
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl IssTable {
    /// Creates a table from columns and rows
    pub fn new(columns: Vec<String>, data: Vec<Vec<Value>>) -> Self {
        Self { columns, data }
    }

    /// Extracts the block named `block` from a decoded ISS response
    ///
    /// # Errors
    /// * `AppError::MissingBlock` - the response has no such block
    /// * `AppError::Json` - the block is not a columns/data table
    pub fn from_response(response: &Value, block: &str) -> AppResult<Self> {
        let raw = response
            .get(block)
            .ok_or_else(|| AppError::MissingBlock(block.to_string()))?;
        Ok(serde_json::from_value(raw.clone())?)
    }

    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the table carries no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Position of `name` in the column list
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Checks that every column in `required` is present
    ///
    /// # Errors
    /// `AppError::Schema` naming the first missing column
    pub fn require_columns(&self, schema: &str, required: &[&str]) -> AppResult<()> {
        match required
            .iter()
            .find(|column| self.column_index(column).is_none())
        {
            Some(missing) => Err(AppError::schema(schema, *missing)),
            None => Ok(()),
        }
    }

    /// Converts the data into keyed rows
    ///
    /// Every row carries every column; cells missing from a short row become `null`.
    #[must_use]
    pub fn rows(&self) -> Vec<RawRow> {
        self.data
            .iter()
            .map(|cells| {
                self.columns
                    .iter()
                    .enumerate()
                    .map(|(idx, column)| {
                        (column.clone(), cells.get(idx).cloned().unwrap_or(Value::Null))
                    })
                    .collect()
            })
            .collect()
    }

    /// Folds a key/value block into a single row
    ///
    /// The per-instrument `description` block lists one attribute per data row
    /// (`name`, `title`, `value`, `type`, ...). Pivoting it on `key_column` and
    /// `value_column` yields one row keyed by attribute code, so it can go
    /// through the same normalizer as the bulk securities list.
    ///
    /// # Errors
    /// `AppError::Schema` if either column is absent
    pub fn pivot(&self, schema: &str, key_column: &str, value_column: &str) -> AppResult<RawRow> {
        let key_idx = self
            .column_index(key_column)
            .ok_or_else(|| AppError::schema(schema, key_column))?;
        let value_idx = self
            .column_index(value_column)
            .ok_or_else(|| AppError::schema(schema, value_column))?;

        let mut row = RawRow::new();
        for cells in &self.data {
            if let Some(Value::String(key)) = cells.get(key_idx) {
                let value = cells.get(value_idx).cloned().unwrap_or(Value::Null);
                row.insert(key.clone(), value);
            }
        }
        Ok(row)
    }
}

impl std::fmt::Display for IssTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use prettytable::format;
        use prettytable::{Cell, Row, Table};

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.add_row(Row::new(
            self.columns.iter().map(|column| Cell::new(column)).collect(),
        ));
        for cells in &self.data {
            table.add_row(Row::new(
                cells
                    .iter()
                    .map(|cell| match cell {
                        Value::String(text) => Cell::new(text),
                        Value::Null => Cell::new("-"),
                        other => Cell::new(&other.to_string()),
                    })
                    .collect(),
            ));
        }
        write!(f, "{}", table)
    }
}
