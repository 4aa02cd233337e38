/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Security lookup normalizer
//!
//! ISS returns instrument attributes in two shapes: the bulk `securities`
//! list (one row per instrument) and the per-instrument `description` block
//! (one row per attribute, pivoted by [`IssTable::pivot`] into a single row).
//! A [`SecuritySchema`] names the columns each shape uses, so one
//! [`normalize`] routine serves both.

use crate::constants::NOT_AVAILABLE;
use crate::error::{AppError, AppResult, SkipReason};
use crate::model::responses::{IssTable, RawRow};
use crate::utils::parsing::{NULL, value_to_decimal, value_to_string};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A column a schema reads an attribute from
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaColumn {
    /// Column name in the raw rows
    pub name: String,
    /// Whether the column must be present in every row
    pub required: bool,
}

impl SchemaColumn {
    /// A column whose absence is a schema error
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    /// A column read when present and treated as an empty value otherwise
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// Field-name table mapping `SecurityRecord` attributes to raw columns
///
/// `None` means the shape does not carry the attribute at all.
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecuritySchema {
    /// Schema name, reported in schema errors
    pub name: String,
    /// Identifier column, always required
    pub id: String,
    /// Display name column
    pub display_name: SchemaColumn,
    /// Maturity date column
    pub maturity_date: Option<SchemaColumn>,
    /// Face value column
    pub face_value: Option<SchemaColumn>,
    /// Currency column
    pub currency_code: Option<SchemaColumn>,
    /// Coupon value column
    pub coupon_value: Option<SchemaColumn>,
}

impl SecuritySchema {
    /// The `securities` block of `engines/stock/markets/bonds/securities.json`
    #[must_use]
    pub fn bulk() -> Self {
        Self {
            name: "bulk".to_string(),
            id: "SECID".to_string(),
            display_name: SchemaColumn::required("SECNAME"),
            maturity_date: Some(SchemaColumn::required("MATDATE")),
            face_value: Some(SchemaColumn::required("FACEVALUE")),
            currency_code: Some(SchemaColumn::required("CURRENCYID")),
            coupon_value: Some(SchemaColumn::required("COUPONVALUE")),
        }
    }

    /// The pivoted `description` block of `securities/<id>.json`
    ///
    /// The description only lists attributes that are filled for the
    /// instrument, so everything but the identifier and name is optional.
    #[must_use]
    pub fn description() -> Self {
        Self {
            name: "description".to_string(),
            id: "SECID".to_string(),
            display_name: SchemaColumn::required("NAME"),
            maturity_date: Some(SchemaColumn::optional("MATDATE")),
            face_value: Some(SchemaColumn::optional("FACEVALUE")),
            currency_code: Some(SchemaColumn::optional("FACEUNIT")),
            coupon_value: Some(SchemaColumn::optional("COUPONVALUE")),
        }
    }

    /// Names of the columns every row must carry
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns = vec![self.id.as_str()];
        let declared = [
            Some(&self.display_name),
            self.maturity_date.as_ref(),
            self.face_value.as_ref(),
            self.currency_code.as_ref(),
            self.coupon_value.as_ref(),
        ];
        columns.extend(
            declared
                .into_iter()
                .flatten()
                .filter(|column| column.required)
                .map(|column| column.name.as_str()),
        );
        columns
    }

    fn check_row(&self, row: &RawRow) -> AppResult<()> {
        match self
            .required_columns()
            .into_iter()
            .find(|column| !row.contains_key(*column))
        {
            Some(missing) => Err(AppError::schema(&self.name, missing)),
            None => Ok(()),
        }
    }
}

/// Canonical reference data for one instrument
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityRecord {
    /// Instrument identifier (SECID / ISIN)
    pub id: String,
    /// Human readable name
    pub display_name: String,
    /// Maturity date as `YYYY-MM-DD`, or `N/A`
    pub maturity_date: String,
    /// Face value, `None` when the schema does not carry it
    pub face_value: Option<Decimal>,
    /// Face value currency, `None` when the schema does not carry it
    pub currency_code: Option<String>,
    /// Size of the current coupon
    pub coupon_value: Decimal,
}

impl SecurityRecord {
    fn from_row(id: String, row: &RawRow, schema: &SecuritySchema) -> Self {
        let text = |column: &SchemaColumn| {
            row.get(&column.name)
                .and_then(value_to_string)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        let number = |column: &SchemaColumn| {
            let value = row.get(&column.name).unwrap_or(&NULL);
            value_to_decimal(value).unwrap_or_else(|e| {
                warn!("{}: column {} of {}: {}, using 0", schema.name, column.name, id, e);
                None
            })
            .unwrap_or(Decimal::ZERO)
        };

        SecurityRecord {
            display_name: text(&schema.display_name),
            maturity_date: schema
                .maturity_date
                .as_ref()
                .map(text)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            face_value: schema.face_value.as_ref().map(number),
            currency_code: schema.currency_code.as_ref().map(text),
            coupon_value: schema
                .coupon_value
                .as_ref()
                .map(number)
                .unwrap_or(Decimal::ZERO),
            id,
        }
    }
}

/// Normalized records keyed by identifier, in discovery order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Securities {
    records: Vec<SecurityRecord>,
    index: HashMap<String, usize>,
}

impl Securities {
    /// Creates an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record
    ///
    /// A record with an already known id replaces the old one and keeps its position.
    pub fn insert(&mut self, record: SecurityRecord) {
        match self.index.get(&record.id) {
            Some(&position) => self.records[position] = record,
            None => {
                self.index.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Appends every record of `other`
    pub fn merge(&mut self, other: Securities) {
        for record in other.records {
            self.insert(record);
        }
    }

    /// Looks a record up by identifier
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SecurityRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// Returns true if a record with `id` is present
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &SecurityRecord> {
        self.records.iter()
    }

    /// Consumes the collection, returning records in discovery order
    #[must_use]
    pub fn into_records(self) -> Vec<SecurityRecord> {
        self.records
    }
}

impl IntoIterator for Securities {
    type Item = SecurityRecord;
    type IntoIter = std::vec::IntoIter<SecurityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Builds one `SecurityRecord` per requested identifier found in `rows`
///
/// Rows whose identifier is not in `requested` are dropped. Missing numeric
/// values become 0 and missing strings become `N/A`.
///
/// # Errors
/// `AppError::Schema` if any row lacks a required column of `schema`. No
/// partial result is returned.
pub fn normalize(
    rows: &[RawRow],
    requested: &HashSet<String>,
    schema: &SecuritySchema,
) -> AppResult<Securities> {
    let mut securities = Securities::new();

    for row in rows {
        schema.check_row(row)?;

        let Some(id) = row.get(&schema.id).and_then(value_to_string) else {
            debug!("{}: row without identifier skipped", schema.name);
            continue;
        };
        if !requested.contains(&id) {
            debug!("{}: {}", schema.name, SkipReason::UnknownIdentifier(id));
            continue;
        }

        securities.insert(SecurityRecord::from_row(id, row, schema));
    }

    Ok(securities)
}

/// Normalizes every row of an ISS table
///
/// The column set is checked before any row, so a reshaped response is
/// rejected even when it carries no data.
///
/// # Errors
/// `AppError::Schema` if a required column is missing
pub fn normalize_table(
    table: &IssTable,
    requested: &HashSet<String>,
    schema: &SecuritySchema,
) -> AppResult<Securities> {
    table.require_columns(&schema.name, &schema.required_columns())?;
    normalize(&table.rows(), requested, schema)
}
