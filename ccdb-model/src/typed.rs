//! Typed readout of assignment data
//!
//! The decoded views keep every cell as a string; this module parses
//! them into caller-chosen value types, one [`FromCell`] implementation
//! per supported representation. Parse failures identify the offending
//! column and token.

use crate::assignment::Assignment;
use crate::error::{CcdbResult, ValueError};
use std::collections::HashMap;

/// A value type that can be read out of one cell token.
pub trait FromCell: Sized {
    /// Parse one cell token; `None` when the token is not a valid value.
    fn from_cell(cell: &str) -> Option<Self>;
}

impl FromCell for String {
    fn from_cell(cell: &str) -> Option<Self> {
        Some(cell.to_string())
    }
}

impl FromCell for bool {
    /// Accepts "true"/"false" and "1"/"0", case-insensitive.
    fn from_cell(cell: &str) -> Option<Self> {
        match cell.to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

macro_rules! from_cell_via_parse {
    ($($kind:ty),+) => {
        $(
            impl FromCell for $kind {
                fn from_cell(cell: &str) -> Option<Self> {
                    cell.parse().ok()
                }
            }
        )+
    };
}

from_cell_via_parse!(i32, u32, i64, u64, f64);

impl Assignment {
    /// Whole data table parsed cell by cell.
    pub fn typed_table<T: FromCell>(&self) -> CcdbResult<Vec<Vec<T>>> {
        let rows = self.string_table()?;
        if rows.is_empty() {
            return Err(ValueError::NoRows {
                table: self.table().name.clone(),
            }
            .into());
        }
        let mut parsed = Vec::with_capacity(rows.len());
        for row in rows {
            parsed.push(self.parse_row(row)?);
        }
        Ok(parsed)
    }

    /// Single data row parsed cell by cell.
    ///
    /// Multi-row assignments fail with [`ValueError::MultipleRows`]; use
    /// [`Self::typed_table`] for those.
    pub fn typed_vector<T: FromCell>(&self) -> CcdbResult<Vec<T>> {
        let rows = self.string_table()?;
        match rows.len() {
            0 => Err(ValueError::NoRows {
                table: self.table().name.clone(),
            }
            .into()),
            1 => self.parse_row(&rows[0]),
            rows => Err(ValueError::MultipleRows {
                table: self.table().name.clone(),
                rows,
            }
            .into()),
        }
    }

    /// First data row parsed and keyed by column name.
    pub fn typed_map<T: FromCell>(&self) -> CcdbResult<HashMap<String, T>> {
        let raw = self.string_map()?;
        let mut parsed = HashMap::with_capacity(raw.len());
        for (column, token) in raw {
            let value = T::from_cell(token).ok_or_else(|| ValueError::ParseFailed {
                column: column.clone(),
                value: token.clone(),
            })?;
            parsed.insert(column.clone(), value);
        }
        Ok(parsed)
    }

    fn parse_row<T: FromCell>(&self, row: &[String]) -> CcdbResult<Vec<T>> {
        let mut parsed = Vec::with_capacity(row.len());
        for (cell, column) in row.iter().zip(self.table().columns()) {
            let value = T::from_cell(cell).ok_or_else(|| ValueError::ParseFailed {
                column: column.name.clone(),
                value: cell.clone(),
            })?;
            parsed.push(value);
        }
        Ok(parsed)
    }
}

// ============================================================================
// TESTS
// ============================================================================
