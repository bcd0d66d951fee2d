//! Data assignments and lazy decoding
//!
//! An assignment binds one raw data blob to a type table. The blob is a
//! single string with every cell value separated by [`DATA_SEPARATOR`];
//! the structured views (token vector, row table, name-keyed map) are
//! derived from it on first access and cached for the lifetime of the
//! assignment. Each cache builds at most once, also under concurrent
//! first reads.

use crate::error::{CcdbResult, DecodeError};
use crate::identity::{AssignmentId, Timestamp};
use crate::table::TypeTable;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separator between cell values in raw assignment data.
pub const DATA_SEPARATOR: char = '|';

/// A single data payload bound to one type table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub created: Timestamp,
    data: String,
    table: TypeTable,
    #[serde(skip)]
    string_vector: OnceCell<Vec<String>>,
    #[serde(skip)]
    string_table: OnceCell<Vec<Vec<String>>>,
    #[serde(skip)]
    string_map: OnceCell<HashMap<String, String>>,
}

impl Assignment {
    /// The external loader supplies `data` with token count equal to
    /// rows * columns of the owning table.
    pub fn new(
        id: AssignmentId,
        data: impl Into<String>,
        table: TypeTable,
        created: Timestamp,
    ) -> Self {
        Self {
            id,
            created,
            data: data.into(),
            table,
            string_vector: OnceCell::new(),
            string_table: OnceCell::new(),
            string_map: OnceCell::new(),
        }
    }

    /// Raw encoded data blob.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The type table this assignment belongs to.
    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    /// Data as the flat token sequence.
    ///
    /// `data` split on [`DATA_SEPARATOR`], no trimming, no escaping.
    /// Standard split semantics: an empty blob yields a single
    /// empty-string token.
    pub fn string_vector(&self) -> &[String] {
        self.string_vector
            .get_or_init(|| self.data.split(DATA_SEPARATOR).map(str::to_owned).collect())
    }

    /// Data reshaped into rows of the table's column count.
    ///
    /// Row count is the floor of token count over column count; trailing
    /// tokens beyond a whole number of rows are dropped without
    /// signaling. Fails with [`DecodeError::EmptySchema`] when the table
    /// has no columns.
    pub fn string_table(&self) -> CcdbResult<&[Vec<String>]> {
        let rows = self
            .string_table
            .get_or_try_init(|| self.build_string_table())?;
        Ok(rows.as_slice())
    }

    /// First row of the data keyed by column name.
    ///
    /// This is a single-row view: rows past the first are ignored even
    /// when [`Self::string_table`] holds several. Fails with
    /// [`DecodeError::DataTooShort`] when the token sequence holds less
    /// than one row's worth of values.
    pub fn string_map(&self) -> CcdbResult<&HashMap<String, String>> {
        let map = self.string_map.get_or_try_init(|| self.build_string_map())?;
        Ok(map)
    }

    fn build_string_table(&self) -> Result<Vec<Vec<String>>, DecodeError> {
        let ncols = self.table.ncolumns();
        if ncols == 0 {
            return Err(DecodeError::EmptySchema {
                table: self.table.name.clone(),
            });
        }
        let tokens = self.string_vector();
        let nrows = tokens.len() / ncols;
        Ok((0..nrows)
            .map(|row| tokens[row * ncols..(row + 1) * ncols].to_vec())
            .collect())
    }

    fn build_string_map(&self) -> Result<HashMap<String, String>, DecodeError> {
        let ncols = self.table.ncolumns();
        let tokens = self.string_vector();
        if tokens.len() < ncols {
            return Err(DecodeError::DataTooShort {
                table: self.table.name.clone(),
                expected: ncols,
                actual: tokens.len(),
            });
        }
        let mut map = HashMap::with_capacity(ncols);
        for (column, token) in self.table.columns().iter().zip(tokens) {
            map.insert(column.name.clone(), token.clone());
        }
        Ok(map)
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.created == other.created
            && self.data == other.data
            && self.table == other.table
    }
}

// ============================================================================
// TESTS
// ============================================================================
