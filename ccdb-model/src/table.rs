//! Constants type tables
//!
//! A type table is the schema of one set of constants: an ordered list of
//! typed columns living inside a directory. The name-indexed column
//! lookup is built once on first access and reused for the lifetime of
//! the table; `columns` is treated as immutable after construction.

use crate::cell_type::CellType;
use crate::directory::DirectoryTree;
use crate::error::CcdbResult;
use crate::identity::{ColumnId, DirectoryId, TableId};
use crate::path;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One typed column of a type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTableColumn {
    pub id: ColumnId,
    pub name: String,
    /// Ordinal of the column; equals its position in the owning table's
    /// column sequence.
    pub index: i32,
    pub cell_type: CellType,
}

impl TypeTableColumn {
    pub fn new(id: ColumnId, name: impl Into<String>, index: i32, cell_type: CellType) -> Self {
        Self {
            id,
            name: name.into(),
            index,
            cell_type,
        }
    }
}

/// Schema object for one set of constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeTable {
    pub id: TableId,
    /// Non-owning reference to the directory containing this table.
    pub directory_id: DirectoryId,
    pub name: String,
    columns: Vec<TypeTableColumn>,
    #[serde(skip)]
    columns_by_name: OnceCell<HashMap<String, usize>>,
}

impl TypeTable {
    pub fn new(
        id: TableId,
        directory_id: DirectoryId,
        name: impl Into<String>,
        columns: Vec<TypeTableColumn>,
    ) -> Self {
        Self {
            id,
            directory_id,
            name: name.into(),
            columns,
            columns_by_name: OnceCell::new(),
        }
    }

    /// Ordered column sequence.
    pub fn columns(&self) -> &[TypeTableColumn] {
        &self.columns
    }

    pub fn ncolumns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    /// Name-indexed lookup over the column sequence.
    ///
    /// Built on first access by inserting columns in order, so a later
    /// column with a colliding name wins. Column names are expected to be
    /// unique within a table; uniqueness is not enforced. The map is
    /// cached for the lifetime of the table and never rebuilt.
    pub fn columns_by_name(&self) -> &HashMap<String, usize> {
        self.columns_by_name.get_or_init(|| {
            let mut by_name = HashMap::with_capacity(self.columns.len());
            for (position, column) in self.columns.iter().enumerate() {
                by_name.insert(column.name.clone(), position);
            }
            by_name
        })
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&TypeTableColumn> {
        self.columns_by_name()
            .get(name)
            .map(|&position| &self.columns[position])
    }

    /// Directory full path combined with the table name.
    pub fn full_path(&self, directories: &DirectoryTree) -> CcdbResult<String> {
        let parent = directories.full_path(self.directory_id)?;
        Ok(path::combine(&parent, &self.name))
    }
}

impl PartialEq for TypeTable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.directory_id == other.directory_id
            && self.name == other.name
            && self.columns == other.columns
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Directory;
    use crate::error::{CcdbError, TreeError};
    use crate::identity::ROOT_DIRECTORY_ID;
    use chrono::{TimeZone, Utc};

    fn column(id: i32, name: &str, index: i32, cell_type: CellType) -> TypeTableColumn {
        TypeTableColumn::new(ColumnId(id), name, index, cell_type)
    }

    fn table(columns: Vec<TypeTableColumn>) -> TypeTable {
        TypeTable::new(TableId(10), DirectoryId(1), "pedestals", columns)
    }

    #[test]
    fn test_columns_by_name_maps_every_column() {
        let table = table(vec![
            column(1, "a", 0, CellType::Int),
            column(2, "b", 1, CellType::String),
        ]);

        let by_name = table.columns_by_name();
        assert_eq!(by_name.len(), 2);
        assert_eq!(table.column("a").unwrap().id, ColumnId(1));
        assert_eq!(table.column("b").unwrap().cell_type, CellType::String);
        assert!(table.column("c").is_none());
    }

    #[test]
    fn test_columns_by_name_last_write_wins_on_collision() {
        let table = table(vec![
            column(1, "dup", 0, CellType::Int),
            column(2, "dup", 1, CellType::Double),
        ]);

        assert_eq!(table.columns_by_name().len(), 1);
        assert_eq!(table.column("dup").unwrap().id, ColumnId(2));
    }

    #[test]
    fn test_columns_by_name_is_built_once() {
        let table = table(vec![column(1, "a", 0, CellType::Int)]);
        let first = table.columns_by_name() as *const _;
        let second = table.columns_by_name() as *const _;
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_path_combines_directory_and_table_name() {
        let stamp = Utc.with_ymd_and_hms(2014, 3, 24, 12, 0, 0).unwrap();
        let mut directories = DirectoryTree::new();
        directories
            .insert(Directory {
                id: DirectoryId(1),
                parent_id: ROOT_DIRECTORY_ID,
                name: "calib".to_string(),
                created_time: stamp,
                modified_time: stamp,
                comment: String::new(),
            })
            .unwrap();

        let table = table(vec![column(1, "a", 0, CellType::Int)]);
        assert_eq!(table.full_path(&directories).unwrap(), "calib/pedestals");
    }

    #[test]
    fn test_full_path_with_unknown_directory() {
        let directories = DirectoryTree::new();
        let table = table(vec![]);
        let result = table.full_path(&directories);
        assert!(matches!(
            result,
            Err(CcdbError::Tree(TreeError::UnknownNode { id: 1, .. }))
        ));
    }

    #[test]
    fn test_equality_ignores_cache_state() {
        let left = table(vec![column(1, "a", 0, CellType::Int)]);
        let right = table(vec![column(1, "a", 0, CellType::Int)]);
        left.columns_by_name();
        assert_eq!(left, right);
    }
}
