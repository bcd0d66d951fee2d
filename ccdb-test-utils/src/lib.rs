//! CCDB Test Utilities
//!
//! Centralized test infrastructure for the CCDB workspace:
//! - Proptest generators for model types
//! - Fixtures for common loader scenarios

// Re-export model types for convenience
pub use ccdb_model::{
    Assignment, AssignmentId, CcdbError, CcdbResult, CellType, ColumnId, DecodeError, Directory,
    DirectoryId, DirectoryTree, RequestError, RunNumber, RunRange, TableId, Timestamp, TreeError,
    TreeKind, TypeTable, TypeTableColumn, ValueError, Variation, VariationId, VariationTree,
    DATA_SEPARATOR, INFINITE_RUN, ROOT_DIRECTORY_ID,
};

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

/// A path segment name: nonempty, separator-free.
pub fn segment_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// A single cell token: never contains the data separator.
pub fn cell_token() -> impl Strategy<Value = String> {
    "[a-z0-9.]{0,6}"
}

pub fn cell_type_strategy() -> impl Strategy<Value = CellType> {
    prop_oneof![
        Just(CellType::Bool),
        Just(CellType::Int),
        Just(CellType::UInt),
        Just(CellType::Long),
        Just(CellType::ULong),
        Just(CellType::Double),
        Just(CellType::String),
    ]
}

/// Column lists with unique names and ordinals matching positions.
pub fn columns_strategy(max_columns: usize) -> impl Strategy<Value = Vec<TypeTableColumn>> {
    prop::collection::hash_set(segment_name(), 1..=max_columns)
        .prop_flat_map(|names| {
            let names: Vec<String> = names.into_iter().collect();
            let count = names.len();
            (
                Just(names),
                prop::collection::vec(cell_type_strategy(), count),
            )
        })
        .prop_map(|(names, cell_types)| {
            names
                .into_iter()
                .zip(cell_types)
                .enumerate()
                .map(|(position, (name, cell_type))| {
                    TypeTableColumn::new(
                        ColumnId(position as i32 + 1),
                        name,
                        position as i32,
                        cell_type,
                    )
                })
                .collect()
        })
}

/// Raw assignment data with exactly `nrows * ncols` tokens.
pub fn data_strategy(nrows: usize, ncols: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(cell_token(), nrows * ncols)
        .prop_map(|tokens| tokens.join(&DATA_SEPARATOR.to_string()))
}

/// Assignments whose data holds a whole number of rows.
pub fn assignment_strategy(max_rows: usize) -> impl Strategy<Value = Assignment> {
    (columns_strategy(6), 1..=max_rows)
        .prop_flat_map(|(columns, nrows)| {
            let ncols = columns.len();
            (Just(columns), Just(nrows), data_strategy(nrows, ncols))
        })
        .prop_map(|(columns, _nrows, data)| {
            let table = TypeTable::new(TableId(1), DirectoryId(1), "props", columns);
            Assignment::new(AssignmentId(1), data, table, fixture_timestamp())
        })
}

/// Chains of unique directory names, root first.
pub fn directory_chain_strategy(max_depth: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(segment_name(), 1..=max_depth)
        .prop_map(|names| names.into_iter().collect())
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Fixed creation/modification stamp used by all fixtures.
pub fn fixture_timestamp() -> Timestamp {
    Utc.with_ymd_and_hms(2014, 3, 24, 12, 0, 0).unwrap()
}

/// A directory record as the external loader would construct it.
pub fn directory(id: i32, parent_id: i32, name: &str) -> Directory {
    Directory {
        id: DirectoryId(id),
        parent_id: DirectoryId(parent_id),
        name: name.to_string(),
        created_time: fixture_timestamp(),
        modified_time: fixture_timestamp(),
        comment: format!("{} directory", name),
    }
}

/// A variation record as the external loader would construct it.
pub fn variation(id: i32, parent_id: i32, name: &str) -> Variation {
    Variation {
        id: VariationId(id),
        parent_id: VariationId(parent_id),
        name: name.to_string(),
    }
}

/// The classic loader result: an empty-named database root holding
/// `/test/test_vars` and `/calib`.
pub fn sample_directory_tree() -> DirectoryTree {
    let mut tree = DirectoryTree::new();
    tree.insert(directory(1, 0, "")).unwrap();
    tree.insert(directory(2, 1, "test")).unwrap();
    tree.insert(directory(3, 2, "test_vars")).unwrap();
    tree.insert(directory(4, 1, "calib")).unwrap();
    tree.add_subdirectory(DirectoryId(1), DirectoryId(2)).unwrap();
    tree.add_subdirectory(DirectoryId(2), DirectoryId(3)).unwrap();
    tree.add_subdirectory(DirectoryId(1), DirectoryId(4)).unwrap();
    tree
}

/// A two-column double table inside `/test/test_vars`.
pub fn sample_table() -> TypeTable {
    TypeTable::new(
        TableId(10),
        DirectoryId(3),
        "test_table",
        vec![
            TypeTableColumn::new(ColumnId(1), "x", 0, CellType::Double),
            TypeTableColumn::new(ColumnId(2), "y", 1, CellType::Double),
        ],
    )
}

/// One row of data for [`sample_table`].
pub fn single_row_assignment() -> Assignment {
    Assignment::new(
        AssignmentId(100),
        "1.11|2.22",
        sample_table(),
        fixture_timestamp(),
    )
}

/// Two rows of data for [`sample_table`].
pub fn multi_row_assignment() -> Assignment {
    Assignment::new(
        AssignmentId(101),
        "1.1|2.1|1.2|2.2",
        sample_table(),
        fixture_timestamp(),
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_tree_paths() {
        let tree = sample_directory_tree();
        assert_eq!(tree.full_path(DirectoryId(1)).unwrap(), "");
        assert_eq!(tree.full_path(DirectoryId(3)).unwrap(), "/test/test_vars");
        assert_eq!(tree.full_path(DirectoryId(4)).unwrap(), "/calib");
    }

    #[test]
    fn test_sample_table_path() {
        let tree = sample_directory_tree();
        let table = sample_table();
        assert_eq!(
            table.full_path(&tree).unwrap(),
            "/test/test_vars/test_table"
        );
    }

    #[test]
    fn test_single_row_assignment_decodes() {
        let assignment = single_row_assignment();
        assert_eq!(assignment.string_vector().len(), 2);
        assert_eq!(assignment.string_map().unwrap()["x"], "1.11");
    }

    #[test]
    fn test_multi_row_assignment_decodes() {
        let assignment = multi_row_assignment();
        assert_eq!(assignment.string_table().unwrap().len(), 2);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Generated column lists keep ordinals equal to positions.
        #[test]
        fn prop_columns_have_matching_ordinals(columns in columns_strategy(6)) {
            for (position, column) in columns.iter().enumerate() {
                prop_assert_eq!(column.index as usize, position);
            }
        }

        /// Generated data always splits back into the requested token count.
        #[test]
        fn prop_data_token_count(assignment in assignment_strategy(4)) {
            let ncols = assignment.table().ncolumns();
            prop_assert_eq!(assignment.string_vector().len() % ncols, 0);
        }
    }
}
