//! Cross-module property tests for the CCDB model.

use ccdb_test_utils::{
    assignment_strategy, cell_token, columns_strategy, directory, directory_chain_strategy,
    fixture_timestamp, Assignment, AssignmentId, DirectoryId, DirectoryTree, TableId, TypeTable,
};
use proptest::prelude::*;

/// Assignments whose data holds a whole number of rows plus a partial
/// trailing row, paired with the whole-row count.
fn truncated_assignment_strategy() -> impl Strategy<Value = (Assignment, usize)> {
    columns_strategy(4)
        .prop_flat_map(|columns| {
            let ncols = columns.len();
            (Just(columns), 1..=3usize, 0..ncols)
        })
        .prop_flat_map(|(columns, nrows, extra)| {
            let ncols = columns.len();
            (
                Just(columns),
                Just(nrows),
                prop::collection::vec(cell_token(), nrows * ncols + extra),
            )
        })
        .prop_map(|(columns, nrows, tokens)| {
            let table = TypeTable::new(TableId(1), DirectoryId(1), "props", columns);
            let assignment = Assignment::new(
                AssignmentId(1),
                tokens.join("|"),
                table,
                fixture_timestamp(),
            );
            (assignment, nrows)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Full path equals the '/'-joined ancestor-name chain.
    #[test]
    fn prop_full_path_joins_ancestor_chain(names in directory_chain_strategy(6)) {
        let mut tree = DirectoryTree::new();
        for (position, name) in names.iter().enumerate() {
            tree.insert(directory(position as i32 + 1, position as i32, name)).unwrap();
        }
        for position in 1..names.len() {
            tree.add_subdirectory(
                DirectoryId(position as i32),
                DirectoryId(position as i32 + 1),
            )
            .unwrap();
        }

        let leaf = DirectoryId(names.len() as i32);
        prop_assert_eq!(tree.full_path(leaf).unwrap(), names.join("/"));
    }

    /// The row table has floor(tokens / ncols) rows of exactly ncols cells.
    #[test]
    fn prop_decode_shape(assignment in assignment_strategy(4)) {
        let ncols = assignment.table().ncolumns();
        let ntokens = assignment.string_vector().len();

        let rows = assignment.string_table().unwrap();
        prop_assert_eq!(rows.len(), ntokens / ncols);
        for row in rows {
            prop_assert_eq!(row.len(), ncols);
        }
    }

    /// The name-keyed map always reflects the first row.
    #[test]
    fn prop_string_map_is_first_row(assignment in assignment_strategy(3)) {
        let tokens: Vec<String> = assignment.string_vector().to_vec();
        let map = assignment.string_map().unwrap();

        prop_assert_eq!(map.len(), assignment.table().ncolumns());
        for (position, column) in assignment.table().columns().iter().enumerate() {
            prop_assert_eq!(map.get(&column.name), Some(&tokens[position]));
        }
    }

    /// Tokens beyond a whole number of rows never surface in the row table.
    #[test]
    fn prop_trailing_tokens_are_dropped((assignment, nrows) in truncated_assignment_strategy()) {
        let rows = assignment.string_table().unwrap();
        prop_assert_eq!(rows.len(), nrows);
    }

    /// Rereading a cached view yields the same container, not a rebuild.
    #[test]
    fn prop_views_are_idempotent(assignment in assignment_strategy(3)) {
        let first = assignment.string_vector() as *const _;
        let second = assignment.string_vector() as *const _;
        prop_assert_eq!(first, second);

        let table_first = assignment.string_table().unwrap() as *const _;
        let table_second = assignment.string_table().unwrap() as *const _;
        prop_assert_eq!(table_first, table_second);
    }
}
