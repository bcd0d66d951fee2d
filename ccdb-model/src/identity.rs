//! Identity types for CCDB entities
//!
//! All ids are integer database identities assigned by the external
//! data-access layer; this crate never generates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Run number as stored in the database.
pub type RunNumber = i32;

/// Open upper bound of a run range.
pub const INFINITE_RUN: RunNumber = i32::MAX;

macro_rules! db_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }
    };
}

db_id! {
    /// Database id of a directory.
    DirectoryId
}

db_id! {
    /// Database id of a variation.
    VariationId
}

db_id! {
    /// Database id of a constants type table.
    TableId
}

db_id! {
    /// Database id of a type table column.
    ColumnId
}

db_id! {
    /// Database id of a data assignment.
    AssignmentId
}

/// Parent id that marks a directory as root-level.
pub const ROOT_DIRECTORY_ID: DirectoryId = DirectoryId(0);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_integer() {
        assert_eq!(DirectoryId(42).to_string(), "42");
        assert_eq!(AssignmentId(-1).to_string(), "-1");
    }

    #[test]
    fn test_id_from_raw() {
        let id: TableId = 7.into();
        assert_eq!(id, TableId(7));
    }

    #[test]
    fn test_ids_are_ordered_by_raw_value() {
        assert!(DirectoryId(1) < DirectoryId(2));
        assert!(VariationId(10) > VariationId(3));
    }

    #[test]
    fn test_root_directory_id_is_zero() {
        assert_eq!(ROOT_DIRECTORY_ID, DirectoryId(0));
    }
}
