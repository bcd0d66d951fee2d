//! Error types for CCDB model operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discriminates the two parallel tree structures in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeKind {
    Directory,
    Variation,
}

/// Tree assembly errors.
///
/// Attach operations fail fast instead of corrupting the tree: the source
/// of a structural misuse (re-attach, cycle, dangling id) is always the
/// external loader, and the tree is left unchanged on every error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("{kind:?} not found in tree: id {id}")]
    UnknownNode { kind: TreeKind, id: i32 },

    #[error("{kind:?} already inserted: id {id}")]
    DuplicateNode { kind: TreeKind, id: i32 },

    #[error("{kind:?} {child} is already attached to a parent")]
    AlreadyAttached { kind: TreeKind, child: i32 },

    #[error("Attaching {kind:?} {child} under {parent} would create a cycle")]
    CycleDetected { kind: TreeKind, child: i32, parent: i32 },
}

/// Assignment decoding errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Type table '{table}' has no columns, cannot shape rows")]
    EmptySchema { table: String },

    #[error(
        "Assignment data for table '{table}' is too short: {actual} tokens, need at least {expected}"
    )]
    DataTooShort {
        table: String,
        expected: usize,
        actual: usize,
    },
}

/// Namepath request parsing errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Request has an empty data path")]
    EmptyPath,

    #[error("Invalid run number in request: '{0}'")]
    BadRunNumber(String),

    #[error("Invalid time in request: '{0}'")]
    BadTime(String),

    #[error("Request has too many ':'-separated sections: {0}")]
    TooManySections(usize),
}

/// Typed readout errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("Cannot parse '{value}' in column '{column}'")]
    ParseFailed { column: String, value: String },

    #[error("Assignment for table '{table}' has no rows")]
    NoRows { table: String },

    #[error("Assignment for table '{table}' has {rows} rows, single-row readout needs exactly one")]
    MultipleRows { table: String, rows: usize },
}

/// Master error type for all CCDB model errors.
#[derive(Debug, Clone, Error)]
pub enum CcdbError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Value error: {0}")]
    Value(#[from] ValueError),
}

/// Result type alias for CCDB model operations.
pub type CcdbResult<T> = Result<T, CcdbError>;

// ============================================================================
// TESTS
// ============================================================================
