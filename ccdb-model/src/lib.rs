//! CCDB Model - Client-side object graph
//!
//! Pure data structures for the calibration-constants database client:
//! directory and variation trees, typed constants tables, and assignments
//! with lazily decoded data views. Database access, networking, and
//! persistence live in other layers; an external loader constructs these
//! records with final field values and wires them into trees through the
//! attach operations.

pub mod assignment;
pub mod cell_type;
pub mod directory;
pub mod error;
pub mod identity;
pub mod path;
pub mod request;
pub mod run_range;
pub mod table;
pub mod typed;
pub mod variation;

pub use assignment::{Assignment, DATA_SEPARATOR};
pub use cell_type::{CellType, CellTypeParseError};
pub use directory::{Directory, DirectoryTree};
pub use error::{
    CcdbError, CcdbResult, DecodeError, RequestError, TreeError, TreeKind, ValueError,
};
pub use identity::{
    AssignmentId, ColumnId, DirectoryId, RunNumber, TableId, Timestamp, VariationId, INFINITE_RUN,
    ROOT_DIRECTORY_ID,
};
pub use path::PATH_SEPARATOR;
pub use request::{ConstantsRequest, ResolvedRequest, DEFAULT_VARIATION};
pub use run_range::{RunRange, RunRangeParseError};
pub use table::{TypeTable, TypeTableColumn};
pub use typed::FromCell;
pub use variation::{Variation, VariationTree};
