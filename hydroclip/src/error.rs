//! Error types used by the crate.

use hydroclip_shp::ShpError;
use hydroclip_types::error::HydroclipTypesError;
use thiserror::Error;

/// Hydroclip error type.
///
/// Degenerate geometry and failed lookups are never reported through this type: shapes that lose all their
/// contours are silently excluded, and lookups return `None` or zero.
#[derive(Debug, Error)]
pub enum HydroclipError {
    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Shapefile encoding or decoding failed.
    #[error("shapefile error: {0}")]
    Shp(#[from] ShpError),
    /// Invalid geometry parameters.
    #[error("geometry error: {0}")]
    Geometry(#[from] HydroclipTypesError),
    /// CSV reading or writing failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Attribute table column with this name already exists.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
    /// Attribute table column does not exist.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    /// Column exists but holds values of a different type.
    #[error("column '{column}' holds {actual} values, {expected} expected")]
    ColumnType {
        /// Name of the column.
        column: String,
        /// Type the operation needs.
        expected: &'static str,
        /// Type the column holds.
        actual: &'static str,
    },
    /// Row has a different number of cells than the table has columns.
    #[error("row has {actual} cells, table has {expected} columns")]
    RowLength {
        /// Number of columns.
        expected: usize,
        /// Number of cells given.
        actual: usize,
    },
    /// A cell value is missing (for example, NaN in a double column).
    #[error("missing value in column '{0}'")]
    MissingValue(String),
    /// Length of a mask or derived column does not match the number of rows.
    #[error("expected {expected} values, got {actual}")]
    LengthMismatch {
        /// Number of rows of the table.
        expected: usize,
        /// Number of values given.
        actual: usize,
    },
    /// Polygon triangulation failed.
    #[error("triangulation failed: {0}")]
    Triangulation(String),
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}
