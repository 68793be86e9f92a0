//! Error type of the shapefile codec.

use thiserror::Error;

/// Errors reading or writing shapefiles.
#[derive(Debug, Error)]
pub enum ShpError {
    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The buffer ended before a complete value could be read.
    #[error("unexpected end of data: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        /// Bytes required.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// The header does not start with the shapefile magic number.
    #[error("invalid file code {0}")]
    InvalidFileCode(i32),

    /// Shape type code that the codec does not handle.
    #[error("unsupported shape type code {0}")]
    UnsupportedShapeType(i32),

    /// A record of one shape type was written to a file of another type.
    #[error("shape type mismatch: file is {expected:?}, record is {found:?}")]
    ShapeTypeMismatch {
        /// Shape type of the file.
        expected: crate::ShapeType,
        /// Shape type of the record.
        found: crate::ShapeType,
    },

    /// Lengths do not fit into the 32-bit word counters of the format.
    #[error("file exceeds the maximum shapefile size")]
    TooLarge,

    /// Structurally invalid record.
    #[error("invalid record {record}: {reason}")]
    InvalidRecord {
        /// 1-based record number.
        record: i32,
        /// What is wrong with it.
        reason: String,
    },
}
