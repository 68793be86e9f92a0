//! Shapefile codec.
//!
//! A shapefile is a pair of binary files plus a text companion:
//!
//! * `.shp` - a 100-byte header followed by variable length geometry records;
//! * `.shx` - the same header followed by one fixed size index entry (offset, content length) per record;
//! * `.prj` - coordinate reference system description.
//!
//! The format mixes byte orders: the file code, file length and all record header fields are big-endian, while the
//! version, shape type codes, bounding boxes and coordinates are little-endian. All lengths (file length, record
//! offsets and content lengths) are measured in 16-bit words, not in bytes.
//!
//! [`ShapeWriter`] produces byte-exact files for grid cells, polygons, polylines and 3d points. [`ShapeReader`]
//! decodes records back into [`RawShape`]s, the raw part/vertex arrays the subsetting engine starts from.

mod endian;
pub mod error;
mod header;
mod prj;
mod reader;
mod shape_type;
mod writer;

pub use endian::Endian;
pub use error::ShpError;
pub use header::{FileHeader, FILE_CODE, HEADER_LENGTH, VERSION};
pub use prj::PrjFormat;
pub use reader::{RawShape, ShapeReader};
pub use shape_type::ShapeType;
pub use writer::{ShapeFilePair, ShapeWriter};

/// Converts a byte count into the number of 16-bit words used by the format for lengths and offsets.
pub fn bytes_to_words(bytes: usize) -> Result<i32, ShpError> {
    i32::try_from(bytes / 2).map_err(|_| ShpError::TooLarge)
}
