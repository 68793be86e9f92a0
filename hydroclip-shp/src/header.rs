use bytes::{Buf, BufMut};
use hydroclip_types::cartesian::Rect;

use crate::endian::Endian;
use crate::error::ShpError;
use crate::shape_type::ShapeType;

/// Magic number at the start of both `.shp` and `.shx` files.
pub const FILE_CODE: i32 = 9994;
/// Format version written into the header.
pub const VERSION: i32 = 1000;
/// Size of the file header in bytes.
pub const HEADER_LENGTH: usize = 100;

const UNUSED_FIELDS: usize = 5;

/// File header shared by the main and the index files.
///
/// Layout (offsets in bytes):
///
/// | offset | field        | order  |
/// |--------|--------------|--------|
/// | 0      | file code    | big    |
/// | 4..24  | unused       | big    |
/// | 24     | file length  | big    |
/// | 28     | version      | little |
/// | 32     | shape type   | little |
/// | 36..68 | x/y bounds   | little |
/// | 68..84 | z range      | little |
/// | 84..100| m range      | little |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileHeader {
    /// Length of the whole file in 16-bit words, header included.
    pub file_length: i32,
    /// Type of all the shapes in the file.
    pub shape_type: ShapeType,
    /// Bounding box of all the shapes.
    pub bbox: Rect,
    /// Minimum and maximum z. Zero for shape types without z.
    pub z_range: (f64, f64),
    /// Minimum and maximum measure.
    pub m_range: (f64, f64),
}

impl FileHeader {
    /// Writes exactly [`HEADER_LENGTH`] bytes.
    pub fn write(&self, buf: &mut impl BufMut) {
        Endian::Big.put_i32(buf, FILE_CODE);
        for _ in 0..UNUSED_FIELDS {
            Endian::Big.put_i32(buf, 0);
        }
        Endian::Big.put_i32(buf, self.file_length);
        Endian::Little.put_i32(buf, VERSION);
        Endian::Little.put_i32(buf, self.shape_type.code());
        put_bbox(buf, &self.bbox);
        Endian::Little.put_f64(buf, self.z_range.0);
        Endian::Little.put_f64(buf, self.z_range.1);
        Endian::Little.put_f64(buf, self.m_range.0);
        Endian::Little.put_f64(buf, self.m_range.1);
    }

    /// Reads the header from the start of the buffer.
    pub fn read(buf: &mut impl Buf) -> Result<Self, ShpError> {
        if buf.remaining() < HEADER_LENGTH {
            return Err(ShpError::UnexpectedEof {
                needed: HEADER_LENGTH,
                available: buf.remaining(),
            });
        }

        let file_code = Endian::Big.get_i32(buf)?;
        if file_code != FILE_CODE {
            return Err(ShpError::InvalidFileCode(file_code));
        }

        for _ in 0..UNUSED_FIELDS {
            Endian::Big.get_i32(buf)?;
        }

        let file_length = Endian::Big.get_i32(buf)?;
        let version = Endian::Little.get_i32(buf)?;
        if version != VERSION {
            log::warn!("Unexpected shapefile version {version}");
        }

        let code = Endian::Little.get_i32(buf)?;
        let shape_type = ShapeType::from_code(code).ok_or(ShpError::UnsupportedShapeType(code))?;
        let bbox = get_bbox(buf)?;
        let z_range = (Endian::Little.get_f64(buf)?, Endian::Little.get_f64(buf)?);
        let m_range = (Endian::Little.get_f64(buf)?, Endian::Little.get_f64(buf)?);

        Ok(Self {
            file_length,
            shape_type,
            bbox,
            z_range,
            m_range,
        })
    }
}

pub(crate) fn put_bbox(buf: &mut impl BufMut, bbox: &Rect) {
    Endian::Little.put_f64(buf, bbox.x_min());
    Endian::Little.put_f64(buf, bbox.y_min());
    Endian::Little.put_f64(buf, bbox.x_max());
    Endian::Little.put_f64(buf, bbox.y_max());
}

pub(crate) fn get_bbox(buf: &mut impl Buf) -> Result<Rect, ShpError> {
    let x_min = Endian::Little.get_f64(buf)?;
    let y_min = Endian::Little.get_f64(buf)?;
    let x_max = Endian::Little.get_f64(buf)?;
    let y_max = Endian::Little.get_f64(buf)?;
    Ok(Rect::new(x_min, y_min, x_max, y_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn header() -> FileHeader {
        FileHeader {
            file_length: 50,
            shape_type: ShapeType::PointZ,
            bbox: Rect::new(-1.5, 2.25, 3.0, 4.125),
            z_range: (-10.0, 10.0),
            m_range: (0.0, 0.0),
        }
    }

    #[test]
    fn header_is_100_bytes_with_fixed_offsets() {
        let mut buf = Vec::new();
        header().write(&mut buf);

        assert_eq!(buf.len(), HEADER_LENGTH);
        assert_eq!(&buf[0..4], &9994i32.to_be_bytes());
        assert!(buf[4..24].iter().all(|b| *b == 0));
        assert_eq!(&buf[24..28], &50i32.to_be_bytes());
        assert_eq!(&buf[28..32], &1000i32.to_le_bytes());
        assert_eq!(&buf[32..36], &11i32.to_le_bytes());
        assert_eq!(&buf[36..44], &(-1.5f64).to_le_bytes());
        assert_eq!(&buf[60..68], &4.125f64.to_le_bytes());
        assert_eq!(&buf[68..76], &(-10.0f64).to_le_bytes());
    }

    #[test]
    fn read_back() {
        let mut buf = Vec::new();
        header().write(&mut buf);
        assert_eq!(FileHeader::read(&mut &buf[..]).unwrap(), header());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut buf = Vec::new();
        header().write(&mut buf);
        buf[3] = 0;
        assert_matches!(
            FileHeader::read(&mut &buf[..]),
            Err(ShpError::InvalidFileCode(_))
        );
        assert_matches!(
            FileHeader::read(&mut &buf[..10]),
            Err(ShpError::UnexpectedEof { .. })
        );
    }
}
