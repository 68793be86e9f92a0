use std::fs;
use std::path::{Path, PathBuf};

use bytes::{BufMut, Bytes, BytesMut};
use hydroclip_types::cartesian::{CartesianPoint2d, CartesianPoint3d, Point2d, Point3d, Rect};
use hydroclip_types::{Contour, Polygon, Polyline};

use crate::endian::Endian;
use crate::error::ShpError;
use crate::header::{put_bbox, FileHeader, HEADER_LENGTH};
use crate::shape_type::ShapeType;
use crate::bytes_to_words;

const RECORD_HEADER_LENGTH: usize = 8;
const INDEX_RECORD_LENGTH: usize = 8;

/// Encoded `.shp` and `.shx` contents.
#[derive(Debug, Clone)]
pub struct ShapeFilePair {
    /// Main file.
    pub shp: Bytes,
    /// Index file.
    pub shx: Bytes,
}

impl ShapeFilePair {
    /// Writes `<base>.shp` and `<base>.shx`. Returns the paths that were written.
    ///
    /// A failed write leaves neither file behind, whichever of the two failed.
    pub fn save(&self, base: &Path) -> Result<Vec<PathBuf>, ShpError> {
        let shp_path = base.with_extension("shp");
        let shx_path = base.with_extension("shx");

        write_or_remove(&shp_path, &self.shp)?;
        if let Err(e) = write_or_remove(&shx_path, &self.shx) {
            let _ = fs::remove_file(&shp_path);
            return Err(e);
        }

        Ok(vec![shp_path, shx_path])
    }
}

fn write_or_remove(path: &Path, contents: &[u8]) -> Result<(), ShpError> {
    fs::write(path, contents).map_err(|e| {
        if path.is_file() {
            let _ = fs::remove_file(path);
        }
        ShpError::from(e)
    })
}

/// Incremental writer of a shapefile main/index file pair.
///
/// All records of one writer share the shape type given to [`ShapeWriter::new`]. Records are numbered from 1 in the
/// order they are added; a record that has no geometry left is written as a null shape so the record numbers stay
/// aligned with the rows of the attribute table.
#[derive(Debug)]
pub struct ShapeWriter {
    shape_type: ShapeType,
    shp: BytesMut,
    shx: BytesMut,
    bbox: Option<Rect>,
    z_range: Option<(f64, f64)>,
    record_count: i32,
}

impl ShapeWriter {
    /// Creates a writer for shapes of the given type.
    pub fn new(shape_type: ShapeType) -> Self {
        let mut shp = BytesMut::with_capacity(HEADER_LENGTH);
        shp.put_bytes(0, HEADER_LENGTH);
        let mut shx = BytesMut::with_capacity(HEADER_LENGTH);
        shx.put_bytes(0, HEADER_LENGTH);

        Self {
            shape_type,
            shp,
            shx,
            bbox: None,
            z_range: None,
            record_count: 0,
        }
    }

    /// Number of records written so far.
    pub fn record_count(&self) -> i32 {
        self.record_count
    }

    /// Adds a rectangular grid cell as a polygon record with one clockwise ring of 5 vertices.
    pub fn add_grid_cell(&mut self, cell: Rect) -> Result<(), ShpError> {
        self.expect_type(ShapeType::Polygon)?;
        let ring = cell.into_contour();
        self.write_parts(cell, std::iter::once(ring.points()))
    }

    /// Adds a polygon record. Rings are written in their stored order and orientation.
    pub fn add_polygon(&mut self, polygon: &Polygon<Point2d>) -> Result<(), ShpError> {
        self.expect_type(ShapeType::Polygon)?;
        match polygon.bounding_rect() {
            Some(bbox) => self.write_parts(bbox, polygon.contours().iter().map(|c| c.points())),
            None => self.add_null(),
        }
    }

    /// Adds a multi-part polyline record.
    pub fn add_polyline(&mut self, polyline: &Polyline<Point2d>) -> Result<(), ShpError> {
        self.expect_type(ShapeType::PolyLine)?;
        let bbox = Rect::merge_all(
            polyline
                .iter_parts()
                .filter_map(|p| Rect::from_points(p.iter_points())),
        );
        match bbox {
            Some(bbox) => self.write_parts(bbox, polyline.parts.iter().map(|p| p.points())),
            None => self.add_null(),
        }
    }

    /// Adds a point record with z and a zero measure.
    pub fn add_point_z(&mut self, point: &Point3d) -> Result<(), ShpError> {
        self.expect_type(ShapeType::PointZ)?;

        let mut content = BytesMut::with_capacity(36);
        Endian::Little.put_i32(&mut content, ShapeType::PointZ.code());
        Endian::Little.put_f64(&mut content, point.x());
        Endian::Little.put_f64(&mut content, point.y());
        Endian::Little.put_f64(&mut content, point.z());
        Endian::Little.put_f64(&mut content, 0.0);

        self.extend_bbox(Rect::from_point(&point.planar()));
        self.z_range = Some(match self.z_range {
            Some((min, max)) => (min.min(point.z()), max.max(point.z())),
            None => (point.z(), point.z()),
        });

        self.push_record(&content)
    }

    /// Adds a record without geometry.
    pub fn add_null(&mut self) -> Result<(), ShpError> {
        let mut content = BytesMut::with_capacity(4);
        Endian::Little.put_i32(&mut content, ShapeType::Null.code());
        self.push_record(&content)
    }

    /// Fills in the headers of both files and returns their contents.
    pub fn finish(mut self) -> Result<ShapeFilePair, ShpError> {
        let bbox = self.bbox.unwrap_or_else(Rect::zero);
        let z_range = if self.shape_type.has_z() {
            self.z_range.unwrap_or((0.0, 0.0))
        } else {
            (0.0, 0.0)
        };

        let mut shp_header = FileHeader {
            file_length: bytes_to_words(self.shp.len())?,
            shape_type: self.shape_type,
            bbox,
            z_range,
            m_range: (0.0, 0.0),
        };
        let mut header_bytes = Vec::with_capacity(HEADER_LENGTH);
        shp_header.write(&mut header_bytes);
        self.shp[..HEADER_LENGTH].copy_from_slice(&header_bytes);

        shp_header.file_length = bytes_to_words(self.shx.len())?;
        header_bytes.clear();
        shp_header.write(&mut header_bytes);
        self.shx[..HEADER_LENGTH].copy_from_slice(&header_bytes);

        log::debug!(
            "Encoded {} {:?} records, {} bytes",
            self.record_count,
            self.shape_type,
            self.shp.len()
        );

        Ok(ShapeFilePair {
            shp: self.shp.freeze(),
            shx: self.shx.freeze(),
        })
    }

    fn expect_type(&self, found: ShapeType) -> Result<(), ShpError> {
        if self.shape_type != found {
            return Err(ShpError::ShapeTypeMismatch {
                expected: self.shape_type,
                found,
            });
        }

        Ok(())
    }

    fn extend_bbox(&mut self, rect: Rect) {
        self.bbox = Some(match self.bbox {
            Some(bbox) => bbox.merge(rect),
            None => rect,
        });
    }

    fn write_parts<'a>(
        &mut self,
        bbox: Rect,
        parts: impl Iterator<Item = &'a [Point2d]> + Clone,
    ) -> Result<(), ShpError> {
        let part_count = parts.clone().count();
        let point_count: usize = parts.clone().map(|p| p.len()).sum();
        let num_parts = i32::try_from(part_count).map_err(|_| ShpError::TooLarge)?;
        let num_points = i32::try_from(point_count).map_err(|_| ShpError::TooLarge)?;

        let mut content = BytesMut::with_capacity(44 + 4 * part_count + 16 * point_count);
        Endian::Little.put_i32(&mut content, self.shape_type.code());
        put_bbox(&mut content, &bbox);
        Endian::Little.put_i32(&mut content, num_parts);
        Endian::Little.put_i32(&mut content, num_points);

        let mut start = 0;
        for part in parts.clone() {
            Endian::Little.put_i32(&mut content, start);
            start += part.len() as i32;
        }

        for point in parts.flatten() {
            Endian::Little.put_f64(&mut content, point.x());
            Endian::Little.put_f64(&mut content, point.y());
        }

        self.extend_bbox(bbox);
        self.push_record(&content)
    }

    fn push_record(&mut self, content: &[u8]) -> Result<(), ShpError> {
        let record_number = self.record_count.checked_add(1).ok_or(ShpError::TooLarge)?;
        let offset = bytes_to_words(self.shp.len())?;
        let content_length = bytes_to_words(content.len())?;

        if self.shp.len() + RECORD_HEADER_LENGTH + content.len() > i32::MAX as usize * 2 {
            return Err(ShpError::TooLarge);
        }

        Endian::Big.put_i32(&mut self.shp, record_number);
        Endian::Big.put_i32(&mut self.shp, content_length);
        self.shp.put_slice(content);

        self.shx.reserve(INDEX_RECORD_LENGTH);
        Endian::Big.put_i32(&mut self.shx, offset);
        Endian::Big.put_i32(&mut self.shx, content_length);

        self.record_count = record_number;
        Ok(())
    }
}
