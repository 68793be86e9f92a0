use bytes::{Buf, Bytes};
use hydroclip_types::cartesian::{Point2d, Rect};

use crate::endian::Endian;
use crate::error::ShpError;
use crate::header::{get_bbox, FileHeader, HEADER_LENGTH};
use crate::shape_type::ShapeType;

/// One shape record as stored in the main file: flat vertex array split into parts by start indices.
#[derive(Debug, Clone, PartialEq)]
pub struct RawShape {
    /// 1-based record number.
    pub record_number: i32,
    /// Type of the record.
    pub shape_type: ShapeType,
    /// Start index of every part in `points`.
    pub parts: Vec<usize>,
    /// All vertices of all parts.
    pub points: Vec<Point2d>,
    /// Z values, one per vertex, for shape types with z. Empty otherwise.
    pub z: Vec<f64>,
}

impl RawShape {
    /// Creates a 2d polygon or polyline record.
    pub fn new(
        record_number: i32,
        shape_type: ShapeType,
        parts: Vec<usize>,
        points: Vec<Point2d>,
    ) -> Self {
        Self {
            record_number,
            shape_type,
            parts,
            points,
            z: vec![],
        }
    }

    /// Zero-based index of the row in the attribute table that belongs to this record.
    pub fn row(&self) -> usize {
        (self.record_number.max(1) - 1) as usize
    }

    /// Iterates over the vertices of every part.
    pub fn iter_parts(&self) -> impl Iterator<Item = &'_ [Point2d]> {
        let ends = self
            .parts
            .iter()
            .skip(1)
            .copied()
            .chain(std::iter::once(self.points.len()));
        self.parts
            .iter()
            .zip(ends)
            .map(move |(start, end)| {
                let end = end.min(self.points.len());
                &self.points[(*start).min(end)..end]
            })
    }
}

/// Reader of shape records from the contents of a `.shp` file.
#[derive(Debug, Clone)]
pub struct ShapeReader {
    header: FileHeader,
    records: Bytes,
}

impl ShapeReader {
    /// Parses the header of the main file.
    pub fn new(shp: impl Into<Bytes>) -> Result<Self, ShpError> {
        let mut records: Bytes = shp.into();
        let header = FileHeader::read(&mut records.clone())?;
        records.advance(HEADER_LENGTH);

        Ok(Self { header, records })
    }

    /// Header of the file.
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Iterates over the records of the file. Null records are skipped.
    pub fn records(&self) -> impl Iterator<Item = Result<RawShape, ShpError>> {
        RecordIterator {
            buf: self.records.clone(),
            failed: false,
        }
    }
}

struct RecordIterator {
    buf: Bytes,
    failed: bool,
}

impl Iterator for RecordIterator {
    type Item = Result<RawShape, ShpError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed || !self.buf.has_remaining() {
                return None;
            }

            match read_record(&mut self.buf) {
                Ok(Some(shape)) => return Some(Ok(shape)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn read_record(buf: &mut Bytes) -> Result<Option<RawShape>, ShpError> {
    let record_number = Endian::Big.get_i32(buf)?;
    let content_words = Endian::Big.get_i32(buf)?;
    let content_length = usize::try_from(content_words).map_err(|_| ShpError::InvalidRecord {
        record: record_number,
        reason: format!("negative content length {content_words}"),
    })? * 2;

    if buf.remaining() < content_length {
        return Err(ShpError::UnexpectedEof {
            needed: content_length,
            available: buf.remaining(),
        });
    }

    let mut content = buf.split_to(content_length);
    let code = Endian::Little.get_i32(&mut content)?;
    let shape_type = ShapeType::from_code(code).ok_or(ShpError::UnsupportedShapeType(code))?;

    match shape_type {
        ShapeType::Null => Ok(None),
        ShapeType::PolyLine | ShapeType::Polygon | ShapeType::PolyLineZ | ShapeType::PolygonZ => {
            read_parts(record_number, shape_type, &mut content).map(Some)
        }
        ShapeType::Point | ShapeType::PointZ => {
            let point = Point2d::new(
                Endian::Little.get_f64(&mut content)?,
                Endian::Little.get_f64(&mut content)?,
            );
            let z = if shape_type == ShapeType::PointZ {
                vec![Endian::Little.get_f64(&mut content)?]
            } else {
                vec![]
            };

            Ok(Some(RawShape {
                record_number,
                shape_type,
                parts: vec![],
                points: vec![point],
                z,
            }))
        }
        ShapeType::MultiPoint => Err(ShpError::UnsupportedShapeType(code)),
    }
}

fn read_parts(
    record_number: i32,
    shape_type: ShapeType,
    content: &mut Bytes,
) -> Result<RawShape, ShpError> {
    let invalid = |reason: String| ShpError::InvalidRecord {
        record: record_number,
        reason,
    };

    let _bbox: Rect = get_bbox(content)?;
    let num_parts = Endian::Little.get_i32(content)?;
    let num_points = Endian::Little.get_i32(content)?;
    let num_parts = usize::try_from(num_parts)
        .map_err(|_| invalid(format!("negative part count {num_parts}")))?;
    let num_points = usize::try_from(num_points)
        .map_err(|_| invalid(format!("negative point count {num_points}")))?;

    if content.remaining() < num_parts * 4 + num_points * 16 {
        return Err(ShpError::UnexpectedEof {
            needed: num_parts * 4 + num_points * 16,
            available: content.remaining(),
        });
    }

    let mut parts = Vec::with_capacity(num_parts);
    for _ in 0..num_parts {
        let start = Endian::Little.get_i32(content)?;
        let start = usize::try_from(start)
            .map_err(|_| invalid(format!("negative part start {start}")))?;
        if start > num_points || parts.last().is_some_and(|prev| *prev > start) {
            return Err(invalid(format!("part start {start} out of order")));
        }
        parts.push(start);
    }

    let mut points = Vec::with_capacity(num_points);
    for _ in 0..num_points {
        let x = Endian::Little.get_f64(content)?;
        let y = Endian::Little.get_f64(content)?;
        points.push(Point2d::new(x, y));
    }

    let mut z = vec![];
    if shape_type.has_z() {
        let _z_range = (Endian::Little.get_f64(content)?, Endian::Little.get_f64(content)?);
        z.reserve(num_points);
        for _ in 0..num_points {
            z.push(Endian::Little.get_f64(content)?);
        }
    }

    Ok(RawShape {
        record_number,
        shape_type,
        parts,
        points,
        z,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ShapeWriter;
    use assert_matches::assert_matches;
    use hydroclip_types::cartesian::Point3d;
    use hydroclip_types::{OpenContour, Polyline};

    #[test]
    fn read_polylines_written_by_writer() {
        let mut writer = ShapeWriter::new(ShapeType::PolyLine);
        writer
            .add_polyline(&Polyline::new(vec![
                OpenContour::new(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.5)]),
                OpenContour::new(vec![Point2d::new(2.0, 2.0), Point2d::new(3.0, 2.0)]),
            ]))
            .unwrap();
        writer.add_polyline(&Polyline::default()).unwrap();
        writer
            .add_polyline(&Polyline::new(vec![OpenContour::new(vec![
                Point2d::new(5.0, 5.0),
                Point2d::new(6.0, 6.0),
            ])]))
            .unwrap();
        let pair = writer.finish().unwrap();

        let reader = ShapeReader::new(pair.shp).unwrap();
        assert_eq!(reader.header().shape_type, ShapeType::PolyLine);
        assert_eq!(reader.header().bbox, Rect::new(0.0, 0.0, 6.0, 6.0));

        let shapes: Vec<RawShape> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].parts, vec![0, 2]);
        assert_eq!(shapes[0].iter_parts().count(), 2);
        assert_eq!(shapes[0].iter_parts().nth(1).unwrap()[0], Point2d::new(2.0, 2.0));
        assert_eq!(shapes[1].record_number, 3);
        assert_eq!(shapes[1].row(), 2);
    }

    #[test]
    fn read_points_z() {
        let mut writer = ShapeWriter::new(ShapeType::PointZ);
        writer.add_point_z(&Point3d::new(1.0, 2.0, 3.0)).unwrap();
        let pair = writer.finish().unwrap();

        let reader = ShapeReader::new(pair.shp).unwrap();
        let shape = reader.records().next().unwrap().unwrap();
        assert_eq!(shape.points, vec![Point2d::new(1.0, 2.0)]);
        assert_eq!(shape.z, vec![3.0]);
    }

    #[test]
    fn truncated_record() {
        let mut writer = ShapeWriter::new(ShapeType::Polygon);
        writer.add_grid_cell(Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        let pair = writer.finish().unwrap();

        let truncated = pair.shp.slice(..pair.shp.len() - 10);
        let reader = ShapeReader::new(truncated).unwrap();
        let mut records = reader.records();
        assert_matches!(records.next(), Some(Err(ShpError::UnexpectedEof { .. })));
        assert!(records.next().is_none());
    }
}
