//! Subset job: build and clip every record of a source file.

use bytes::Bytes;
use hydroclip_shp::{RawShape, ShapeReader, ShapeType};
use hydroclip_types::cartesian::Rect;
use log::{debug, info};

use crate::builder::{PolygonBuilder, PolylineBuilder};
use crate::clip::BoundsClipper;
use crate::config::EngineConfig;
use crate::error::HydroclipError;
use crate::shape::ShapeSet;

/// Result of a subset job.
#[derive(Debug, Clone, PartialEq)]
pub struct Subset {
    /// Shapes that survived building and clipping, in record order.
    pub shapes: ShapeSet,
    /// One flag per attribute table row, set for the rows whose shape survived.
    pub mask: Vec<bool>,
}

impl Subset {
    /// Number of shapes that survived.
    pub fn survivor_count(&self) -> usize {
        self.shapes.len()
    }
}

/// Builds and clips raw records against the bounds.
///
/// `row_count` is the number of rows in the attribute table. The mask is made long enough for every record even if
/// `row_count` is smaller. Records that are not polygons or polylines, or lose all their contours, are excluded.
///
/// Fails with [`HydroclipError::Geometry`] if a limit of `bounds` is not finite.
pub fn subset_records(
    records: impl IntoIterator<Item = RawShape>,
    row_count: usize,
    bounds: Rect,
    config: &EngineConfig,
) -> Result<Subset, HydroclipError> {
    let bounds = Rect::try_new(bounds.x_min(), bounds.y_min(), bounds.x_max(), bounds.y_max())?;
    let polygon_builder = PolygonBuilder::from_config(config);
    let polyline_builder = PolylineBuilder::from_config(config);
    let clipper = BoundsClipper::new(bounds);

    let mut mask = vec![false; row_count];
    let mut shapes = ShapeSet::with_capacity(row_count);

    for raw in records {
        if raw.row() >= mask.len() {
            mask.resize(raw.row() + 1, false);
        }

        let shape = match raw.shape_type {
            ShapeType::Polygon | ShapeType::PolygonZ => polygon_builder.build(&raw),
            ShapeType::PolyLine | ShapeType::PolyLineZ => polyline_builder.build(&raw),
            other => {
                debug!("Record {} of type {other:?} skipped", raw.record_number);
                continue;
            }
        };

        if shape.is_empty() {
            continue;
        }

        if let Some(clipped) = clipper.clip_shape(&shape, &mut mask) {
            shapes.push(clipped);
        }
    }

    info!(
        "{} of {} shapes intersect {:?}",
        shapes.len(),
        mask.len(),
        bounds
    );

    Ok(Subset { shapes, mask })
}

/// Reads all records of a `.shp` file and runs [`subset_records`] on them.
pub fn subset_file(
    shp: impl Into<Bytes>,
    bounds: Rect,
    config: &EngineConfig,
) -> Result<Subset, HydroclipError> {
    let reader = ShapeReader::new(shp)?;
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    let row_count = records.iter().map(|r| r.row() + 1).max().unwrap_or(0);

    subset_records(records, row_count, bounds, config)
}
