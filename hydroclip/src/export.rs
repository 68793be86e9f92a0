//! Writing job results as shapefiles.
//!
//! Every export writes a `<base>.shp`, `<base>.shx` and `<base>.prj` triple. If any of the files cannot be written,
//! the ones already written are removed again, so a failed export never leaves an unusable file set behind.

use std::fs;
use std::path::{Path, PathBuf};

use hydroclip_shp::{ShapeType, ShapeWriter};
use hydroclip_types::cartesian::{Point3d, Rect};
use log::{info, warn};

use crate::config::EngineConfig;
use crate::error::HydroclipError;
use crate::shape::{ShapeGeometry, ShapeSet};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Files that were written.
    pub paths: Vec<PathBuf>,
    /// Number of records in the geometry files.
    pub record_count: usize,
}

/// Writes polyline shapes. Records are written in set order, so record `i` matches row `i` of the attribute table
/// filtered with the clip mask.
pub fn export_polylines(
    shapes: &ShapeSet,
    base: &Path,
    config: &EngineConfig,
) -> Result<ExportSummary, HydroclipError> {
    let mut writer = ShapeWriter::new(ShapeType::PolyLine);
    for shape in shapes.iter() {
        match shape.geometry() {
            ShapeGeometry::Polyline(polyline) => writer.add_polyline(polyline)?,
            _ => return Err(geometry_error(shape.id(), "polyline")),
        }
    }

    save(writer, base, config)
}

/// Writes polygon shapes. Records are written in set order.
pub fn export_polygons(
    shapes: &ShapeSet,
    base: &Path,
    config: &EngineConfig,
) -> Result<ExportSummary, HydroclipError> {
    let mut writer = ShapeWriter::new(ShapeType::Polygon);
    for shape in shapes.iter() {
        match shape.geometry() {
            ShapeGeometry::Polygon(polygon) => writer.add_polygon(polygon)?,
            _ => return Err(geometry_error(shape.id(), "polygon")),
        }
    }

    save(writer, base, config)
}

/// Writes rectangular grid cells as polygons with one ring each.
pub fn export_grid_cells(
    cells: &[Rect],
    base: &Path,
    config: &EngineConfig,
) -> Result<ExportSummary, HydroclipError> {
    let mut writer = ShapeWriter::new(ShapeType::Polygon);
    for cell in cells {
        writer.add_grid_cell(*cell)?;
    }

    save(writer, base, config)
}

/// Writes scattered 3d points, for example gauge stations with their elevation.
pub fn export_points(
    points: &[Point3d],
    base: &Path,
    config: &EngineConfig,
) -> Result<ExportSummary, HydroclipError> {
    let mut writer = ShapeWriter::new(ShapeType::PointZ);
    for point in points {
        writer.add_point_z(point)?;
    }

    save(writer, base, config)
}

fn geometry_error(id: usize, expected: &str) -> HydroclipError {
    HydroclipError::Generic(format!("shape {id} is not a {expected}"))
}

fn save(
    writer: ShapeWriter,
    base: &Path,
    config: &EngineConfig,
) -> Result<ExportSummary, HydroclipError> {
    let record_count = writer.record_count() as usize;
    let pair = writer.finish()?;
    let mut paths = pair.save(base)?;

    match config.prj_format.save(base) {
        Ok(path) => paths.push(path),
        Err(e) => {
            for path in &paths {
                if let Err(remove_error) = fs::remove_file(path) {
                    warn!("Failed to remove {}: {remove_error}", path.display());
                }
            }
            return Err(e.into());
        }
    }

    info!(
        "Exported {record_count} records to {}",
        base.with_extension("shp").display()
    );

    Ok(ExportSummary {
        paths,
        record_count,
    })
}
