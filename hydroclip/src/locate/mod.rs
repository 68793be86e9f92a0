//! Spatial queries over the shapes of a job.
//!
//! * [`PointLocator::locate`] finds the triangulated polygon containing a point;
//! * [`PointLocator::nearest_polyline`] finds the polyline closest to a point, measured as the perpendicular distance
//!   to its segments;
//! * [`nearest_point`] and [`nearest_table_point`] find the closest of a set of points using the taxicab (L1) distance.
//!
//! Every query returns `None` if there is nothing close enough. Not finding a feature is never an error.

mod triangulate;

use hydroclip_types::cartesian::{CartesianPoint2d, Point2d};
use hydroclip_types::Contour;

use crate::config::EngineConfig;
use crate::error::HydroclipError;
use crate::shape::{ShapeGeometry, ShapeSet};
use crate::table::AttributeTable;

pub use triangulate::triangulate;

/// Feature found by a nearest query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Position of the feature in the searched collection.
    pub index: usize,
    /// Distance from the query point to the feature.
    pub distance: f64,
}

/// Answers point queries over a shape set.
#[derive(Debug, Clone, Copy)]
pub struct PointLocator<'a> {
    shapes: &'a ShapeSet,
    margin: f64,
    tolerance: f64,
}

impl<'a> PointLocator<'a> {
    /// Creates a locator with the query parameters of the configuration.
    pub fn new(shapes: &'a ShapeSet, config: &EngineConfig) -> Self {
        Self {
            shapes,
            margin: config.locate_margin,
            tolerance: config.locate_tolerance,
        }
    }

    /// Returns the position in the set of the first triangulated shape containing the point.
    ///
    /// Shapes whose bounds do not contain the point are skipped without looking at their triangles. Shapes that are
    /// not triangulated are never matched, see [`ShapeSet::triangulate`].
    pub fn locate(&self, point: &impl CartesianPoint2d<Num = f64>) -> Option<usize> {
        self.shapes.iter().position(|shape| {
            if !shape.bounds().contains(point) {
                return false;
            }

            match shape.geometry() {
                ShapeGeometry::Triangles(mesh) => mesh.contains_point(point),
                _ => false,
            }
        })
    }

    /// Returns the polyline shape closest to the point.
    ///
    /// Only shapes with bounds within the locator margin of the point are checked, and in those only the segments
    /// whose own bounds are within the margin. The result is `None` if the closest segment is further than the
    /// tolerance.
    pub fn nearest_polyline(&self, point: &impl CartesianPoint2d<Num = f64>) -> Option<Nearest> {
        let point = Point2d::new(point.x(), point.y());
        let mut best: Option<Nearest> = None;

        for (index, shape) in self.shapes.iter().enumerate() {
            let ShapeGeometry::Polyline(polyline) = shape.geometry() else {
                continue;
            };

            if !shape.bounds().expand(self.margin).contains(&point) {
                continue;
            }

            for part in &polyline.parts {
                for segment in part.iter_segments() {
                    if !segment.bounding_rect().expand(self.margin).contains(&point) {
                        continue;
                    }

                    let distance = segment.distance_to_point_sq(&point).sqrt();
                    if best.map_or(true, |b| distance < b.distance) {
                        best = Some(Nearest { index, distance });
                    }
                }
            }
        }

        best.filter(|b| b.distance <= self.tolerance)
    }
}

/// Returns the point closest to `target` by taxicab distance (`|dx| + |dy|`).
///
/// The result is `None` if the slice is empty or the closest point is further than `tolerance`.
pub fn nearest_point(
    points: &[Point2d],
    target: &impl CartesianPoint2d<Num = f64>,
    tolerance: f64,
) -> Option<Nearest> {
    nearest_by_taxicab(points.iter().copied(), target, tolerance)
}

/// Same as [`nearest_point`] for points stored in two double columns of an attribute table. The returned index is
/// the row of the table.
pub fn nearest_table_point(
    table: &AttributeTable,
    x_column: &str,
    y_column: &str,
    target: &impl CartesianPoint2d<Num = f64>,
    tolerance: f64,
) -> Result<Option<Nearest>, HydroclipError> {
    let xs = table.doubles(x_column)?;
    let ys = table.doubles(y_column)?;
    let points = xs.iter().zip(ys).map(|(x, y)| Point2d::new(*x, *y));

    Ok(nearest_by_taxicab(points, target, tolerance))
}

fn nearest_by_taxicab(
    points: impl Iterator<Item = Point2d>,
    target: &impl CartesianPoint2d<Num = f64>,
    tolerance: f64,
) -> Option<Nearest> {
    let mut best: Option<Nearest> = None;
    for (index, p) in points.enumerate() {
        let distance = p.taxicab_distance(target);
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Nearest { index, distance });
        }
    }

    best.filter(|b| b.distance <= tolerance)
}
