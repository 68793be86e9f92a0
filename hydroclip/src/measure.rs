//! Area, perimeter and length of clipped shapes in a projected coordinate system.
//!
//! Source datasets are usually stored in geographic coordinates, where area has no useful unit. Measures are computed
//! after passing every vertex through a [`Projection`] supplied by the caller. The projection itself is opaque to this
//! crate.

use hydroclip_types::cartesian::{CartesianContour, Point2d};
use hydroclip_types::geo::Projection;
use hydroclip_types::{ClosedContour, OpenContour, Polygon, Polyline};

use crate::error::HydroclipError;
use crate::shape::{ShapeGeometry, ShapeSet};
use crate::table::AttributeTable;

/// Measures of one shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measures {
    /// Net area: fills minus holes. Zero for polylines.
    pub area: f64,
    /// Total length of all rings or parts.
    pub perimeter: f64,
}

/// Projects every vertex of the polygon. `None` if any vertex cannot be projected.
pub fn project_polygon<P>(polygon: &Polygon<Point2d>, projection: &P) -> Option<Polygon<Point2d>>
where
    P: Projection<InPoint = Point2d, OutPoint = Point2d> + ?Sized,
{
    let mut projected = Polygon::with_capacity(polygon.contour_count());
    for (contour, is_hole) in polygon.iter_contours() {
        let points = contour
            .points
            .iter()
            .map(|p| projection.project(p))
            .collect::<Option<Vec<_>>>()?;
        projected.push(ClosedContour::new(points), is_hole);
    }

    Some(projected)
}

/// Projects every vertex of the polyline. `None` if any vertex cannot be projected.
pub fn project_polyline<P>(polyline: &Polyline<Point2d>, projection: &P) -> Option<Polyline<Point2d>>
where
    P: Projection<InPoint = Point2d, OutPoint = Point2d> + ?Sized,
{
    let parts = polyline
        .parts
        .iter()
        .map(|part| {
            part.points
                .iter()
                .map(|p| projection.project(p))
                .collect::<Option<Vec<_>>>()
                .map(OpenContour::new)
        })
        .collect::<Option<Vec<_>>>()?;

    Some(Polyline::new(parts))
}

/// Measures polygon or polyline geometry. Triangulated shapes have no measures.
pub fn measure<P>(geometry: &ShapeGeometry, projection: &P) -> Option<Measures>
where
    P: Projection<InPoint = Point2d, OutPoint = Point2d> + ?Sized,
{
    match geometry {
        ShapeGeometry::Polygon(polygon) => {
            let projected = project_polygon(polygon, projection)?;
            Some(Measures {
                // A projection may mirror the plane, which flips ring orientation.
                area: projected.net_area().abs(),
                perimeter: projected.perimeter(),
            })
        }
        ShapeGeometry::Polyline(polyline) => {
            let projected = project_polyline(polyline, projection)?;
            Some(Measures {
                area: 0.0,
                perimeter: projected.parts.iter().map(|part| part.length()).sum(),
            })
        }
        ShapeGeometry::Triangles(_) => None,
    }
}

/// Writes area and perimeter of every shape into double columns of the table.
///
/// The table must already be filtered by the clip mask, so that its rows correspond to the shapes of the set in order.
pub fn apply_measures<P>(
    table: &mut AttributeTable,
    shapes: &ShapeSet,
    projection: &P,
    area_column: &str,
    perimeter_column: &str,
) -> Result<(), HydroclipError>
where
    P: Projection<InPoint = Point2d, OutPoint = Point2d> + ?Sized,
{
    if shapes.len() != table.row_count() {
        return Err(HydroclipError::LengthMismatch {
            expected: table.row_count(),
            actual: shapes.len(),
        });
    }

    let mut areas = Vec::with_capacity(shapes.len());
    let mut perimeters = Vec::with_capacity(shapes.len());
    for shape in shapes.iter() {
        let measures = measure(shape.geometry(), projection).ok_or_else(|| {
            HydroclipError::Generic(format!("cannot measure shape {}", shape.id()))
        })?;
        areas.push(measures.area);
        perimeters.push(measures.perimeter);
    }

    table.set_double_column(area_column, areas)?;
    table.set_double_column(perimeter_column, perimeters)
}
