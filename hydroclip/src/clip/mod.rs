//! Clipping of shapes with a rectangle.
//!
//! Polygons are intersected with the rectangle using boolean operations from the `geo` crate, after which ring
//! orientation is repaired and the shape is rejected if its net area is not positive. Polylines have no interior, so
//! each segment is clipped on its own with the Liang-Barsky algorithm and the surviving pieces are joined back into
//! parts. A polyline that leaves and re-enters the rectangle produces several disjoint parts.
//!
//! Every vertex of a clipped shape lies within the clip rectangle.

mod polygon;
mod polyline;

use hydroclip_types::cartesian::{CartesianPoint2d, Point2d, Rect};
use hydroclip_types::{Polygon, Polyline};
use log::debug;

use crate::shape::{Shape, ShapeGeometry};

pub use polyline::clip_segment;

/// Result of clipping a piece of geometry: what is left of it and its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Clipped<G> {
    /// Clipped geometry. May be empty.
    pub geometry: G,
    /// Bounds of the clipped geometry. Zero if nothing is left.
    pub bounds: Rect,
}

/// Clips geometry with a fixed rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsClipper {
    bounds: Rect,
}

impl BoundsClipper {
    /// Creates a clipper for the given rectangle.
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Clip rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Intersects the polygon with the clip rectangle.
    ///
    /// The result has fill rings going clockwise, holes going counter-clockwise, and a positive net area. If the
    /// intersection is empty or its net area is not positive, an empty polygon is returned.
    pub fn clip_polygon(&self, polygon: &Polygon<Point2d>) -> Clipped<Polygon<Point2d>> {
        let geometry = polygon::clip(polygon, self.bounds);
        let bounds = geometry.bounding_rect().unwrap_or_else(Rect::zero);
        Clipped { geometry, bounds }
    }

    /// Clips every part of the polyline with the clip rectangle.
    pub fn clip_polyline(&self, polyline: &Polyline<Point2d>) -> Clipped<Polyline<Point2d>> {
        let geometry = polyline::clip(polyline, self.bounds);
        let bounds = Rect::from_points(geometry.parts.iter().flat_map(|part| part.points.iter()))
            .unwrap_or_else(Rect::zero);
        Clipped { geometry, bounds }
    }

    /// Clips a polygon or polyline shape and records in `mask` whether it survived.
    ///
    /// `mask` is indexed by shape id, so it stays in lockstep with the rows of the attribute table. Ids outside of the
    /// mask are left unrecorded. Triangulated shapes cannot be clipped and are rejected.
    pub fn clip_shape(&self, shape: &Shape, mask: &mut [bool]) -> Option<Shape> {
        let clipped = if !shape.is_empty() && !shape.bounds().intersects(&self.bounds) {
            None
        } else {
            match shape.geometry() {
                ShapeGeometry::Polygon(polygon) => {
                    let Clipped { geometry, bounds } = self.clip_polygon(polygon);
                    (!geometry.is_empty()).then(|| {
                        Shape::with_bounds(shape.id(), ShapeGeometry::Polygon(geometry), bounds)
                    })
                }
                ShapeGeometry::Polyline(polyline) => {
                    let Clipped { geometry, bounds } = self.clip_polyline(polyline);
                    (!geometry.is_empty()).then(|| {
                        Shape::with_bounds(shape.id(), ShapeGeometry::Polyline(geometry), bounds)
                    })
                }
                ShapeGeometry::Triangles(_) => None,
            }
        };

        if clipped.is_none() {
            debug!("Shape {} is outside of the clip bounds", shape.id());
        }

        if let Some(flag) = mask.get_mut(shape.id()) {
            *flag = clipped.is_some();
        }

        clipped
    }
}

/// Moves the point onto the rectangle if rounding put it just outside.
pub(crate) fn clamp_to(point: Point2d, bounds: Rect) -> Point2d {
    Point2d::new(
        point.x().clamp(bounds.x_min(), bounds.x_max()),
        point.y().clamp(bounds.y_min(), bounds.y_max()),
    )
}
