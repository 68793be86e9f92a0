//! Conversion of raw shape records into sparsified geometry.

use hydroclip_shp::RawShape;
use hydroclip_types::cartesian::{CartesianClosedContour, Point2d, Rect};
use hydroclip_types::{ClosedContour, OpenContour, Polygon, Polyline};
use log::debug;

use crate::config::EngineConfig;
use crate::shape::{Shape, ShapeGeometry};
use crate::sparsify::{RingKind, SparseRing, VertexSparsifier};

/// Builds polygons from the parts of raw polygon records.
///
/// Every part is sparsified on its own. Parts that keep too few vertices are dropped, and the rest become rings of the
/// polygon. A ring is marked as a hole if it goes counter-clockwise.
#[derive(Debug, Clone, Copy)]
pub struct PolygonBuilder {
    sparsifier: VertexSparsifier,
}

impl PolygonBuilder {
    /// Creates a builder merging vertices closer than `min_vertex_distance`.
    pub fn new(min_vertex_distance: f64) -> Self {
        Self {
            sparsifier: VertexSparsifier::new(min_vertex_distance),
        }
    }

    /// Creates a builder with the parameters of the configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.min_vertex_distance)
    }

    /// Builds a polygon from vertex slices, one slice per ring.
    ///
    /// Returns the polygon and the bounds of its kept vertices. A polygon without rings is a valid result and gets zero
    /// bounds.
    pub fn build_parts<'a>(
        &self,
        parts: impl IntoIterator<Item = &'a [Point2d]>,
    ) -> (Polygon<Point2d>, Rect) {
        let rings: Vec<SparseRing> = parts
            .into_iter()
            .filter_map(|part| self.sparsifier.sparsify(part, RingKind::Polygon))
            .collect();

        let bounds = Rect::merge_all(rings.iter().map(|r| r.bounds)).unwrap_or_else(Rect::zero);
        let mut polygon = Polygon::with_capacity(rings.len());
        for ring in rings {
            let contour = ClosedContour::new(ring.points);
            let is_hole = contour.area_signed() > 0.0;
            polygon.push(contour, is_hole);
        }

        (polygon, bounds)
    }

    /// Builds the polygon shape of a raw record. The shape id is the attribute row of the record.
    pub fn build(&self, raw: &RawShape) -> Shape {
        let (polygon, bounds) = self.build_parts(raw.iter_parts());
        if polygon.contour_count() < raw.parts.len() {
            debug!(
                "Record {}: {} of {} rings dropped by sparsification",
                raw.record_number,
                raw.parts.len() - polygon.contour_count(),
                raw.parts.len()
            );
        }

        Shape::with_bounds(raw.row(), ShapeGeometry::Polygon(polygon), bounds)
    }
}

/// Builds polylines from the parts of raw polyline records.
///
/// Parts are sparsified the same way as polygon rings, but are left open and only need 2 vertices to survive.
#[derive(Debug, Clone, Copy)]
pub struct PolylineBuilder {
    sparsifier: VertexSparsifier,
}

impl PolylineBuilder {
    /// Creates a builder merging vertices closer than `min_vertex_distance`.
    pub fn new(min_vertex_distance: f64) -> Self {
        Self {
            sparsifier: VertexSparsifier::new(min_vertex_distance),
        }
    }

    /// Creates a builder with the parameters of the configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.min_vertex_distance)
    }

    /// Builds a polyline from vertex slices, one slice per part.
    pub fn build_parts<'a>(
        &self,
        parts: impl IntoIterator<Item = &'a [Point2d]>,
    ) -> (Polyline<Point2d>, Rect) {
        let mut bounds: Option<Rect> = None;
        let mut contours = vec![];
        for part in parts {
            if let Some(ring) = self.sparsifier.sparsify(part, RingKind::Polyline) {
                bounds = Some(match bounds {
                    Some(b) => b.merge(ring.bounds),
                    None => ring.bounds,
                });
                contours.push(OpenContour::new(ring.points));
            }
        }

        (Polyline::new(contours), bounds.unwrap_or_else(Rect::zero))
    }

    /// Builds the polyline shape of a raw record.
    pub fn build(&self, raw: &RawShape) -> Shape {
        let (polyline, bounds) = self.build_parts(raw.iter_parts());
        if polyline.parts.len() < raw.parts.len() {
            debug!(
                "Record {}: {} of {} parts dropped by sparsification",
                raw.record_number,
                raw.parts.len() - polyline.parts.len(),
                raw.parts.len()
            );
        }

        Shape::with_bounds(raw.row(), ShapeGeometry::Polyline(polyline), bounds)
    }
}
