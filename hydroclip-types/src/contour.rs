//! Vertex chains: polyline parts and polygon rings.
//!
//! An [`OpenContour`] is one part of a river polyline. A [`ClosedContour`] is a polygon ring and keeps its closing
//! vertex, exactly as it is stored in a `.shp` record: a triangular ring holds 4 points. Because of that, walking the
//! segments of any contour never invents a segment back to the start.

use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// Ordered vertices of a part or a ring.
pub trait Contour {
    /// Vertex type.
    type Point;

    /// Vertices as stored, closing vertex of rings included.
    fn points(&self) -> &[Self::Point];

    /// `true` for rings.
    fn is_closed(&self) -> bool;

    /// Vertices in order.
    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point> {
        self.points().iter()
    }

    /// Segments between neighbouring vertices.
    fn iter_segments(&self) -> impl Iterator<Item = Segment<'_, Self::Point>> {
        self.points().windows(2).map(|w| Segment(&w[0], &w[1]))
    }
}

/// One part of a polyline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OpenContour<P> {
    /// Vertices of the part.
    pub points: Vec<P>,
}

impl<P> OpenContour<P> {
    /// Wraps the vertices.
    pub fn new(points: Vec<P>) -> Self {
        Self { points }
    }
}

impl<P> Contour for OpenContour<P> {
    type Point = P;

    fn points(&self) -> &[P] {
        &self.points
    }

    fn is_closed(&self) -> bool {
        false
    }
}

/// Polygon ring with an explicit closing vertex.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ClosedContour<P> {
    /// Vertices of the ring.
    pub points: Vec<P>,
}

impl<P> ClosedContour<P> {
    /// Wraps the vertices as given. The closing vertex is not added.
    pub fn new(points: Vec<P>) -> Self {
        Self { points }
    }

    /// Flips the winding. Start and end vertices are equal, so the ring stays closed.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }
}

impl<P> Contour for ClosedContour<P> {
    type Point = P;

    fn points(&self) -> &[P] {
        &self.points
    }

    fn is_closed(&self) -> bool {
        true
    }
}

/// Polyline shape made of one or more parts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Polyline<P> {
    /// Parts in record order.
    pub parts: Vec<OpenContour<P>>,
}

impl<P> Polyline<P> {
    /// Polyline from its parts.
    pub fn new(parts: Vec<OpenContour<P>>) -> Self {
        Self { parts }
    }

    /// `true` when there are no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts in record order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &'_ OpenContour<P>> {
        self.parts.iter()
    }

    /// Vertex count over all parts.
    pub fn point_count(&self) -> usize {
        self.parts.iter().map(|p| p.points.len()).sum()
    }
}
