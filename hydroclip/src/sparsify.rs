//! Removal of near-coincident adjacent vertices.

use hydroclip_types::cartesian::{CartesianPoint2d, Point2d, Rect};

/// What kind of contour a vertex sequence describes. Determines closing and the minimum vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    /// Polygon ring. Closed after sparsification, needs at least 3 distinct vertices.
    Polygon,
    /// Polyline part. Left open, needs at least 2 vertices.
    Polyline,
}

impl RingKind {
    /// Minimum number of kept vertices (not counting the closing one) for the contour to survive.
    pub fn min_vertices(&self) -> usize {
        match self {
            RingKind::Polygon => 3,
            RingKind::Polyline => 2,
        }
    }
}

/// Sparsified contour together with the bounding box of the vertices it kept.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseRing {
    /// Kept vertices. Polygon rings end with a copy of the first vertex.
    pub points: Vec<Point2d>,
    /// Bounds of the kept vertices.
    pub bounds: Rect,
}

/// Merges adjacent vertices that are closer than a threshold.
///
/// A vertex is kept if it differs from the previously *kept* vertex by at least the threshold along the x axis or
/// along the y axis. The axes are checked independently, so the distance is never computed. The first vertex is always
/// kept.
///
/// Running the sparsifier on its own output with the same threshold returns the same vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSparsifier {
    min_distance: f64,
}

impl VertexSparsifier {
    /// Creates a sparsifier with the given minimum distance between adjacent vertices.
    pub fn new(min_distance: f64) -> Self {
        Self {
            min_distance: min_distance.abs(),
        }
    }

    /// Minimum distance between adjacent vertices.
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Sparsifies one contour.
    ///
    /// Returns `None` if too few vertices are left for a contour of the given kind. Losing a contour is an expected
    /// outcome and not an error.
    pub fn sparsify(&self, points: &[Point2d], kind: RingKind) -> Option<SparseRing> {
        let (first, rest) = points.split_first()?;

        let mut kept = Vec::with_capacity(points.len() + 1);
        kept.push(*first);
        let mut bounds = Rect::from_point(first);
        let mut last = *first;

        for p in rest {
            if self.is_far(&last, p) {
                kept.push(*p);
                bounds.include(p);
                last = *p;
            }
        }

        let distinct = match kind {
            RingKind::Polygon if kept.len() > 1 && last == *first => kept.len() - 1,
            _ => kept.len(),
        };
        if distinct < kind.min_vertices() {
            return None;
        }

        if kind == RingKind::Polygon && last != *first {
            kept.push(*first);
        }

        Some(SparseRing {
            points: kept,
            bounds,
        })
    }

    /// Counts the contours of a shape that survive sparsification without keeping their vertices.
    pub fn count_survivors<'a>(
        &self,
        parts: impl IntoIterator<Item = &'a [Point2d]>,
        kind: RingKind,
    ) -> usize {
        parts
            .into_iter()
            .filter(|part| self.sparsify(part, kind).is_some())
            .count()
    }

    fn is_far(&self, last: &Point2d, p: &Point2d) -> bool {
        (p.x() - last.x()).abs() >= self.min_distance
            || (p.y() - last.y()).abs() >= self.min_distance
    }
}
