//! Polygon made of rings with per-ring hole flags.

use crate::cartesian::{CartesianClosedContour, CartesianContour, CartesianPoint2d, Rect, Winding};
use crate::contour::ClosedContour;
use num_traits::{Float, Zero};
use serde::{Deserialize, Serialize};

/// Polygon geometry: an ordered list of rings, each marked as a fill or a *hole*.
///
/// The expected orientation is the shapefile one: fill rings go clockwise, holes go counter-clockwise. With that
/// orientation [`Polygon::net_area`] counts fills as positive and holes as negative area.
///
/// The number of rings and the number of hole flags are always equal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Polygon<P> {
    contours: Vec<ClosedContour<P>>,
    holes: Vec<bool>,
}

impl<P> Polygon<P> {
    /// Creates an empty polygon.
    pub fn new() -> Self {
        Self {
            contours: vec![],
            holes: vec![],
        }
    }

    /// Creates an empty polygon with space for `capacity` rings.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            contours: Vec::with_capacity(capacity),
            holes: Vec::with_capacity(capacity),
        }
    }

    /// Appends a ring.
    pub fn push(&mut self, contour: ClosedContour<P>, is_hole: bool) {
        self.contours.push(contour);
        self.holes.push(is_hole);
    }

    /// Number of rings.
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// Returns true if the polygon has no rings.
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// All rings of the polygon.
    pub fn contours(&self) -> &[ClosedContour<P>] {
        &self.contours
    }

    /// Hole flags, one per ring.
    pub fn holes(&self) -> &[bool] {
        &self.holes
    }

    /// Iterates over rings together with their hole flags.
    pub fn iter_contours(&self) -> impl Iterator<Item = (&'_ ClosedContour<P>, bool)> {
        self.contours.iter().zip(self.holes.iter().copied())
    }

    /// Total number of vertices in all rings.
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(|c| c.points.len()).sum()
    }
}

impl<P: CartesianPoint2d> Polygon<P> {
    /// Area of a single ring, positive for clockwise rings.
    pub fn ring_area(contour: &ClosedContour<P>) -> P::Num {
        P::Num::zero() - contour.area_signed()
    }

    /// Sum of ring areas: clockwise rings add, counter-clockwise rings subtract.
    pub fn net_area(&self) -> P::Num {
        self.contours
            .iter()
            .fold(P::Num::zero(), |acc, c| acc + Self::ring_area(c))
    }

    /// Bounding rectangle of all the rings. `None` for an empty polygon.
    pub fn bounding_rect(&self) -> Option<Rect<P::Num>> {
        Rect::merge_all(self.contours.iter().filter_map(|c| c.bounding_rect()))
    }

    /// Reverses every ring whose direction disagrees with its hole flag: fills become clockwise, holes
    /// counter-clockwise. Returns the number of reversed rings.
    pub fn orient_contours(&mut self) -> usize {
        let mut reversed = 0;
        for (contour, is_hole) in self.contours.iter_mut().zip(self.holes.iter()) {
            let expected = if *is_hole {
                Winding::CounterClockwise
            } else {
                Winding::Clockwise
            };
            if contour.area_signed() != P::Num::zero() && contour.winding() != expected {
                contour.reverse();
                reversed += 1;
            }
        }

        reversed
    }

    /// Total length of all rings.
    pub fn perimeter(&self) -> P::Num
    where
        P::Num: Float,
    {
        self.contours
            .iter()
            .fold(P::Num::zero(), |acc, c| acc + c.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2d;

    fn square(min: f64, max: f64, clockwise: bool) -> ClosedContour<Point2d> {
        let mut contour = Rect::new(min, min, max, max).into_contour();
        if !clockwise {
            contour.reverse();
        }
        contour
    }

    #[test]
    fn net_area_with_hole() {
        let mut polygon = Polygon::new();
        polygon.push(square(0.0, 4.0, true), false);
        polygon.push(square(1.0, 2.0, false), true);

        assert_eq!(polygon.contour_count(), 2);
        assert_eq!(polygon.holes().len(), polygon.contours().len());
        assert_eq!(polygon.net_area(), 15.0);
        assert_eq!(polygon.perimeter(), 20.0);
        assert_eq!(polygon.bounding_rect(), Some(Rect::new(0.0, 0.0, 4.0, 4.0)));
    }

    #[test]
    fn orient_contours_fixes_winding() {
        let mut polygon = Polygon::new();
        polygon.push(square(0.0, 4.0, false), false);
        polygon.push(square(1.0, 2.0, true), true);
        assert_eq!(polygon.net_area(), -15.0);

        assert_eq!(polygon.orient_contours(), 2);
        assert_eq!(polygon.net_area(), 15.0);
        assert_eq!(polygon.orient_contours(), 0);
    }

    #[test]
    fn empty_polygon() {
        let polygon = Polygon::<Point2d>::new();
        assert!(polygon.is_empty());
        assert_eq!(polygon.net_area(), 0.0);
        assert_eq!(polygon.bounding_rect(), None);
    }
}
