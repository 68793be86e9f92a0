use crate::cartesian::traits::cartesian_point::{CartesianPoint2d, CartesianPoint2dFloat};
use crate::cartesian::Rect;
use crate::contour::{ClosedContour, Contour};
use crate::segment::Segment;
use num_traits::{Float, One, Zero};
use std::cmp::Ordering;

/// Area and winding of a ring.
pub trait CartesianClosedContour {
    /// Vertex type.
    type Point: CartesianPoint2d;

    /// Shoelace area, positive for counter-clockwise rings.
    ///
    /// Works the same whether or not the ring repeats its first vertex at the end: the repeated pair contributes
    /// nothing.
    fn area_signed(&self) -> <Self::Point as CartesianPoint2d>::Num;

    /// Direction of the ring. Zero-area rings count as clockwise.
    fn winding(&self) -> Winding;
}

impl<P: CartesianPoint2d> CartesianClosedContour for ClosedContour<P> {
    type Point = P;

    fn area_signed(&self) -> P::Num {
        let points = self.points();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return P::Num::zero();
        };

        let cross = |a: &P, b: &P| a.x() * b.y() - b.x() * a.y();
        let twice = points
            .windows(2)
            .fold(cross(last, first), |acc, w| acc + cross(&w[0], &w[1]));

        twice / (P::Num::one() + P::Num::one())
    }

    fn winding(&self) -> Winding {
        if self.area_signed() > P::Num::zero() {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }
}

/// Direction a ring walks around its interior. In a shapefile polygon, clockwise rings are fills and
/// counter-clockwise rings are holes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Winding {
    /// Fill ring.
    Clockwise,
    /// Hole ring.
    CounterClockwise,
}

/// Measures shared by polyline parts and rings.
pub trait CartesianContour<P: CartesianPoint2d>: Contour<Point = P> {
    /// Squared distance from `point` to the nearest segment, `None` for contours with fewer than two points.
    fn distance_to_point_sq<Point>(&self, point: &Point) -> Option<P::Num>
    where
        Point: CartesianPoint2d<Num = P::Num>,
    {
        self.iter_segments()
            .map(|segment| segment.distance_to_point_sq(point))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Box around all vertices.
    fn bounding_rect(&self) -> Option<Rect<P::Num>> {
        Rect::from_points(self.iter_points())
    }

    /// Sum of segment lengths. For rings this is the perimeter since the closing vertex is stored.
    fn length(&self) -> P::Num
    where
        P::Num: Float,
    {
        self.iter_segments()
            .map(|Segment(a, b)| a.distance(b))
            .fold(P::Num::zero(), |acc, l| acc + l)
    }
}

impl<T: Contour<Point = P>, P: CartesianPoint2d> CartesianContour<P> for T {}
