use crate::cartesian::{CartesianPoint2d, Rect};
use num_traits::{One, Zero};

/// Pair of consecutive contour vertices.
#[derive(Debug, PartialEq)]
pub struct Segment<'a, Point>(pub &'a Point, pub &'a Point);

impl<P: CartesianPoint2d> Segment<'_, P> {
    /// Squared distance from `point` to the closest point of the segment.
    ///
    /// The point is projected onto the segment line; a projection falling outside the segment snaps to the nearer
    /// endpoint. Zero-length segments degrade to a point-to-point distance.
    pub fn distance_to_point_sq<Point: CartesianPoint2d<Num = P::Num>>(
        &self,
        point: &Point,
    ) -> P::Num {
        let along = self.1.sub(self.0);
        let len_sq = along.length_sq();
        if len_sq == P::Num::zero() {
            return self.0.distance_sq(point);
        }

        let to_point = point.sub(self.0);
        let t = along.dot(&to_point) / len_sq;
        if t <= P::Num::zero() {
            return self.0.distance_sq(point);
        }
        if t >= P::Num::one() {
            return self.1.distance_sq(point);
        }

        let cross = along.cross(&to_point);
        cross * cross / len_sq
    }

    /// Bounding rectangle of the segment.
    pub fn bounding_rect(&self) -> Rect<P::Num> {
        Rect::new(self.0.x(), self.0.y(), self.1.x(), self.1.y())
    }
}
