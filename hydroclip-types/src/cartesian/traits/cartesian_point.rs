use crate::cartesian::Vector2;
use num_traits::{Bounded, Float, FromPrimitive, Num};

/// Anything with planar `x` and `y` coordinates.
pub trait CartesianPoint2d {
    /// Coordinate type.
    type Num: Num + Copy + PartialOrd + Bounded + FromPrimitive;

    /// Horizontal coordinate (easting or longitude).
    fn x(&self) -> Self::Num;
    /// Vertical coordinate (northing or latitude).
    fn y(&self) -> Self::Num;

    /// Exact coordinate equality, no tolerance.
    fn equal(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }

    /// Offset that leads from `other` to this point.
    fn sub(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Vector2<Self::Num> {
        Vector2::new(self.x() - other.x(), self.y() - other.y())
    }

    /// Squared euclidean distance.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        self.sub(other).length_sq()
    }

    /// `|dx| + |dy|`. Used where a station has to be matched to the nearest candidate cheaply.
    fn taxicab_distance(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let abs_diff = |a: Self::Num, b: Self::Num| if a >= b { a - b } else { b - a };
        abs_diff(self.x(), other.x()) + abs_diff(self.y(), other.y())
    }
}

/// Point that can be built from a pair of coordinates. Required by projections to produce their output.
pub trait NewCartesianPoint2d<Num = f64>: CartesianPoint2d<Num = Num> {
    /// Point at `(x, y)`.
    fn new(x: Num, y: Num) -> Self;
}

/// Euclidean distance for float coordinates. Implemented for every [`CartesianPoint2d`] with a float `Num`.
pub trait CartesianPoint2dFloat<N: Float = f64>: CartesianPoint2d<Num = N> {
    /// Euclidean distance.
    fn distance(&self, other: &impl CartesianPoint2d<Num = N>) -> N {
        self.distance_sq(other).sqrt()
    }
}

impl<N: Float, T: CartesianPoint2d<Num = N>> CartesianPoint2dFloat<N> for T {}

/// Point with an elevation.
pub trait CartesianPoint3d {
    /// Coordinate type.
    type Num: Num + Copy + PartialOrd;

    /// Horizontal coordinate.
    fn x(&self) -> Self::Num;
    /// Vertical coordinate.
    fn y(&self) -> Self::Num;
    /// Elevation.
    fn z(&self) -> Self::Num;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2d;

    #[test]
    fn distances() {
        let a = Point2d::new(1.0, 1.0);
        let b = Point2d::new(4.0, -3.0);
        assert_eq!(a.distance_sq(&b), 25.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.taxicab_distance(&b), 7.0);
        assert_eq!(b.taxicab_distance(&a), 7.0);
        assert!(a.equal(&Point2d::new(1.0, 1.0)));
    }
}
