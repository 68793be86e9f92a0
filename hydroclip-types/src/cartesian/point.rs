use num_traits::{Bounded, FromPrimitive, Num};
use serde::{Deserialize, Serialize};

use crate::cartesian::traits::{CartesianPoint2d, CartesianPoint3d, NewCartesianPoint2d};

/// Planar point with `f64` coordinates. All shapefile vertices are stored as this type.
pub type Point2d = Point2<f64>;
/// Point with elevation, written out as a `PointZ` record.
pub type Point3d = Point3<f64>;

/// Vertex on a projected or geographic plane.
///
/// Coordinates are private so that every consumer goes through [`CartesianPoint2d`], which is also implemented
/// for `geo_types::Coord`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point2<N = f64> {
    x: N,
    y: N,
}

impl<N> Point2<N> {
    /// Point at `(x, y)`.
    pub const fn new(x: N, y: N) -> Self {
        Self { x, y }
    }

    /// `[x, y]` pair.
    pub fn coords(&self) -> [N; 2]
    where
        N: Copy,
    {
        [self.x, self.y]
    }
}

impl<N: Num + Copy + PartialOrd + Bounded + FromPrimitive> CartesianPoint2d for Point2<N> {
    type Num = N;

    fn x(&self) -> N {
        self.x
    }

    fn y(&self) -> N {
        self.y
    }
}

impl<N: Num + Copy + PartialOrd + Bounded + FromPrimitive> NewCartesianPoint2d<N> for Point2<N> {
    fn new(x: N, y: N) -> Self {
        Self { x, y }
    }
}

/// Vertex with an elevation or any other third value carried along.
#[derive(Debug, Default, Copy, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point3<N = f64> {
    x: N,
    y: N,
    z: N,
}

impl<N> Point3<N> {
    /// Point at `(x, y, z)`.
    pub const fn new(x: N, y: N, z: N) -> Self {
        Self { x, y, z }
    }
}

impl<N: Copy> Point3<N> {
    /// The point with `z` dropped.
    pub fn planar(&self) -> Point2<N> {
        Point2::new(self.x, self.y)
    }
}

impl<N: Num + Copy + PartialOrd> CartesianPoint3d for Point3<N> {
    type Num = N;

    fn x(&self) -> N {
        self.x
    }

    fn y(&self) -> N {
        self.y
    }

    fn z(&self) -> N {
        self.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_drops_elevation() {
        let gauge = Point3d::new(12.5, 46.0, 310.0);
        assert_eq!(gauge.planar(), Point2d::new(12.5, 46.0));
        assert_eq!(gauge.z(), 310.0);
    }
}
