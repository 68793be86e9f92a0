//! Interoperability with `geo-types`.

use geo_types::{coord, Coord, CoordNum, LineString};
use num_traits::{Bounded, FromPrimitive};

use crate::cartesian::{CartesianPoint2d, NewCartesianPoint2d, Point2, Rect};
use crate::contour::{ClosedContour, OpenContour};

impl<T: CoordNum + Bounded + FromPrimitive> CartesianPoint2d for Coord<T> {
    type Num = T;

    fn x(&self) -> Self::Num {
        self.x
    }

    fn y(&self) -> Self::Num {
        self.y
    }
}

impl<T: CoordNum + Bounded + FromPrimitive> NewCartesianPoint2d<T> for Coord<T> {
    fn new(x: T, y: T) -> Self {
        coord!(x: x, y: y)
    }
}

impl<T: CoordNum> From<Point2<T>> for Coord<T> {
    fn from(value: Point2<T>) -> Self {
        let [x, y] = value.coords();
        coord!(x: x, y: y)
    }
}

impl<T: CoordNum> From<Coord<T>> for Point2<T> {
    fn from(value: Coord<T>) -> Self {
        Point2::new(value.x, value.y)
    }
}

impl<T: CoordNum> From<&ClosedContour<Point2<T>>> for LineString<T> {
    fn from(value: &ClosedContour<Point2<T>>) -> Self {
        LineString::new(value.points.iter().map(|p| Coord::from(*p)).collect())
    }
}

impl<T: CoordNum> From<&LineString<T>> for ClosedContour<Point2<T>> {
    fn from(value: &LineString<T>) -> Self {
        let mut points: Vec<Point2<T>> = value.0.iter().map(|c| Point2::from(*c)).collect();
        if let (Some(first), Some(last)) = (points.first().copied(), points.last()) {
            if first != *last {
                points.push(first);
            }
        }

        ClosedContour::new(points)
    }
}

impl<T: CoordNum> From<&OpenContour<Point2<T>>> for LineString<T> {
    fn from(value: &OpenContour<Point2<T>>) -> Self {
        LineString::new(value.points.iter().map(|p| Coord::from(*p)).collect())
    }
}

impl<T: CoordNum> From<Rect<T>> for geo_types::Rect<T> {
    fn from(value: Rect<T>) -> Self {
        geo_types::Rect::new(
            coord!(x: value.x_min(), y: value.y_min()),
            coord!(x: value.x_max(), y: value.y_max()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2d;

    #[test]
    fn line_string_to_ring_adds_closing_vertex() {
        let line = LineString::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let ring = ClosedContour::<Point2d>::from(&line);
        assert_eq!(ring.points.len(), 4);
        assert_eq!(ring.points[0], ring.points[3]);

        let back = LineString::from(&ring);
        assert!(back.is_closed());
    }
}
