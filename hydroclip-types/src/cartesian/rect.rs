use crate::cartesian::CartesianPoint2d;
use crate::cartesian::Point2;
use crate::contour::ClosedContour;
use crate::error::HydroclipTypesError;
use num_traits::Num;
use serde::{Deserialize, Serialize};

/// Bounding box of a shape, a clip window or a shapefile header. Every constructor keeps `min <= max` on both
/// axes.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    x_min: N,
    y_min: N,
    x_max: N,
    y_max: N,
}

fn lesser<N: PartialOrd>(a: N, b: N) -> N {
    if b < a {
        b
    } else {
        a
    }
}

fn greater<N: PartialOrd>(a: N, b: N) -> N {
    if b > a {
        b
    } else {
        a
    }
}

impl<N: Num + Copy + PartialOrd> Rect<N> {
    /// Box spanning the two corners. Limits given in the wrong order are swapped.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min: lesser(x_min, x_max),
            y_min: lesser(y_min, y_max),
            x_max: greater(x_min, x_max),
            y_max: greater(y_min, y_max),
        }
    }

    /// All-zero box. Empty shapes report this as their bounds, as shapefiles do.
    pub fn zero() -> Self {
        Self::new(N::zero(), N::zero(), N::zero(), N::zero())
    }

    /// Degenerate box around a single point.
    pub fn from_point(p: &impl CartesianPoint2d<Num = N>) -> Self {
        Self::new(p.x(), p.y(), p.x(), p.y())
    }

    /// Tight box around the points, `None` when there are none.
    pub fn from_points<'a, P: CartesianPoint2d<Num = N> + 'a>(
        mut points: impl Iterator<Item = &'a P>,
    ) -> Option<Self> {
        let mut rect = Self::from_point(points.next()?);
        points.for_each(|p| rect.include(p));
        Some(rect)
    }

    /// Left edge.
    pub fn x_min(&self) -> N {
        self.x_min
    }

    /// Right edge.
    pub fn x_max(&self) -> N {
        self.x_max
    }

    /// Bottom edge.
    pub fn y_min(&self) -> N {
        self.y_min
    }

    /// Top edge.
    pub fn y_max(&self) -> N {
        self.y_max
    }

    /// Box grown by `margin` on each side.
    pub fn expand(&self, margin: N) -> Self {
        Self::new(
            self.x_min - margin,
            self.y_min - margin,
            self.x_max + margin,
            self.y_max + margin,
        )
    }

    /// Smallest box covering both.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: lesser(self.x_min, other.x_min),
            y_min: lesser(self.y_min, other.y_min),
            x_max: greater(self.x_max, other.x_max),
            y_max: greater(self.y_max, other.y_max),
        }
    }

    /// Box covering every box of the iterator, `None` for an empty one.
    pub fn merge_all(iter: impl IntoIterator<Item = Self>) -> Option<Self> {
        iter.into_iter().reduce(|acc, r| acc.merge(r))
    }

    /// Extends the box so the point is inside.
    pub fn include(&mut self, p: &impl CartesianPoint2d<Num = N>) {
        *self = self.merge(Self::from_point(p));
    }

    /// Border counts as inside.
    pub fn contains(&self, point: &impl CartesianPoint2d<Num = N>) -> bool {
        (self.x_min..=self.x_max).contains(&point.x())
            && (self.y_min..=self.y_max).contains(&point.y())
    }

    /// Whether `other` is fully covered by this box.
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.x_min <= other.x_min
            && other.x_max <= self.x_max
            && self.y_min <= other.y_min
            && other.y_max <= self.y_max
    }

    /// Whether the boxes share at least one point, touching borders included.
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.x_max < self.x_min
            || self.x_max < other.x_min
            || other.y_max < self.y_min
            || self.y_max < other.y_min)
    }

    /// Corners going clockwise from `(x_min, y_min)`.
    pub fn into_quadrangle(self) -> [Point2<N>; 4] {
        [
            Point2::new(self.x_min, self.y_min),
            Point2::new(self.x_min, self.y_max),
            Point2::new(self.x_max, self.y_max),
            Point2::new(self.x_max, self.y_min),
        ]
    }

    /// The box as a clockwise shapefile ring: four corners plus the closing vertex.
    pub fn into_contour(self) -> ClosedContour<Point2<N>> {
        let corners = self.into_quadrangle();
        let mut points = corners.to_vec();
        points.push(corners[0]);
        ClosedContour::new(points)
    }
}

impl Rect<f64> {
    /// Creates a rectangle, failing if a minimum exceeds its maximum or a limit is not finite.
    pub fn try_new(
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
    ) -> Result<Self, HydroclipTypesError> {
        let valid = [x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite())
            && x_min <= x_max
            && y_min <= y_max;
        if !valid {
            return Err(HydroclipTypesError::InvalidBounds {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }

        Ok(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::{CartesianClosedContour, Point2d, Winding};
    use assert_matches::assert_matches;

    #[test]
    fn new_normalizes_limits() {
        let rect = Rect::new(10.0, 8.0, 2.0, 1.0);
        assert_eq!(rect.x_min(), 2.0);
        assert_eq!(rect.x_max(), 10.0);
        assert_eq!(rect.y_min(), 1.0);
        assert_eq!(rect.y_max(), 8.0);
    }

    #[test]
    fn try_new_rejects_inverted() {
        assert_matches!(
            Rect::try_new(1.0, 0.0, 0.0, 1.0),
            Err(HydroclipTypesError::InvalidBounds { .. })
        );
        assert_matches!(
            Rect::try_new(0.0, f64::NAN, 1.0, 1.0),
            Err(HydroclipTypesError::InvalidBounds { .. })
        );
        assert!(Rect::try_new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn from_points() {
        let points = [
            Point2d::new(1.0, 5.0),
            Point2d::new(-1.0, 2.0),
            Point2d::new(3.0, 0.0),
        ];
        let rect = Rect::from_points(points.iter()).unwrap();
        assert_eq!(rect, Rect::new(-1.0, 0.0, 3.0, 5.0));
        assert_eq!(Rect::<f64>::from_points(std::iter::empty::<&Point2d>()), None);
    }

    #[test]
    fn intersects() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        assert!(a.intersects(&Rect::new(1.0, 1.0, 3.0, 3.0)));
        assert!(a.intersects(&Rect::new(2.0, 2.0, 3.0, 3.0)));
        assert!(!a.intersects(&Rect::new(2.1, 0.0, 3.0, 3.0)));
        assert!(a.contains_rect(&Rect::new(0.5, 0.5, 1.0, 1.0)));
    }

    #[test]
    fn contour_is_closed_and_clockwise() {
        let contour = Rect::new(0.0, 0.0, 2.0, 1.0).into_contour();
        assert_eq!(contour.points.len(), 5);
        assert_eq!(contour.points[0], contour.points[4]);
        assert_eq!(contour.winding(), Winding::Clockwise);
        assert_eq!(contour.area_signed(), -2.0);
    }

    #[test]
    fn merge_all() {
        let merged = Rect::merge_all([
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(-1.0, 0.5, 0.5, 3.0),
        ]);
        assert_eq!(merged, Some(Rect::new(-1.0, 0.0, 1.0, 3.0)));
        assert_eq!(Rect::<f64>::merge_all([]), None);
    }
}
