use geo::BooleanOps;
use geo_types::{LineString, MultiPolygon, Polygon as GeoPolygon};
use hydroclip_types::cartesian::{CartesianClosedContour, Point2d, Rect};
use hydroclip_types::{ClosedContour, Polygon};
use log::debug;

use super::clamp_to;

pub(super) fn clip(polygon: &Polygon<Point2d>, bounds: Rect) -> Polygon<Point2d> {
    let Some(polygon_bounds) = polygon.bounding_rect() else {
        return Polygon::new();
    };

    if !polygon_bounds.intersects(&bounds) {
        return Polygon::new();
    }

    let clipped = if bounds.contains_rect(&polygon_bounds) {
        polygon.clone()
    } else {
        let clip_area = MultiPolygon::new(vec![geo_types::Rect::from(bounds).to_polygon()]);
        from_multi_polygon(&to_multi_polygon(polygon).intersection(&clip_area), bounds)
    };

    finalize(clipped)
}

/// Makes a valid multi polygon out of the rings: union of all fills minus union of all holes.
fn to_multi_polygon(polygon: &Polygon<Point2d>) -> MultiPolygon<f64> {
    let mut fills: Option<MultiPolygon<f64>> = None;
    let mut holes: Option<MultiPolygon<f64>> = None;

    for (contour, is_hole) in polygon.iter_contours() {
        let ring = MultiPolygon::new(vec![GeoPolygon::new(LineString::from(contour), vec![])]);
        let target = if is_hole { &mut holes } else { &mut fills };
        *target = Some(match target.take() {
            Some(acc) => acc.union(&ring),
            None => ring,
        });
    }

    match (fills, holes) {
        (Some(fills), Some(holes)) => fills.difference(&holes),
        (Some(fills), None) => fills,
        (None, _) => MultiPolygon::new(vec![]),
    }
}

fn from_multi_polygon(multi_polygon: &MultiPolygon<f64>, bounds: Rect) -> Polygon<Point2d> {
    let ring_count = multi_polygon
        .iter()
        .map(|p| p.interiors().len() + 1)
        .sum();
    let mut result = Polygon::with_capacity(ring_count);

    for geo_polygon in multi_polygon {
        result.push(to_ring(geo_polygon.exterior(), bounds), false);
        for interior in geo_polygon.interiors() {
            result.push(to_ring(interior, bounds), true);
        }
    }

    result
}

fn to_ring(line: &LineString<f64>, bounds: Rect) -> ClosedContour<Point2d> {
    let mut ring = ClosedContour::<Point2d>::from(line);
    for p in &mut ring.points {
        *p = clamp_to(*p, bounds);
    }

    ring
}

/// Drops rings without area, orients the rest and rejects the polygon if its net area is not positive.
fn finalize(polygon: Polygon<Point2d>) -> Polygon<Point2d> {
    let mut result = Polygon::with_capacity(polygon.contour_count());
    for (contour, is_hole) in polygon.iter_contours() {
        if contour.points.len() >= 4 && contour.area_signed() != 0.0 {
            result.push(contour.clone(), is_hole);
        }
    }

    let reversed = result.orient_contours();
    if reversed > 0 {
        debug!("{reversed} rings reversed after clipping");
    }

    if result.net_area() <= 0.0 {
        if !result.is_empty() {
            debug!("Clipped polygon has no positive area and is dropped");
        }
        return Polygon::new();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hydroclip_types::cartesian::{CartesianPoint2d, Winding};

    fn ring(coords: &[(f64, f64)]) -> ClosedContour<Point2d> {
        ClosedContour::new(coords.iter().map(|(x, y)| Point2d::new(*x, *y)).collect())
    }

    fn square_with_hole() -> Polygon<Point2d> {
        let mut polygon = Polygon::new();
        polygon.push(
            ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]),
            false,
        );
        polygon.push(
            ring(&[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0), (4.0, 4.0)]),
            true,
        );
        polygon
    }

    #[test]
    fn inside_polygon_is_kept() {
        let polygon = square_with_hole();
        let clipped = clip(&polygon, Rect::new(-1.0, -1.0, 11.0, 11.0));
        assert_eq!(clipped, polygon);
    }

    #[test]
    fn hole_survives_clipping() {
        let clipped = clip(&square_with_hole(), Rect::new(2.0, 2.0, 8.0, 8.0));
        assert_eq!(clipped.contour_count(), 2);
        assert_eq!(clipped.holes().iter().filter(|h| **h).count(), 1);
        assert_abs_diff_eq!(clipped.net_area(), 32.0, epsilon = 1e-9);

        for (contour, is_hole) in clipped.iter_contours() {
            let expected = if is_hole {
                Winding::CounterClockwise
            } else {
                Winding::Clockwise
            };
            assert_eq!(contour.winding(), expected);
        }
    }

    #[test]
    fn hole_covering_clip_area_rejects_polygon() {
        let clipped = clip(&square_with_hole(), Rect::new(4.5, 4.5, 5.5, 5.5));
        assert!(clipped.is_empty());
    }

    #[test]
    fn counter_clockwise_fill_is_reoriented() {
        let mut polygon = Polygon::new();
        polygon.push(
            ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            false,
        );
        let clipped = clip(&polygon, Rect::new(5.0, 5.0, 20.0, 20.0));
        assert_eq!(clipped.contour_count(), 1);
        assert_eq!(clipped.contours()[0].winding(), Winding::Clockwise);
        assert_abs_diff_eq!(clipped.net_area(), 25.0, epsilon = 1e-9);

        let bounds = clipped.bounding_rect().unwrap();
        assert_abs_diff_eq!(bounds.x_min(), 5.0);
        assert_abs_diff_eq!(bounds.y_max(), 10.0);
        assert!(clipped.contours()[0]
            .points
            .iter()
            .all(|p| p.x() >= 5.0 && p.y() >= 5.0));
    }
}
