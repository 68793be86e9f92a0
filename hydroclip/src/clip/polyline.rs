use hydroclip_types::cartesian::{CartesianPoint2d, Point2d, Rect};
use hydroclip_types::{OpenContour, Polyline};

use super::clamp_to;

/// Clips the segment `a`-`b` with the rectangle using the Liang-Barsky algorithm.
///
/// Returns the parameters `(t0, t1)` of the visible part of the segment, where `0` is `a` and `1` is `b`, or `None` if
/// no part of the segment is inside the rectangle.
pub fn clip_segment(a: &Point2d, b: &Point2d, bounds: Rect) -> Option<(f64, f64)> {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();

    let mut t0 = 0.0;
    let mut t1 = 1.0;

    let edges = [
        (-dx, a.x() - bounds.x_min()),
        (dx, bounds.x_max() - a.x()),
        (-dy, a.y() - bounds.y_min()),
        (dy, bounds.y_max() - a.y()),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to the edge and outside of it.
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }

    Some((t0, t1))
}

fn point_at(a: &Point2d, b: &Point2d, t: f64, bounds: Rect) -> Point2d {
    if t <= 0.0 {
        *a
    } else if t >= 1.0 {
        *b
    } else {
        let p = Point2d::new(a.x() + (b.x() - a.x()) * t, a.y() + (b.y() - a.y()) * t);
        clamp_to(p, bounds)
    }
}

/// Accumulates visible pieces of one input part into output parts.
struct PartCollector {
    parts: Vec<OpenContour<Point2d>>,
    current: Vec<Point2d>,
}

impl PartCollector {
    fn push(&mut self, point: Point2d) {
        if self.current.last() != Some(&point) {
            self.current.push(point);
        }
    }

    fn flush(&mut self) {
        if self.current.len() >= 2 {
            self.parts
                .push(OpenContour::new(std::mem::take(&mut self.current)));
        } else {
            self.current.clear();
        }
    }
}

pub(super) fn clip(polyline: &Polyline<Point2d>, bounds: Rect) -> Polyline<Point2d> {
    let mut collector = PartCollector {
        parts: vec![],
        current: vec![],
    };

    for part in &polyline.parts {
        // Whether the last visible piece reached the end of its segment, so the next one continues the same part.
        let mut open = false;

        for segment in part.points.windows(2) {
            let (a, b) = (&segment[0], &segment[1]);
            let Some((t0, t1)) = clip_segment(a, b, bounds) else {
                collector.flush();
                open = false;
                continue;
            };

            if !(open && t0 <= 0.0) {
                collector.flush();
                collector.push(point_at(a, b, t0, bounds));
            }

            collector.push(point_at(a, b, t1, bounds));
            open = t1 >= 1.0;
            if !open {
                collector.flush();
            }
        }

        collector.flush();
    }

    Polyline::new(collector.parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line(coords: &[(f64, f64)]) -> Polyline<Point2d> {
        Polyline::new(vec![OpenContour::new(
            coords.iter().map(|(x, y)| Point2d::new(*x, *y)).collect(),
        )])
    }

    #[test]
    fn segment_parameters() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (t0, t1) =
            clip_segment(&Point2d::new(-5.0, 5.0), &Point2d::new(15.0, 5.0), bounds).unwrap();
        assert_abs_diff_eq!(t0, 0.25);
        assert_abs_diff_eq!(t1, 0.75);

        assert_eq!(
            clip_segment(&Point2d::new(1.0, 1.0), &Point2d::new(2.0, 2.0), bounds),
            Some((0.0, 1.0))
        );
        assert_eq!(
            clip_segment(&Point2d::new(-1.0, 11.0), &Point2d::new(11.0, 11.0), bounds),
            None
        );
        assert_eq!(
            clip_segment(&Point2d::new(-5.0, 0.0), &Point2d::new(0.0, 20.0), bounds),
            None
        );
    }

    #[test]
    fn inside_line_is_unchanged() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let input = line(&[(1.0, 1.0), (2.0, 5.0), (3.0, 3.0)]);
        assert_eq!(clip(&input, bounds), input);
    }

    #[test]
    fn crossing_line_is_cut() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let clipped = clip(&line(&[(-5.0, 5.0), (5.0, 5.0), (5.0, 15.0)]), bounds);
        assert_eq!(clipped.parts.len(), 1);
        assert_eq!(
            clipped.parts[0].points,
            vec![
                Point2d::new(0.0, 5.0),
                Point2d::new(5.0, 5.0),
                Point2d::new(5.0, 10.0)
            ]
        );
    }

    #[test]
    fn leaving_and_returning_makes_two_parts() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let clipped = clip(
            &line(&[(2.0, 2.0), (2.0, 12.0), (8.0, 12.0), (8.0, 2.0)]),
            bounds,
        );
        assert_eq!(clipped.parts.len(), 2);
        assert_eq!(clipped.parts[0].points[1], Point2d::new(2.0, 10.0));
        assert_eq!(clipped.parts[1].points[0], Point2d::new(8.0, 10.0));
    }

    #[test]
    fn corner_touch_is_dropped() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let clipped = clip(&line(&[(-5.0, 5.0), (5.0, -5.0)]), bounds);
        assert!(clipped.is_empty());
    }
}
