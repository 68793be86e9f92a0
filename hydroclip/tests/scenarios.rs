use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use hydroclip::export::export_polygons;
use hydroclip::{
    BoundsClipper, EngineConfig, FlowNetworkTracer, PolygonBuilder, RingKind, Shape, ShapeGeometry,
    ShapeSet, VertexSparsifier,
};
use hydroclip_shp::{FILE_CODE, HEADER_LENGTH};
use hydroclip_types::cartesian::{CartesianPoint2d, Point2d, Rect};
use hydroclip_types::{OpenContour, Polygon, Polyline};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn points(coords: &[(f64, f64)]) -> Vec<Point2d> {
    coords.iter().map(|(x, y)| Point2d::new(*x, *y)).collect()
}

/// Star-shaped ring with `spikes` outer vertices, clockwise, closed.
fn star(center: (f64, f64), inner: f64, outer: f64, spikes: usize) -> Vec<Point2d> {
    let mut ring: Vec<Point2d> = (0..spikes * 2)
        .map(|i| {
            let angle = -(i as f64) * PI / spikes as f64;
            let r = if i % 2 == 0 { outer } else { inner };
            Point2d::new(center.0 + r * angle.cos(), center.1 + r * angle.sin())
        })
        .collect();
    ring.push(ring[0]);
    ring
}

fn clip_bounds() -> Vec<Rect> {
    vec![
        Rect::new(2.0, 2.0, 8.0, 8.0),
        Rect::new(-3.0, 4.5, 5.3, 20.0),
        Rect::new(4.9, -1.0, 5.1, 11.0),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Rect::new(7.7, 7.7, 30.0, 30.0),
    ]
}

fn test_polygons() -> Vec<Polygon<Point2d>> {
    let builder = PolygonBuilder::new(0.0);
    let mut polygons = vec![];
    for (i, spikes) in [3, 5, 8, 13].into_iter().enumerate() {
        let center = (3.0 + i as f64 * 1.5, 6.0 - i as f64);
        let outer = star(center, 1.5, 4.0, spikes);
        let hole: Vec<Point2d> = star(center, 0.3, 0.6, 4).into_iter().rev().collect();
        let (polygon, _) = builder.build_parts([outer.as_slice(), hole.as_slice()]);
        polygons.push(polygon);
    }

    polygons
}

#[test]
fn clipped_vertices_stay_within_bounds() {
    init_logger();
    let polyline = Polyline::new(vec![OpenContour::new(
        (0..60)
            .map(|i| {
                let t = i as f64 / 4.0;
                Point2d::new(t * 0.9 - 2.0, 5.0 + 7.0 * (t * 1.3).sin())
            })
            .collect(),
    )]);

    for bounds in clip_bounds() {
        let clipper = BoundsClipper::new(bounds);

        for polygon in test_polygons() {
            let clipped = clipper.clip_polygon(&polygon);
            for contour in clipped.geometry.contours() {
                for p in &contour.points {
                    assert!(bounds.contains(p), "{p:?} escaped {bounds:?}");
                }
            }
            if !clipped.geometry.is_empty() {
                assert!(bounds.contains_rect(&clipped.bounds));
            }
        }

        let clipped = clipper.clip_polyline(&polyline);
        for part in &clipped.geometry.parts {
            assert!(part.points.len() >= 2);
            for p in &part.points {
                assert!(bounds.contains(p), "{p:?} escaped {bounds:?}");
            }
        }
    }
}

#[test]
fn clipped_polygons_have_positive_area() {
    init_logger();
    for bounds in clip_bounds() {
        let clipper = BoundsClipper::new(bounds);
        for polygon in test_polygons() {
            let clipped = clipper.clip_polygon(&polygon).geometry;
            if clipped.is_empty() {
                continue;
            }

            assert!(clipped.net_area() > 0.0);
            assert_eq!(clipped.contours().len(), clipped.holes().len());
            for (contour, is_hole) in clipped.iter_contours() {
                assert_eq!(Polygon::ring_area(contour) < 0.0, is_hole);
            }
        }
    }
}

#[test]
fn sparsification_is_idempotent() {
    let rings = [
        star((0.0, 0.0), 0.5, 3.0, 17),
        star((10.0, -4.0), 0.01, 0.05, 40),
        points(&[(0.0, 0.0), (0.1, 0.0), (0.2, 0.05), (1.0, 1.0), (1.05, 1.02), (0.0, 1.0)]),
    ];

    for distance in [0.0, 0.01, 0.1, 0.35, 1.0] {
        let sparsifier = VertexSparsifier::new(distance);
        for ring in &rings {
            for kind in [RingKind::Polygon, RingKind::Polyline] {
                let Some(once) = sparsifier.sparsify(ring, kind) else {
                    continue;
                };
                let twice = sparsifier
                    .sparsify(&once.points, kind)
                    .expect("sparsified ring must survive again");
                assert_eq!(once, twice, "distance {distance}, {kind:?}");
            }
        }
    }
}

#[test]
fn square_clip() {
    init_logger();
    // Notched at the top and at the bottom, fully inside [0,0]-[10,10].
    let ring = points(&[
        (1.0, 1.0),
        (1.0, 9.0),
        (4.0, 9.0),
        (5.0, 6.0),
        (6.0, 9.0),
        (9.0, 9.0),
        (9.0, 1.0),
        (5.0, 4.0),
        (1.0, 1.0),
    ]);
    let (polygon, _) = PolygonBuilder::new(0.0).build_parts([ring.as_slice()]);
    assert_eq!(polygon.holes(), &[false]);

    let clip = Rect::new(2.0, 2.0, 8.0, 8.0);
    let clipped = BoundsClipper::new(clip).clip_polygon(&polygon);
    assert_eq!(clipped.geometry.contour_count(), 1);

    let bounds = Rect::from_points(clipped.geometry.contours()[0].points.iter())
        .expect("clipped ring has vertices");
    assert!(clip.contains_rect(&bounds));
    assert_eq!(bounds, clipped.bounds);
}

#[test]
fn zigzag_polyline_is_split() {
    let zigzag = Polyline::new(vec![OpenContour::new(points(&[
        (0.0, -1.0),
        (2.0, 1.0),
        (4.0, -1.0),
        (6.0, 1.0),
        (8.0, -1.0),
        (10.0, 1.0),
        (12.0, -1.0),
    ]))]);

    let clipped = BoundsClipper::new(Rect::new(0.0, 0.0, 12.0, 5.0)).clip_polyline(&zigzag);
    let parts = &clipped.geometry.parts;
    assert_eq!(parts.len(), 3);
    for (part, peak) in parts.iter().zip([2.0, 6.0, 10.0]) {
        assert_eq!(part.points.len(), 3);
        assert_abs_diff_eq!(part.points[0].x(), peak - 1.0);
        assert_abs_diff_eq!(part.points[1].x(), peak);
        assert_abs_diff_eq!(part.points[2].x(), peak + 1.0);
    }
}

#[test]
fn upstream_trace() {
    let (a, b, c, d, e) = (1, 2, 3, 4, 5);
    let ids = [10, 20, 30, 40];
    let from = [a, b, d, c];
    let to = [b, c, b, e];

    let tracer = FlowNetworkTracer::new(&ids, &from, &to).unwrap();
    let trace = tracer.trace(40);
    assert_eq!(trace.count, 4);
    assert_eq!(trace.mask, vec![true; 4]);

    assert_eq!(tracer.trace(99).count, 0);
}

#[test]
fn three_edges_upstream_of_outlet() {
    let (a, b, c, d) = (1, 2, 3, 4);
    let ids = [10, 20, 30];
    let from = [a, b, d];
    let to = [b, c, b];
    let tracer = FlowNetworkTracer::new(&ids, &from, &to).unwrap();

    let mut mask = vec![false; 3];
    assert_eq!(tracer.mark_upstream(c, &mut mask), 3);
    assert_eq!(mask, vec![true; 3]);

    // Tracing the outlet segment B -> C reaches the same rows.
    let trace = tracer.trace(20);
    assert_eq!(trace.count, 3);
    assert_eq!(trace.mask, vec![true; 3]);

    let mut mask = vec![false; 3];
    assert_eq!(tracer.mark_upstream(a, &mut mask), 0);
}

#[test]
fn cycle_with_tributaries_terminates() {
    const K: i64 = 5;

    let mut ids = vec![];
    let mut from = vec![];
    let mut to = vec![];
    let mut push = |id: i64, f: i64, t: i64| {
        ids.push(id);
        from.push(f);
        to.push(t);
    };

    // Cycle 1 -> 2 -> ... -> K -> 1.
    for i in 0..K {
        push(i + 1, i + 1, (i + 1) % K + 1);
    }
    // Tributaries feeding the cycle, one of them with a tributary of its own.
    for j in 1..=3 {
        push(100 + j, 100 + j, j);
    }
    push(200, 200, 101);
    // Unconnected segment.
    push(300, 300, 301);

    let tracer = FlowNetworkTracer::new(&ids, &from, &to).unwrap();
    let trace = tracer.trace(1);
    assert_eq!(trace.count, K as usize + 4);
    assert!(!trace.mask[trace.mask.len() - 1]);
}

#[test]
fn header_readback() -> anyhow::Result<()> {
    init_logger();
    let mut shapes = ShapeSet::new();
    for (id, polygon) in test_polygons().into_iter().enumerate() {
        shapes.push(Shape::new(id, ShapeGeometry::Polygon(polygon)));
    }
    let expected = shapes.bounds().expect("set is not empty");

    let dir = tempfile::tempdir()?;
    let base = dir.path().join("basins");
    export_polygons(&shapes, &base, &EngineConfig::default())?;

    let shp = std::fs::read(base.with_extension("shp"))?;
    let shx = std::fs::read(base.with_extension("shx"))?;

    let be_i32 = |bytes: &[u8], offset: usize| {
        i32::from_be_bytes(bytes[offset..offset + 4].try_into().expect("4 bytes"))
    };
    let le_i32 = |bytes: &[u8], offset: usize| {
        i32::from_le_bytes(bytes[offset..offset + 4].try_into().expect("4 bytes"))
    };
    let le_f64 = |bytes: &[u8], offset: usize| {
        f64::from_le_bytes(bytes[offset..offset + 8].try_into().expect("8 bytes"))
    };

    assert_eq!(be_i32(&shp, 0), FILE_CODE);
    assert_eq!(be_i32(&shp, 24) as usize * 2, shp.len());
    assert_eq!(le_i32(&shp, 28), 1000);
    assert_eq!(le_i32(&shp, 32), 5);
    assert_eq!(le_f64(&shp, 36), expected.x_min());
    assert_eq!(le_f64(&shp, 44), expected.y_min());
    assert_eq!(le_f64(&shp, 52), expected.x_max());
    assert_eq!(le_f64(&shp, 60), expected.y_max());

    assert_eq!(be_i32(&shx, 24) as usize * 2, shx.len());
    assert_eq!(shx.len(), HEADER_LENGTH + 8 * shapes.len());
    // First record starts right after the header, offsets are in words.
    assert_eq!(be_i32(&shx, HEADER_LENGTH), 50);

    Ok(())
}
