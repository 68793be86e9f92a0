use hydroclip::export::export_polylines;
use hydroclip::locate::{nearest_table_point, PointLocator};
use hydroclip::measure::apply_measures;
use hydroclip::subset::subset_file;
use hydroclip::table::{AttributeTable, ColumnType, Value};
use hydroclip::{EngineConfig, FlowNetworkTracer};
use hydroclip_shp::{ShapeReader, ShapeType, ShapeWriter};
use hydroclip_types::cartesian::{Point2d, Rect};
use hydroclip_types::geo::IdentityProjection;
use hydroclip_types::{OpenContour, Polygon, Polyline};

fn basins_file() -> anyhow::Result<bytes::Bytes> {
    let mut writer = ShapeWriter::new(ShapeType::Polygon);
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)] {
        let mut polygon = Polygon::new();
        polygon.push(Rect::new(x, y, x + 10.0, y + 10.0).into_contour(), false);
        writer.add_polygon(&polygon)?;
    }

    Ok(writer.finish()?.shp)
}

fn basins_table() -> anyhow::Result<AttributeTable> {
    let mut table = AttributeTable::with_columns([
        ("name", ColumnType::String),
        ("x", ColumnType::Double),
        ("y", ColumnType::Double),
    ])?;
    for (name, x, y) in [("upper", 5.0, 5.0), ("east", 15.0, 5.0), ("north", 5.0, 15.0)] {
        table.push_row(vec![name.into(), Value::Double(x), Value::Double(y)])?;
    }

    Ok(table)
}

#[test]
fn subset_measure_and_locate() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = EngineConfig::default();

    let mut subset = subset_file(basins_file()?, Rect::new(5.0, -5.0, 15.0, 8.0), &config)?;
    assert_eq!(subset.mask, vec![true, true, false]);

    let mut table = basins_table()?.filter(&subset.mask)?;
    assert_eq!(table.row_count(), subset.shapes.len());

    let identity = IdentityProjection::<Point2d, Point2d>::new();
    apply_measures(&mut table, &subset.shapes, &identity, "area", "perimeter")?;
    assert_eq!(table.doubles("area")?, &[40.0, 40.0]);
    assert_eq!(table.doubles("perimeter")?, &[26.0, 26.0]);

    subset.shapes.triangulate()?;
    let locator = PointLocator::new(&subset.shapes, &config);
    assert_eq!(locator.locate(&Point2d::new(12.0, 4.0)), Some(1));
    assert_eq!(locator.locate(&Point2d::new(12.0, 9.0)), None);
    assert_eq!(subset.shapes.get(1).map(|s| s.id()), Some(1));

    let nearest = nearest_table_point(&table, "x", "y", &Point2d::new(15.005, 5.004), 0.01)?;
    assert_eq!(nearest.map(|n| n.index), Some(1));

    Ok(())
}

#[test]
fn trace_clip_and_export_network() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    // Three segments flowing west to east, plus one unrelated segment.
    let segments = [
        ((0.0, 0.0), (4.0, 0.0)),
        ((4.0, 0.0), (8.0, 1.0)),
        ((8.0, 1.0), (12.0, 1.0)),
        ((0.0, 5.0), (2.0, 5.0)),
    ];
    let mut writer = ShapeWriter::new(ShapeType::PolyLine);
    let mut table = AttributeTable::with_columns([
        ("id", ColumnType::Integer),
        ("from", ColumnType::Integer),
        ("to", ColumnType::Integer),
    ])?;
    for (i, (a, b)) in segments.iter().enumerate() {
        writer.add_polyline(&Polyline::new(vec![OpenContour::new(vec![
            Point2d::new(a.0, a.1),
            Point2d::new(b.0, b.1),
        ])]))?;
        let (from, to) = if i < 3 { (i as i64 + 1, i as i64 + 2) } else { (10, 11) };
        table.push_row(vec![Value::Integer(i as i64 + 1), Value::Integer(from), Value::Integer(to)])?;
    }

    let tracer = FlowNetworkTracer::from_table(&table, "id", "from", "to")?;
    let trace = tracer.trace(2);
    assert_eq!(trace.count, 2);
    let upstream = table.filter(&trace.mask)?;
    assert_eq!(upstream.integers("id")?, &[1, 2]);

    let config = EngineConfig::default();
    let subset = subset_file(writer.finish()?.shp, Rect::new(2.0, -1.0, 10.0, 2.0), &config)?;
    assert_eq!(subset.mask, vec![true, true, true, false]);

    let dir = tempfile::tempdir()?;
    let base = dir.path().join("rivers");
    let summary = export_polylines(&subset.shapes, &base, &config)?;
    assert_eq!(summary.record_count, 3);

    let reader = ShapeReader::new(std::fs::read(base.with_extension("shp"))?)?;
    let bbox = reader.header().bbox;
    assert_eq!(bbox, Rect::new(2.0, 0.0, 10.0, 1.0));

    Ok(())
}
