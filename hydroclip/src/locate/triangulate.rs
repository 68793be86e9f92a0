use hydroclip_types::cartesian::{CartesianPoint2d, Point2d};
use hydroclip_types::Polygon;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};
use num_traits::AsPrimitive;

use crate::error::HydroclipError;
use crate::shape::{Shape, ShapeGeometry, ShapeSet, TriangleMesh};

/// Tessellates the polygon into triangles.
///
/// Rings are filled with the even-odd rule, so holes stay empty regardless of the hole flags. The tessellator works
/// in `f32`, so vertices are shifted to the corner of the polygon bounds before tessellation and shifted back after
/// it, which keeps the precision loss relative to the size of the polygon rather than to its position.
pub fn triangulate(polygon: &Polygon<Point2d>) -> Result<TriangleMesh, HydroclipError> {
    let Some(bounds) = polygon.bounding_rect() else {
        return Ok(TriangleMesh::default());
    };
    let (origin_x, origin_y) = (bounds.x_min(), bounds.y_min());

    let mut path_builder = Path::builder();
    for contour in polygon.contours() {
        // The closing vertex is implied by `end(true)`.
        let open_len = contour.points.len().saturating_sub(1);
        let mut iterator = contour.points[..open_len].iter();

        let Some(first_point) = iterator.next() else {
            continue;
        };

        let _ = path_builder.begin(point(
            (first_point.x() - origin_x).as_(),
            (first_point.y() - origin_y).as_(),
        ));
        for p in iterator {
            let _ = path_builder.line_to(point((p.x() - origin_x).as_(), (p.y() - origin_y).as_()));
        }
        path_builder.end(true);
    }

    let path = path_builder.build();

    let mut buffers: VertexBuffers<Point2d, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    tessellator
        .tessellate(
            &path,
            &FillOptions::DEFAULT,
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                let position = vertex.position();
                Point2d::new(
                    origin_x + position.x as f64,
                    origin_y + position.y as f64,
                )
            }),
        )
        .map_err(|e| HydroclipError::Triangulation(format!("{e:?}")))?;

    Ok(TriangleMesh {
        vertices: buffers.vertices,
        indices: buffers.indices,
    })
}

impl Shape {
    /// Replaces polygon geometry of the shape with its triangles. Other geometry is left as it is.
    pub fn triangulate(&mut self) -> Result<(), HydroclipError> {
        if let ShapeGeometry::Polygon(polygon) = self.geometry() {
            let mesh = triangulate(polygon)?;
            self.set_geometry(ShapeGeometry::Triangles(mesh));
        }

        Ok(())
    }
}

impl ShapeSet {
    /// Triangulates every polygon shape of the set, preparing it for [`PointLocator::locate`](super::PointLocator::locate).
    pub fn triangulate(&mut self) -> Result<(), HydroclipError> {
        for shape in self.iter_mut() {
            shape.triangulate()?;
        }

        Ok(())
    }
}
