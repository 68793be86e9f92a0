//! Shapes produced by a job: geometry with its attribute row and cached bounds.

use hydroclip_types::cartesian::{CartesianPoint2d, Orientation, Point2d, Rect};
use hydroclip_types::{Polygon, Polyline};

/// Geometry owned by a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    /// Polygon with hole flags.
    Polygon(Polygon<Point2d>),
    /// Multi-part polyline.
    Polyline(Polyline<Point2d>),
    /// Triangulated polygon, used for point location.
    Triangles(TriangleMesh),
}

impl ShapeGeometry {
    /// Returns true if there is nothing left of the geometry.
    pub fn is_empty(&self) -> bool {
        match self {
            ShapeGeometry::Polygon(polygon) => polygon.is_empty(),
            ShapeGeometry::Polyline(polyline) => polyline.is_empty(),
            ShapeGeometry::Triangles(mesh) => mesh.is_empty(),
        }
    }

    /// Bounds of all vertices. `None` if the geometry is empty.
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            ShapeGeometry::Polygon(polygon) => polygon.bounding_rect(),
            ShapeGeometry::Polyline(polyline) => Rect::from_points(
                polyline.parts.iter().flat_map(|part| part.points.iter()),
            ),
            ShapeGeometry::Triangles(mesh) => Rect::from_points(mesh.vertices.iter()),
        }
    }
}

/// Indexed triangle list of a tessellated polygon.
///
/// Every three consecutive indices form one triangle. Vertex coordinates are stored in the same coordinate system as
/// the source polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertices of the triangles.
    pub vertices: Vec<Point2d>,
    /// Indices into `vertices`, three per triangle.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns true if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.len() < 3
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the triangles. Triangles referring to missing vertices are skipped.
    pub fn iter_triangles(&self) -> impl Iterator<Item = [Point2d; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|t| {
            Some([
                *self.vertices.get(t[0] as usize)?,
                *self.vertices.get(t[1] as usize)?,
                *self.vertices.get(t[2] as usize)?,
            ])
        })
    }

    /// Returns true if the point lies inside one of the triangles or on its border.
    pub fn contains_point(&self, point: &impl CartesianPoint2d<Num = f64>) -> bool {
        self.iter_triangles()
            .any(|[a, b, c]| triangle_contains(&a, &b, &c, point))
    }
}

/// Sign-based point-in-triangle test: the point is inside if it is not on opposite sides of any two edges.
pub(crate) fn triangle_contains(
    a: &Point2d,
    b: &Point2d,
    c: &Point2d,
    point: &impl CartesianPoint2d<Num = f64>,
) -> bool {
    let p = Point2d::new(point.x(), point.y());
    let sides = [
        Orientation::triplet(a, b, &p),
        Orientation::triplet(b, c, &p),
        Orientation::triplet(c, a, &p),
    ];

    let has_cw = sides.contains(&Orientation::Clockwise);
    let has_ccw = sides.contains(&Orientation::Counterclockwise);
    !(has_cw && has_ccw)
}

/// Geometry of one input record, the row of the attribute table it belongs to and its cached bounds.
///
/// A shape owns exactly one kind of geometry: a polygon is replaced by its triangles when it is triangulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: usize,
    geometry: ShapeGeometry,
    bounds: Rect,
}

impl Shape {
    /// Creates a new shape and computes its bounds. Empty geometry gets zero bounds.
    pub fn new(id: usize, geometry: ShapeGeometry) -> Self {
        let bounds = geometry.bounding_rect().unwrap_or_else(Rect::zero);
        Self {
            id,
            geometry,
            bounds,
        }
    }

    /// Creates a new shape with bounds that are already known.
    pub fn with_bounds(id: usize, geometry: ShapeGeometry, bounds: Rect) -> Self {
        Self {
            id,
            geometry,
            bounds,
        }
    }

    /// Row of the attribute table this shape belongs to.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Geometry of the shape.
    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    /// Cached bounds of the geometry.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns true if the shape has no geometry left.
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Polygon geometry, if the shape is a polygon.
    pub fn as_polygon(&self) -> Option<&Polygon<Point2d>> {
        match &self.geometry {
            ShapeGeometry::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Polyline geometry, if the shape is a polyline.
    pub fn as_polyline(&self) -> Option<&Polyline<Point2d>> {
        match &self.geometry {
            ShapeGeometry::Polyline(polyline) => Some(polyline),
            _ => None,
        }
    }

    /// Triangles, if the shape has been triangulated.
    pub fn as_triangles(&self) -> Option<&TriangleMesh> {
        match &self.geometry {
            ShapeGeometry::Triangles(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Takes the geometry out of the shape.
    pub fn into_geometry(self) -> ShapeGeometry {
        self.geometry
    }

    pub(crate) fn set_geometry(&mut self, geometry: ShapeGeometry) {
        self.geometry = geometry;
    }
}

/// Shapes of one job.
///
/// The set is allocated for the number of input records, but only the shapes that survived building and clipping are
/// stored, so [`ShapeSet::len`] may be smaller than the capacity. Dropping the set releases all nested geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeSet {
    shapes: Vec<Shape>,
}

impl ShapeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with space for `capacity` shapes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shapes: Vec::with_capacity(capacity),
        }
    }

    /// Adds a shape to the set.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Number of stored shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes the set has space for.
    pub fn capacity(&self) -> usize {
        self.shapes.capacity()
    }

    /// Shape by its position in the set.
    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Shape belonging to the given attribute row.
    pub fn find_by_id(&self, id: usize) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    /// Iterates over the shapes.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Shape> {
        self.shapes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Shape> {
        self.shapes.iter_mut()
    }

    /// All shapes as a slice.
    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    /// Bounds of all the shapes. `None` if the set is empty.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::merge_all(self.shapes.iter().map(|shape| shape.bounds))
    }
}

impl FromIterator<Shape> for ShapeSet {
    fn from_iter<T: IntoIterator<Item = Shape>>(iter: T) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ShapeSet {
    type Item = Shape;
    type IntoIter = std::vec::IntoIter<Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydroclip_types::OpenContour;

    fn unit_mesh() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point2d::new(0.0, 0.0),
                Point2d::new(1.0, 0.0),
                Point2d::new(1.0, 1.0),
                Point2d::new(0.0, 1.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn mesh_contains_point() {
        let mesh = unit_mesh();
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.contains_point(&Point2d::new(0.5, 0.2)));
        assert!(mesh.contains_point(&Point2d::new(0.2, 0.9)));
        assert!(mesh.contains_point(&Point2d::new(1.0, 0.5)));
        assert!(!mesh.contains_point(&Point2d::new(1.5, 0.5)));
        assert!(!mesh.contains_point(&Point2d::new(-0.1, -0.1)));
    }

    #[test]
    fn triangle_orientation_does_not_matter() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(4.0, 0.0);
        let c = Point2d::new(0.0, 4.0);
        let p = Point2d::new(1.0, 1.0);
        assert!(triangle_contains(&a, &b, &c, &p));
        assert!(triangle_contains(&a, &c, &b, &p));
        assert!(!triangle_contains(&a, &c, &b, &Point2d::new(3.0, 3.0)));
    }

    #[test]
    fn bad_indices_are_skipped() {
        let mut mesh = unit_mesh();
        mesh.indices.extend([0, 1, 42]);
        assert_eq!(mesh.iter_triangles().count(), 2);
    }

    #[test]
    fn shape_bounds() {
        let polyline = Polyline::new(vec![
            OpenContour::new(vec![Point2d::new(1.0, 2.0), Point2d::new(3.0, -1.0)]),
            OpenContour::new(vec![Point2d::new(-2.0, 0.0), Point2d::new(0.0, 0.0)]),
        ]);
        let shape = Shape::new(7, ShapeGeometry::Polyline(polyline));
        assert_eq!(shape.id(), 7);
        assert_eq!(shape.bounds(), Rect::new(-2.0, -1.0, 3.0, 2.0));
        assert!(shape.as_polygon().is_none());

        let empty = Shape::new(0, ShapeGeometry::Polygon(Polygon::new()));
        assert!(empty.is_empty());
        assert_eq!(empty.bounds(), Rect::zero());
    }

    #[test]
    fn set_keeps_capacity() {
        let mut set = ShapeSet::with_capacity(10);
        set.push(Shape::new(3, ShapeGeometry::Triangles(unit_mesh())));
        assert_eq!(set.len(), 1);
        assert!(set.capacity() >= 10);
        assert!(set.find_by_id(3).is_some());
        assert!(set.find_by_id(4).is_none());
        assert_eq!(set.bounds(), Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
    }
}
