use serde::{Deserialize, Serialize};

/// Shape type codes of the shapefile format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    /// Record without geometry.
    Null,
    /// Single 2d point.
    Point,
    /// Multi-part polyline.
    PolyLine,
    /// Polygon made of rings.
    Polygon,
    /// Set of 2d points.
    MultiPoint,
    /// Single point with z and measure values.
    PointZ,
    /// Polyline with z values.
    PolyLineZ,
    /// Polygon with z values.
    PolygonZ,
}

impl ShapeType {
    /// Numeric code written into the header and every record.
    pub fn code(self) -> i32 {
        match self {
            ShapeType::Null => 0,
            ShapeType::Point => 1,
            ShapeType::PolyLine => 3,
            ShapeType::Polygon => 5,
            ShapeType::MultiPoint => 8,
            ShapeType::PointZ => 11,
            ShapeType::PolyLineZ => 13,
            ShapeType::PolygonZ => 15,
        }
    }

    /// Shape type by its code.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => ShapeType::Null,
            1 => ShapeType::Point,
            3 => ShapeType::PolyLine,
            5 => ShapeType::Polygon,
            8 => ShapeType::MultiPoint,
            11 => ShapeType::PointZ,
            13 => ShapeType::PolyLineZ,
            15 => ShapeType::PolygonZ,
            _ => return None,
        })
    }

    /// Whether the header of a file of this type carries a z range.
    pub fn has_z(self) -> bool {
        matches!(
            self,
            ShapeType::PointZ | ShapeType::PolyLineZ | ShapeType::PolygonZ
        )
    }
}
