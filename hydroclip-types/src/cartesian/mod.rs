//! Points, bounds and planar predicates.

mod orient;
mod point;
mod rect;
mod traits;
mod vector;

pub use orient::Orientation;
pub use point::{Point2, Point2d, Point3, Point3d};
pub use rect::Rect;
pub use traits::*;
pub use vector::Vector2;
