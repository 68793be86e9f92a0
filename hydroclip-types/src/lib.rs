//! Geometry primitives shared by the hydroclip crates.
//!
//! The types here follow the shapefile conventions the rest of the workspace relies on:
//!
//! * rings ([`ClosedContour`]) store their closing vertex explicitly, so the first and the last points are equal;
//! * a [`Polygon`] is a flat list of rings, each carrying its own *hole* flag;
//! * [`area_signed`](cartesian::CartesianClosedContour::area_signed) of a ring is positive for counter-clockwise rings,
//!   while [`Polygon::ring_area`] and [`Polygon::net_area`] flip the sign so that clockwise fills count as positive
//!   and counter-clockwise holes as negative.
//!
//! Coordinates are accessed through the [`CartesianPoint2d`](cartesian::CartesianPoint2d) trait, which keeps the
//! algorithms usable with both [`Point2`](cartesian::Point2) and `geo_types::Coord`.

pub mod cartesian;
pub mod contour;
pub mod error;
pub mod geo;
pub mod polygon;
pub mod segment;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use contour::{ClosedContour, Contour, OpenContour, Polyline};
pub use polygon::Polygon;
pub use segment::Segment;
