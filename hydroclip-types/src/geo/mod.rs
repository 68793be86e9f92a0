//! Projections of points between coordinate systems.

mod projection;

pub use projection::{IdentityProjection, Projection, ScaleProjection};
