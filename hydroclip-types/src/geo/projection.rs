use crate::cartesian::NewCartesianPoint2d;
use std::marker::PhantomData;

/// Mapping between a source coordinate system and a planar one.
///
/// Clipped shapes are measured after projection, so areas and perimeters are only as good as the projection the
/// caller supplies.
pub trait Projection {
    /// Source point type.
    type InPoint;
    /// Projected point type.
    type OutPoint;

    /// Forward mapping. `None` when the point is outside the projection domain.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Backward mapping.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}

/// Copies coordinates over unchanged. Useful when the data is already planar.
#[derive(Debug)]
pub struct IdentityProjection<IN, OUT> {
    phantom_in: PhantomData<IN>,
    phantom_out: PhantomData<OUT>,
}

impl<IN, OUT> IdentityProjection<IN, OUT> {
    /// Identity mapping.
    pub fn new() -> Self {
        Self {
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<IN, OUT> Default for IdentityProjection<IN, OUT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<IN: NewCartesianPoint2d, OUT: NewCartesianPoint2d> Projection for IdentityProjection<IN, OUT> {
    type InPoint = IN;
    type OutPoint = OUT;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        Some(OUT::new(input.x(), input.y()))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        Some(IN::new(input.x(), input.y()))
    }
}

/// Projection multiplying each axis by a constant factor, e.g. degrees to kilometres near a known latitude.
#[derive(Debug, Clone, Copy)]
pub struct ScaleProjection<P> {
    x_scale: f64,
    y_scale: f64,
    phantom: PhantomData<P>,
}

impl<P> ScaleProjection<P> {
    /// Projection with independent factors per axis.
    pub fn new(x_scale: f64, y_scale: f64) -> Self {
        Self {
            x_scale,
            y_scale,
            phantom: PhantomData,
        }
    }
}

impl<P: NewCartesianPoint2d<f64>> Projection for ScaleProjection<P> {
    type InPoint = P;
    type OutPoint = P;

    fn project(&self, input: &P) -> Option<P> {
        Some(P::new(input.x() * self.x_scale, input.y() * self.y_scale))
    }

    fn unproject(&self, input: &P) -> Option<P> {
        if self.x_scale == 0.0 || self.y_scale == 0.0 {
            return None;
        }

        Some(P::new(input.x() / self.x_scale, input.y() / self.y_scale))
    }
}
