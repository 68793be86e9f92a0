use num_traits::Num;
use serde::{Deserialize, Serialize};

/// Offset between two points, see [`CartesianPoint2d::sub`](super::CartesianPoint2d::sub).
#[derive(Debug, Default, Copy, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Vector2<N = f64> {
    dx: N,
    dy: N,
}

impl<N: Copy> Vector2<N> {
    /// Vector `(dx, dy)`.
    pub fn new(dx: N, dy: N) -> Self {
        Self { dx, dy }
    }

    /// Offset along x.
    pub fn dx(&self) -> N {
        self.dx
    }

    /// Offset along y.
    pub fn dy(&self) -> N {
        self.dy
    }
}

impl<N: Num + Copy> Vector2<N> {
    /// Squared length.
    pub fn length_sq(&self) -> N {
        self.dot(self)
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> N {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Z component of the 3d cross product. Positive when `other` turns counter-clockwise from `self`.
    pub fn cross(&self, other: &Self) -> N {
        self.dx * other.dy - self.dy * other.dx
    }
}
