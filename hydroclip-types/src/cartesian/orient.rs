use crate::cartesian::CartesianPoint2d;
use serde::{Deserialize, Serialize};

/// Turn direction at the middle of three consecutive points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Right turn.
    Clockwise,
    /// Left turn.
    Counterclockwise,
    /// No turn. NaN coordinates also end up here since they compare neither way.
    Collinear,
}

impl Orientation {
    /// Direction of the turn `p -> q -> r`.
    pub fn triplet<Num>(
        p: &impl CartesianPoint2d<Num = Num>,
        q: &impl CartesianPoint2d<Num = Num>,
        r: &impl CartesianPoint2d<Num = Num>,
    ) -> Self
    where
        Num: num_traits::Num + Copy + PartialOrd,
    {
        let turn = q.sub(p).cross(&r.sub(q));
        if turn > Num::zero() {
            Self::Counterclockwise
        } else if turn < Num::zero() {
            Self::Clockwise
        } else {
            Self::Collinear
        }
    }
}
