mod cartesian_point;
mod contour;

pub use cartesian_point::{
    CartesianPoint2d, CartesianPoint2dFloat, CartesianPoint3d, NewCartesianPoint2d,
};

pub use contour::{CartesianClosedContour, CartesianContour, Winding};
