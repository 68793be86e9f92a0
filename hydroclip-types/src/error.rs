//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq)]
pub enum HydroclipTypesError {
    /// Bounds with `min > max` on one of the axes, or non-finite limits.
    #[error("invalid bounds: x {x_min}..{x_max}, y {y_min}..{y_max}")]
    InvalidBounds {
        /// Minimum x.
        x_min: f64,
        /// Maximum x.
        x_max: f64,
        /// Minimum y.
        y_min: f64,
        /// Maximum y.
        y_max: f64,
    },
}
