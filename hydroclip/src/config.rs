//! Job configuration.

use std::path::Path;

use hydroclip_shp::PrjFormat;
use serde::{Deserialize, Serialize};

use crate::error::HydroclipError;

/// Default margin by which shape bounds are expanded before the nearest-polyline search.
pub const DEFAULT_LOCATE_MARGIN: f64 = 0.01;
/// Default distance beyond which nearest queries report nothing.
pub const DEFAULT_LOCATE_TOLERANCE: f64 = 0.01;

/// Tunable parameters of a clip, query or export job.
///
/// Every field has a default, so a configuration file only needs to list the values it changes:
///
/// ```json
/// { "min_vertex_distance": 0.001, "prj_format": "grid" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Adjacent ring vertices closer than this along both axes are merged.
    pub min_vertex_distance: f64,
    /// Margin added to shape bounds when pruning candidates of the nearest-polyline query.
    pub locate_margin: f64,
    /// Nearest queries return nothing if the best distance exceeds this value.
    pub locate_tolerance: f64,
    /// Form of the `.prj` file written with exported geometry.
    pub prj_format: PrjFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_vertex_distance: 0.0,
            locate_margin: DEFAULT_LOCATE_MARGIN,
            locate_tolerance: DEFAULT_LOCATE_TOLERANCE,
            prj_format: PrjFormat::default(),
        }
    }
}

impl EngineConfig {
    /// Parses configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, HydroclipError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HydroclipError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets the minimum distance between adjacent vertices.
    pub fn with_min_vertex_distance(mut self, distance: f64) -> Self {
        self.min_vertex_distance = distance;
        self
    }

    /// Sets the bounds margin of the nearest-polyline query.
    pub fn with_locate_margin(mut self, margin: f64) -> Self {
        self.locate_margin = margin;
        self
    }

    /// Sets the distance cut-off of nearest queries.
    pub fn with_locate_tolerance(mut self, tolerance: f64) -> Self {
        self.locate_tolerance = tolerance;
        self
    }

    /// Sets the `.prj` form.
    pub fn with_prj_format(mut self, format: PrjFormat) -> Self {
        self.prj_format = format;
        self
    }
}
