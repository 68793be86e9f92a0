use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ShpError;

const WGS84_WKT: &str = "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],PRIMEM[\"Greenwich\",0.0],UNIT[\"Degree\",0.0174532925199433]]";

const WGS84_GRID: &[(&str, &str)] = &[
    ("Projection", "GEOGRAPHIC"),
    ("Datum", "WGS84"),
    ("Spheroid", "WGS84"),
    ("Units", "DD"),
    ("Zunits", "NO"),
];

/// Form of the coordinate system description written next to the geometry files.
///
/// Both forms describe geographic WGS84 coordinates in decimal degrees.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrjFormat {
    /// Simple key-value grid form, one `Key  Value` pair per line.
    Grid,
    /// Single line well-known text.
    #[default]
    Wkt,
}

impl PrjFormat {
    /// Text of the `.prj` file.
    pub fn contents(self) -> String {
        match self {
            PrjFormat::Wkt => WGS84_WKT.to_string(),
            PrjFormat::Grid => {
                let mut text = String::new();
                for (key, value) in WGS84_GRID {
                    text.push_str(&format!("{key:<14}{value}\n"));
                }
                text.push_str("Parameters\n");
                text
            }
        }
    }

    /// Writes `<base>.prj` and returns its path.
    pub fn save(self, base: &Path) -> Result<PathBuf, ShpError> {
        let path = base.with_extension("prj");
        fs::write(&path, self.contents())?;
        Ok(path)
    }
}
