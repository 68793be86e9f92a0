//! Hydroclip is the spatial subsetting and export engine for large shapefile datasets and river networks.
//!
//! Given a bounding box it reduces the raw rings of polygon and polyline records to a simplified, correctly oriented
//! representation, clips it against the box, and either prepares it for spatial queries or writes it out as a new
//! shapefile. For river-network data it also traces every segment upstream of a given node.
//!
//! # Processing pipeline
//!
//! Raw records come from [`hydroclip_shp::ShapeReader`] and flow through these stages:
//!
//! * [`VertexSparsifier`] merges near-coincident vertices of every ring;
//! * [`PolygonBuilder`] and [`PolylineBuilder`] assemble the surviving rings into geometry and classify holes;
//! * [`BoundsClipper`] cuts the geometry with a rectangle and keeps a row mask in lockstep with the attribute table;
//! * [`PointLocator`] answers point-in-region and nearest-feature queries over the clipped [`ShapeSet`], or
//! * [`export`] writes the result as a `.shp`/`.shx`/`.prj` triple.
//!
//! [`subset`] runs the first three stages for a whole file at once. Tabular data lives in an [`AttributeTable`], which
//! the [`FlowNetworkTracer`] walks to find upstream segments.
//!
//! ```no_run
//! use hydroclip::{subset, EngineConfig};
//! use hydroclip_types::cartesian::Rect;
//!
//! let config = EngineConfig::default().with_min_vertex_distance(0.001);
//! let data = std::fs::read("rivers.shp").unwrap();
//! let result = subset::subset_file(data, Rect::new(10.0, 45.0, 12.0, 47.0), &config).unwrap();
//! println!("{} of {} shapes survived", result.shapes.len(), result.mask.len());
//! ```
//!
//! All operations are synchronous and single-threaded. Every structure lives for a single job and is dropped with it.

pub mod builder;
pub mod clip;
pub mod config;
pub mod error;
pub mod export;
pub mod locate;
pub mod measure;
pub mod shape;
pub mod sparsify;
pub mod subset;
pub mod table;
pub mod timeseries;
pub mod trace;

pub use builder::{PolygonBuilder, PolylineBuilder};
pub use clip::BoundsClipper;
pub use config::EngineConfig;
pub use error::HydroclipError;
pub use locate::PointLocator;
pub use shape::{Shape, ShapeGeometry, ShapeSet, TriangleMesh};
pub use sparsify::{RingKind, SparseRing, VertexSparsifier};
pub use table::{AttributeTable, StringInterner};
pub use trace::FlowNetworkTracer;

pub use hydroclip_shp;
pub use hydroclip_types;
