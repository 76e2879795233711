//! Geometry primitives shared by the roadmend pipelines.
//!
//! Every coordinate in this crate is stored with `x` as longitude (or easting)
//! and `y` as latitude (or northing). Values entering from the outside world
//! should pass through [`LonLat`], which is the only place that accepts a
//! latitude/longitude pair and validates its ranges.

/// WGS84 semi-major axis, in metres.
pub const WGS84_SEMI_MAJOR: f64 = 6378137.0;
/// WGS84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257223563;

/// Latitude bound of the square web mercator world.
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

#[doc(hidden)]
pub mod coord;
#[doc(hidden)]
pub mod crs;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod geometry;
pub mod measure;
pub mod project;
#[doc(hidden)]
pub mod set;


#[doc(inline)]
pub use coord::LonLat;
#[doc(inline)]
pub use crs::Crs;
#[doc(inline)]
pub use error::GeoError;
#[doc(inline)]
pub use geometry::{LineGeometry, Shape};
#[doc(inline)]
pub use project::Project;
#[doc(inline)]
pub use set::{Attributes, Feature, GeometrySet};
