#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod cancel;
pub mod config;
pub mod correct;
pub mod difference;
pub mod enrich;
pub mod error;
pub mod graph;
pub mod load;
pub mod render;
pub mod util;

#[doc(inline)]
pub use cancel::Cancellation;
#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use error::{Error, InputError, Result};

pub use roadmend_geo as geometry;
pub use roadmend_geo::{Crs, GeometrySet, LineGeometry, LonLat};
