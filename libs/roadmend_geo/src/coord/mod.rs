#[doc(hidden)]
pub mod lonlat;

#[doc(inline)]
pub use lonlat::LonLat;
