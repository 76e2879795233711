//! Fixture datasets shared by the roadmend tests and benchmarks.
//!
//! The right-of-way layers hold 10 disjoint east-west segments near Lagos.
//! The coverage file holds 15 segments: three cross a right-of-way segment,
//! one touches the end of `ROW-03`, and eleven lie well to the east.

use std::path::PathBuf;

/// Multi-layer source, one layer per file.
pub const RIGHT_OF_WAY: &str = "right_of_way";
/// Single-layer source.
pub const COVERAGE: &str = "coverage.geojson";
/// Surveyed road sheet with noisy numeric cells.
pub const ROADS: &str = "roads.csv";

pub const RIGHT_OF_WAY_SEGMENTS: usize = 10;
pub const COVERAGE_SEGMENTS: usize = 15;
pub const COVERAGE_INTERSECTING: usize = 4;

/// Resolves a fixture name to its absolute path.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(name)
}
