//! Which candidate lines are not accounted for by a reference dataset.
//!
//! The reference layers are merged into one [`ReferenceUnion`], and every
//! single-part candidate line that shares no point with it is kept. Lines
//! that merely touch the reference, at an endpoint or anywhere else, count
//! as accounted for.

pub mod engine;
pub mod union;

#[cfg(test)]
mod test;

pub use engine::{
    Difference, DifferenceConfig, DifferenceCounts, LENGTH_ATTRIBUTE, difference,
    length_crs_for, merge_layers,
};
pub use union::{ReferenceSegment, ReferenceUnion};
