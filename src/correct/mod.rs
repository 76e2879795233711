//! Snapping hand-digitised roads onto a street network.
//!
//! Each [`RoadRecord`] has its endpoints snapped to the nearest network
//! nodes, and its geometry is replaced by the cheapest path between them.
//! Records that cannot be corrected get a [`Reason`] instead, so a batch
//! always accounts for every row it processed.

pub mod engine;
pub mod reason;
pub mod row;


pub use engine::{
    CorrectedRoute, CorrectionBatch, CorrectionResult, CorrectionSummary, MatchConfig,
    correct_records, correct_records_par, correct_row,
};
pub use reason::Reason;
pub use row::{Endpoint, RoadRecord};
