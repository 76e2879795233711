//! Place labels for line records.
//!
//! Each row's centroid is reverse geocoded through a [`ReverseLookup`], and
//! the street part of the label is kept as a token. Lookups are paced in
//! batches through a [`Pause`] to stay within the service quota.

pub mod engine;
pub mod lookup;
pub mod pace;
pub mod street;


pub use engine::{
    EnrichConfig, EnrichSummary, Enriched, LABEL_ATTRIBUTE, NAME_ATTRIBUTE, TOKEN_ATTRIBUTE,
    enrich,
};
pub use lookup::{
    DEFAULT_LOOKUP_TIMEOUT, DEFAULT_LOOKUP_URL, LookupConfig, LookupError, MapTilerLookup,
    ReverseLookup, parse_label,
};
pub use pace::{Pause, Sleep};
pub use street::extract_street_name;
