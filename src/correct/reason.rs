use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Why a road record could not be corrected.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Reason {
    /// An endpoint cell was empty or unreadable.
    MissingCoordinate,

    /// An endpoint lies outside the valid longitude/latitude ranges,
    /// typically because north and east were swapped or mistyped.
    InvalidCoordinate,

    /// A snapped node is not part of the routable network.
    NodeNotFound,

    NoPath,

    /// Both endpoints snapped to the same place.
    Degenerate,

    /// The network answered inconsistently.
    InternalError,
}
