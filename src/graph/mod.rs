//! The routable road network the map-matching engine snaps onto.
//!
//! A [`RoadNetworkGraph`] is built once per region, by a [`NetworkProvider`]
//! or by hand through a [`GraphBuilder`], and is only ever read afterwards.
//! The correction engine talks to it through the [`Scan`] and [`Route`]
//! traits, so any network offering nearest-node lookup and weighted shortest
//! paths can stand in for it.

#[doc(hidden)]
pub mod builder;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod item;
#[doc(hidden)]
pub mod node;
#[doc(hidden)]
pub mod osm;
#[doc(hidden)]
pub mod provider;
#[doc(hidden)]
pub mod traits;


#[doc(inline)]
pub use builder::GraphBuilder;
#[doc(inline)]
pub use error::{NetworkError, RouteError};
#[doc(inline)]
pub use item::{GraphStructure, NodeId, RoadNetworkGraph, Weight};
#[doc(inline)]
pub use node::Node;
#[doc(inline)]
pub use osm::OsmPbfProvider;
#[doc(inline)]
pub use provider::{CachedProvider, NetworkMode, NetworkProvider};
#[doc(inline)]
pub use traits::{Route, Scan};
