use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use rustc_hash::FxHashMap;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::graph::{NetworkError, RoadNetworkGraph};

/// The class of ways a network is built from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum NetworkMode {
    /// Every public way, regardless of who may use it.
    #[default]
    All,

    /// Ways open to motor vehicles, respecting one-way restrictions.
    Drive,

    /// Ways open to pedestrians, traversable in both directions.
    Walk,
}

/// Supplies the routable network for a named region.
pub trait NetworkProvider {
    fn graph_for_region(
        &self,
        region: &str,
        mode: NetworkMode,
    ) -> Result<Arc<RoadNetworkGraph>, NetworkError>;
}

impl<P: NetworkProvider + ?Sized> NetworkProvider for &P {
    fn graph_for_region(
        &self,
        region: &str,
        mode: NetworkMode,
    ) -> Result<Arc<RoadNetworkGraph>, NetworkError> {
        (**self).graph_for_region(region, mode)
    }
}

/// Memoises the networks of an inner provider per (region, mode).
pub struct CachedProvider<P> {
    inner: P,
    cache: Mutex<FxHashMap<(String, NetworkMode), Arc<RoadNetworkGraph>>>,
}

impl<P: NetworkProvider> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        CachedProvider {
            inner,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of networks held.
    pub fn cached(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<P: NetworkProvider> NetworkProvider for CachedProvider<P> {
    fn graph_for_region(
        &self,
        region: &str,
        mode: NetworkMode,
    ) -> Result<Arc<RoadNetworkGraph>, NetworkError> {
        let key = (region.to_string(), mode);

        if let Some(graph) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            debug!("Network cache hit for {region} ({mode})");
            return Ok(Arc::clone(graph));
        }

        // Loading happens outside the lock; a concurrent miss may load twice.
        let graph = self.inner.graph_for_region(region, mode)?;

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&graph));

        Ok(graph)
    }
}
