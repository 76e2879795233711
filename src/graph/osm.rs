use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info};
use osmpbf::{Element, ElementReader};
use roadmend_geo::LonLat;
use roadmend_geo::measure::geodesic_distance;
use rustc_hash::FxHashMap;

use crate::graph::{NetworkError, NetworkMode, NetworkProvider, NodeId, RoadNetworkGraph};

/// Highway values that never form part of a network.
const UNBUILT: [&str; 8] = [
    "abandoned",
    "construction",
    "no",
    "planned",
    "platform",
    "proposed",
    "raceway",
    "razed",
];

/// Highway values closed to motor vehicles.
const NOT_DRIVABLE: [&str; 12] = [
    "bridleway",
    "bus_guideway",
    "busway",
    "corridor",
    "cycleway",
    "elevator",
    "escape",
    "footway",
    "path",
    "pedestrian",
    "steps",
    "track",
];

/// Highway values closed to pedestrians.
const NOT_WALKABLE: [&str; 4] = ["bus_guideway", "cycleway", "motorway", "motorway_link"];

/// Service values excluded from drivable networks.
const PRIVATE_SERVICE: [&str; 5] = [
    "driveway",
    "emergency_access",
    "parking",
    "parking_aisle",
    "private",
];

/// Which ways an OSM way contributes, relative to its node order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Both,
    Forward,
    Backward,
}

fn tag<'a>(tags: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Decides whether a way belongs to the network of `mode`, and in which
/// directions it may be traversed. `None` excludes the way.
pub fn way_traversal(mode: NetworkMode, tags: &[(&str, &str)]) -> Option<Traversal> {
    let highway = tag(tags, "highway")?;

    if UNBUILT.contains(&highway) || tag(tags, "area") == Some("yes") {
        return None;
    }

    let access = tag(tags, "access");
    let private = matches!(access, Some("private") | Some("no"));

    match mode {
        NetworkMode::All => {
            if tag(tags, "service") == Some("private") {
                return None;
            }
        }
        NetworkMode::Drive => {
            if NOT_DRIVABLE.contains(&highway)
                || private
                || matches!(tag(tags, "motor_vehicle"), Some("no"))
                || matches!(tag(tags, "motorcar"), Some("no"))
                || tag(tags, "service").is_some_and(|s| PRIVATE_SERVICE.contains(&s))
            {
                return None;
            }
        }
        NetworkMode::Walk => {
            if NOT_WALKABLE.contains(&highway)
                || private
                || tag(tags, "foot") == Some("no")
                || tag(tags, "service") == Some("private")
            {
                return None;
            }

            return Some(Traversal::Both);
        }
    }

    let roundabout = tag(tags, "junction") == Some("roundabout");
    Some(match tag(tags, "oneway") {
        Some("yes") | Some("true") | Some("1") => Traversal::Forward,
        Some("-1") | Some("reverse") => Traversal::Backward,
        Some("no") | Some("false") | Some("0") => Traversal::Both,
        _ if roundabout => Traversal::Forward,
        _ => Traversal::Both,
    })
}

/// Turns a region name into the file stem it is stored under,
/// `"Lagos, Nigeria"` becomes `"lagos-nigeria"`.
pub fn region_slug(region: &str) -> String {
    region
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .join("-")
}

/// Reads region networks from `<directory>/<region-slug>.osm.pbf` extracts.
#[derive(Debug, Clone)]
pub struct OsmPbfProvider {
    directory: PathBuf,
}

impl OsmPbfProvider {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        OsmPbfProvider {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, region: &str) -> PathBuf {
        self.directory
            .join(format!("{}.osm.pbf", region_slug(region)))
    }
}

impl NetworkProvider for OsmPbfProvider {
    fn graph_for_region(
        &self,
        region: &str,
        mode: NetworkMode,
    ) -> Result<Arc<RoadNetworkGraph>, NetworkError> {
        let path = self.path_for(region);
        if !path.is_file() {
            return Err(NetworkError::RegionNotFound {
                region: region.to_string(),
                path,
            });
        }

        info!("Loading street data for {region} ({mode}) from {path:?}");
        read_network(&path, mode).map(Arc::new)
    }
}

struct KeptWay {
    refs: Vec<NodeId>,
    traversal: Traversal,
}

/// Creates a graph from a `.osm.pbf` file, keeping the ways `mode` admits.
/// Edge weights are geodesic segment lengths in metres.
pub fn read_network(path: &Path, mode: NetworkMode) -> Result<RoadNetworkGraph, NetworkError> {
    let start_time = Instant::now();
    let read_error = |err: osmpbf::Error| NetworkError::Read {
        path: path.to_path_buf(),
        reason: err.to_string(),
    };

    let reader = ElementReader::from_path(path).map_err(read_error)?;

    let mut positions: FxHashMap<NodeId, LonLat> = FxHashMap::default();
    let mut ways: Vec<KeptWay> = Vec::new();

    reader
        .for_each(|element| match element {
            Element::Node(node) => {
                positions.insert(node.id(), LonLat::new_unchecked(node.lon(), node.lat()));
            }
            Element::DenseNode(node) => {
                positions.insert(node.id(), LonLat::new_unchecked(node.lon(), node.lat()));
            }
            Element::Way(way) => {
                let tags = way.tags().collect::<Vec<_>>();
                if let Some(traversal) = way_traversal(mode, &tags) {
                    ways.push(KeptWay {
                        refs: way.refs().collect(),
                        traversal,
                    });
                }
            }
            Element::Relation(_) => {}
        })
        .map_err(read_error)?;

    debug!(
        "Read {} nodes and {} {mode} ways in {:?}",
        positions.len(),
        ways.len(),
        start_time.elapsed()
    );

    let mut builder = RoadNetworkGraph::builder();
    let mut missing = 0usize;

    for way in &ways {
        for (a, b) in way.refs.iter().copied().tuple_windows() {
            let (Some(pa), Some(pb)) = (positions.get(&a), positions.get(&b)) else {
                missing += 1;
                continue;
            };

            builder.add_node(a, *pa);
            builder.add_node(b, *pb);

            let length = geodesic_distance(*pa, *pb);
            match way.traversal {
                Traversal::Both => builder.add_road(a, b, length),
                Traversal::Forward => builder.add_edge(a, b, length),
                Traversal::Backward => builder.add_edge(b, a, length),
            }
        }
    }

    if missing > 0 {
        debug!("Skipped {missing} way segments referencing nodes outside the extract");
    }

    let graph = builder.build()?;
    info!(
        "Finished. Ingested {} nodes from {} nodes total in {}ms",
        graph.size(),
        positions.len(),
        start_time.elapsed().as_millis()
    );

    Ok(graph)
}
