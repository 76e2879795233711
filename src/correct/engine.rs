use std::collections::BTreeMap;

use log::{debug, error, info, warn};
use measure_time::info_time;
use rayon::prelude::*;
use roadmend_geo::measure::geodesic_distance;
use roadmend_geo::{Crs, Feature, GeometrySet, LineGeometry, LonLat, Shape};
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::Cancellation;
use crate::correct::{Reason, RoadRecord};
use crate::graph::{NodeId, Route, RouteError, Scan, Weight};

pub const SOURCE_ROW_ATTRIBUTE: &str = "source_row";
pub const SNAPPED_FROM_ATTRIBUTE: &str = "snapped_from";
pub const SNAPPED_TO_ATTRIBUTE: &str = "snapped_to";
pub const PATH_COST_ATTRIBUTE: &str = "path_cost";
pub const DISTANCE_ATTRIBUTE: &str = "distance_m";
pub const REASON_ATTRIBUTE: &str = "reason";

#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Snapping an endpoint further than this, in metres, is logged.
    pub snap_warning_m: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            snap_warning_m: 500.0,
        }
    }
}

/// The network path that replaces a record's geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedRoute {
    /// Node positions in path order, geographic.
    pub line: LineGeometry,
    pub nodes: Vec<NodeId>,
    pub snapped_from: NodeId,
    pub snapped_to: NodeId,
    /// Sum of edge weights along the path.
    pub cost: Weight,
    /// Geodesic distance between the two snapped nodes, in metres.
    pub distance_m: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CorrectionResult {
    Corrected(CorrectedRoute),
    Uncorrectable(Reason),
}

impl CorrectionResult {
    pub fn is_corrected(&self) -> bool {
        matches!(self, CorrectionResult::Corrected(_))
    }

    pub fn route(&self) -> Option<&CorrectedRoute> {
        match self {
            CorrectionResult::Corrected(route) => Some(route),
            CorrectionResult::Uncorrectable(_) => None,
        }
    }

    pub fn reason(&self) -> Option<Reason> {
        match self {
            CorrectionResult::Corrected(_) => None,
            CorrectionResult::Uncorrectable(reason) => Some(*reason),
        }
    }
}

impl From<Reason> for CorrectionResult {
    fn from(value: Reason) -> Self {
        CorrectionResult::Uncorrectable(value)
    }
}

fn internal(record: &RoadRecord, detail: &str) -> CorrectionResult {
    error!("Row {}: {detail}", record.row);
    Reason::InternalError.into()
}

fn snap<N>(network: &N, row: usize, position: LonLat, config: &MatchConfig) -> Option<NodeId>
where
    N: Scan + ?Sized,
{
    let node = network.nearest_node(position)?;

    if let Some(snapped) = network.node_position(node) {
        let offset = geodesic_distance(position, snapped);
        if offset > config.snap_warning_m {
            warn!("Row {row}: {position:?} snapped {offset:.0}m away to node {node}");
        }
    }

    Some(node)
}

/// Replaces one record's straight line with the network path between the
/// nodes nearest its endpoints.
pub fn correct_row<N>(network: &N, record: &RoadRecord, config: &MatchConfig) -> CorrectionResult
where
    N: Scan + Route + ?Sized,
{
    if record.start.is_missing() || record.end.is_missing() {
        debug!("Row {}: missing coordinate", record.row);
        return Reason::MissingCoordinate.into();
    }

    let (start, end) = match (record.start.lon_lat(), record.end.lon_lat()) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(reason), _) | (_, Err(reason)) => {
            debug!(
                "Row {}: {reason} (start {:?}, end {:?})",
                record.row, record.start, record.end
            );
            return reason.into();
        }
    };

    let (Some(from), Some(to)) = (
        snap(network, record.row, start, config),
        snap(network, record.row, end, config),
    ) else {
        warn!("Row {}: the network has no node to snap to", record.row);
        return Reason::NodeNotFound.into();
    };

    let (Some(from_position), Some(to_position)) =
        (network.node_position(from), network.node_position(to))
    else {
        return internal(record, "snapped node has no position");
    };

    let distance_m = geodesic_distance(from_position, to_position);
    if !distance_m.is_finite() {
        return internal(record, "distance between snapped nodes is not finite");
    }

    if distance_m == 0.0 {
        debug!("Row {}: both endpoints snapped to node {from}", record.row);
        return Reason::Degenerate.into();
    }

    let (cost, nodes) = match network.route_nodes(from, to) {
        Ok(path) => path,
        Err(RouteError::NodeNotFound(node)) => {
            warn!("Row {}: node {node} is not routable", record.row);
            return Reason::NodeNotFound.into();
        }
        Err(RouteError::NoPath { .. }) => {
            debug!("Row {}: no path from {from} to {to}", record.row);
            return Reason::NoPath.into();
        }
    };

    if nodes.len() < 2 {
        return Reason::Degenerate.into();
    }

    let Some(coords) = nodes
        .iter()
        .map(|node| network.node_position(*node).map(|position| position.coord()))
        .collect::<Option<Vec<_>>>()
    else {
        return internal(record, "path node has no position");
    };

    match LineGeometry::from_coords(coords) {
        Ok(line) => CorrectionResult::Corrected(CorrectedRoute {
            line,
            nodes,
            snapped_from: from,
            snapped_to: to,
            cost,
            distance_m,
        }),
        Err(err) => internal(record, &format!("path is not a valid line: {err}")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorrectionSummary {
    pub total: usize,
    pub processed: usize,
    pub corrected: usize,
    pub uncorrectable: BTreeMap<Reason, usize>,
    pub cancelled: bool,
}

impl CorrectionSummary {
    fn of(total: usize, results: &[CorrectionResult], cancelled: bool) -> Self {
        let mut summary = CorrectionSummary {
            total,
            processed: results.len(),
            cancelled,
            ..CorrectionSummary::default()
        };

        for result in results {
            match result.reason() {
                None => summary.corrected += 1,
                Some(reason) => *summary.uncorrectable.entry(reason).or_default() += 1,
            }
        }

        summary
    }

    pub fn count(&self, reason: Reason) -> usize {
        self.uncorrectable.get(&reason).copied().unwrap_or_default()
    }

    fn log(&self) {
        let reasons = Reason::iter()
            .filter(|reason| self.count(*reason) > 0)
            .map(|reason| format!("{reason}: {}", self.count(reason)))
            .collect::<Vec<_>>()
            .join(", ");

        info!(
            "Corrected {} of {} rows ({} processed{}) [{reasons}]",
            self.corrected,
            self.total,
            self.processed,
            if self.cancelled { ", cancelled" } else { "" },
        );
    }
}

/// Results for a batch of records, in record order.
///
/// Holds one result per processed record. After a cancellation that is a
/// prefix of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionBatch {
    pub results: Vec<CorrectionResult>,
    pub summary: CorrectionSummary,
}

impl CorrectionBatch {
    /// Pairs each processed record with its result.
    pub fn zip<'a>(
        &'a self,
        records: &'a [RoadRecord],
    ) -> impl Iterator<Item = (&'a RoadRecord, &'a CorrectionResult)> {
        records.iter().zip(self.results.iter())
    }

    /// The records that could not be corrected, with the reason.
    pub fn failures<'a>(
        &'a self,
        records: &'a [RoadRecord],
    ) -> impl Iterator<Item = (&'a RoadRecord, Reason)> {
        self.zip(records)
            .filter_map(|(record, result)| result.reason().map(|reason| (record, reason)))
    }

    /// Every processed record as a geographic set, in record order.
    ///
    /// Corrected rows carry their network path and how they were matched.
    /// Uncorrectable rows keep their attributes under an empty geometry,
    /// with the reason tag set and the match columns null.
    pub fn corrected_set(&self, records: &[RoadRecord]) -> GeometrySet {
        let features = self
            .zip(records)
            .map(|(record, result)| {
                let mut attributes = record.attributes.clone();
                attributes.insert(SOURCE_ROW_ATTRIBUTE.to_string(), Value::from(record.row));

                let route = result.route();
                attributes.insert(
                    SNAPPED_FROM_ATTRIBUTE.to_string(),
                    Value::from(route.map(|route| route.snapped_from)),
                );
                attributes.insert(
                    SNAPPED_TO_ATTRIBUTE.to_string(),
                    Value::from(route.map(|route| route.snapped_to)),
                );
                attributes.insert(
                    PATH_COST_ATTRIBUTE.to_string(),
                    Value::from(route.map(|route| route.cost)),
                );
                attributes.insert(
                    DISTANCE_ATTRIBUTE.to_string(),
                    Value::from(route.map(|route| route.distance_m)),
                );
                attributes.insert(
                    REASON_ATTRIBUTE.to_string(),
                    Value::from(result.reason().map(|reason| reason.to_string())),
                );

                match route {
                    Some(route) => Feature::new(route.line.clone(), attributes),
                    None => Feature::new(Shape::Empty, attributes),
                }
            })
            .collect();

        GeometrySet::with_features(Crs::Geographic, features)
    }
}

/// Corrects every record in order, stopping early if `cancel` is raised.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip_all, fields(rows = records.len()))
)]
pub fn correct_records<N>(
    network: &N,
    records: &[RoadRecord],
    config: &MatchConfig,
    cancel: &Cancellation,
) -> CorrectionBatch
where
    N: Scan + Route + ?Sized,
{
    info_time!("correct");

    let mut results = Vec::with_capacity(records.len());
    let mut cancelled = false;

    for record in records {
        if cancel.is_cancelled() {
            warn!(
                "Correction cancelled after {} of {} rows",
                results.len(),
                records.len()
            );
            cancelled = true;
            break;
        }

        results.push(correct_row(network, record, config));
    }

    let summary = CorrectionSummary::of(records.len(), &results, cancelled);
    summary.log();

    CorrectionBatch { results, summary }
}

/// As [`correct_records`], with rows spread over the rayon pool.
/// Results keep record order; after a cancellation only the leading run of
/// finished rows is kept.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip_all, fields(rows = records.len()))
)]
pub fn correct_records_par<N>(
    network: &N,
    records: &[RoadRecord],
    config: &MatchConfig,
    cancel: &Cancellation,
) -> CorrectionBatch
where
    N: Scan + Route + Sync + ?Sized,
{
    info_time!("correct (parallel)");

    let finished = records
        .par_iter()
        .map(|record| {
            (!cancel.is_cancelled()).then(|| correct_row(network, record, config))
        })
        .collect::<Vec<_>>();

    let results = finished
        .into_iter()
        .map_while(|result| result)
        .collect::<Vec<_>>();

    let cancelled = results.len() < records.len();
    let summary = CorrectionSummary::of(records.len(), &results, cancelled);
    summary.log();

    CorrectionBatch { results, summary }
}
