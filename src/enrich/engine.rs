use std::time::Duration;

use log::{debug, info, warn};
use measure_time::info_time;
use roadmend_geo::{Crs, GeometrySet, LonLat};
use serde_json::Value;

use crate::Cancellation;
use crate::config::ConfigError;
use crate::enrich::{Pause, ReverseLookup, extract_street_name};

pub const LABEL_ATTRIBUTE: &str = "place_label";
pub const TOKEN_ATTRIBUTE: &str = "street_token";
pub const NAME_ATTRIBUTE: &str = "road_street_name";

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichConfig {
    /// Rows looked up between two pauses. Must be positive.
    pub batch_size: usize,
    pub delay: Duration,
    pub label_attribute: String,
    pub token_attribute: String,
    /// Filled with the street token on rows where it is missing or empty.
    pub name_attribute: String,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        EnrichConfig {
            batch_size: 50,
            delay: Duration::from_secs(2),
            label_attribute: LABEL_ATTRIBUTE.to_string(),
            token_attribute: TOKEN_ATTRIBUTE.to_string(),
            name_attribute: NAME_ATTRIBUTE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnrichSummary {
    pub rows: usize,
    pub processed: usize,
    pub labelled: usize,
    pub unmatched: usize,
    pub failed: usize,
    pub names_filled: usize,
    pub pauses: usize,
    pub cancelled: bool,
}

/// The enriched rows, in the geographic system, and what happened to them.
///
/// Rows after a cancellation are present but carry no new attributes.
#[derive(Debug, Clone)]
pub struct Enriched {
    pub set: GeometrySet,
    pub summary: EnrichSummary,
}

/// Attaches a place label and a street token to every row of `set`.
///
/// Lookups go out one row at a time. After every `batch_size` rows the
/// engine pauses for `delay` if rows remain. A failed or empty lookup only
/// leaves that row without a label.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip_all, fields(rows = set.len()), err)
)]
pub fn enrich<L, P>(
    set: &GeometrySet,
    lookup: &L,
    pause: &P,
    config: &EnrichConfig,
    cancel: &Cancellation,
) -> crate::Result<Enriched>
where
    L: ReverseLookup + ?Sized,
    P: Pause + ?Sized,
{
    info_time!("enrich");

    if config.batch_size == 0 {
        return Err(ConfigError::Invalid {
            key: "batch_size".to_string(),
            value: "0".to_string(),
        }
        .into());
    }

    let set = if set.crs().is_geographic() {
        set.clone()
    } else {
        debug!("Reprojecting {} rows from {} for lookup", set.len(), set.crs());
        set.reproject(Crs::Geographic)?
    };

    let rows = set.len();
    let mut summary = EnrichSummary {
        rows,
        ..EnrichSummary::default()
    };

    let mut features = set.into_features();

    for (row, feature) in features.iter_mut().enumerate() {
        if cancel.is_cancelled() {
            warn!("Enrichment cancelled after {row} of {rows} rows");
            summary.cancelled = true;
            break;
        }

        let centroid = feature
            .shape
            .centroid()
            .and_then(|point| LonLat::new(point.x(), point.y()).ok());

        let label = match centroid {
            Some(position) => match lookup.lookup(position) {
                Ok(Some(label)) => {
                    summary.labelled += 1;
                    Some(label)
                }
                Ok(None) => {
                    debug!("No place found for row {row} at {position:?}");
                    summary.unmatched += 1;
                    None
                }
                Err(err) => {
                    warn!("Lookup failed for row {row} at {position:?}: {err}");
                    summary.failed += 1;
                    None
                }
            },
            None => {
                warn!("Row {row} has no usable centroid");
                summary.failed += 1;
                None
            }
        };

        let token = extract_street_name(label.as_deref());

        let named = feature
            .text(&config.name_attribute)
            .is_some_and(|name| !name.trim().is_empty());

        if !named && !token.is_empty() {
            feature
                .attributes
                .insert(config.name_attribute.clone(), Value::from(token.as_str()));
            summary.names_filled += 1;
        }

        feature
            .attributes
            .insert(config.label_attribute.clone(), Value::from(label));
        feature
            .attributes
            .insert(config.token_attribute.clone(), Value::from(token));

        summary.processed += 1;

        let done = row + 1;
        if done % config.batch_size == 0 && done < rows {
            debug!("Pausing {:?} after {done} rows", config.delay);
            pause.pause(config.delay);
            summary.pauses += 1;
        }
    }

    info!(
        "Enriched {} of {} rows: {} labelled, {} unmatched, {} failed, {} names filled, {} pauses",
        summary.processed,
        summary.rows,
        summary.labelled,
        summary.unmatched,
        summary.failed,
        summary.names_filled,
        summary.pauses,
    );

    Ok(Enriched {
        set: GeometrySet::with_features(Crs::Geographic, features),
        summary,
    })
}
