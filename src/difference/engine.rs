use log::{debug, info};
use measure_time::info_time;
use roadmend_geo::project::transform;
use roadmend_geo::{Crs, Feature, GeometrySet, LonLat};
use serde_json::Value;

use crate::difference::ReferenceUnion;
use crate::error::{Dataset, InputError};

/// Attribute the metric length of each retained line is written to.
pub const LENGTH_ATTRIBUTE: &str = "distance_m";

#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceConfig {
    /// Planar system lengths are measured in. When unset, the UTM zone of
    /// the reference extent is used.
    pub length_crs: Option<Crs>,
    pub length_attribute: String,
}

impl Default for DifferenceConfig {
    fn default() -> Self {
        DifferenceConfig {
            length_crs: None,
            length_attribute: LENGTH_ATTRIBUTE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DifferenceCounts {
    pub reference_records: usize,
    pub reference_parts: usize,
    pub candidate_records: usize,
    pub candidate_parts: usize,
    pub retained: usize,
}

/// The candidate parts that do not meet the reference, in the planar
/// system their lengths were measured in.
#[derive(Debug, Clone)]
pub struct Difference {
    pub set: GeometrySet,
    pub counts: DifferenceCounts,
}

/// Concatenates reference layers in order. Every layer must share the
/// system of the first.
pub fn merge_layers(
    layers: impl IntoIterator<Item = GeometrySet>,
) -> Result<GeometrySet, InputError> {
    let mut layers = layers.into_iter();
    let Some(mut merged) = layers.next() else {
        return Err(InputError::EmptyInput {
            dataset: Dataset::Reference,
        });
    };

    let expected = merged.crs();
    for layer in layers {
        merged
            .append(layer)
            .map_err(|found| InputError::CrsMismatch { expected, found })?;
    }

    Ok(merged)
}

/// Chooses the system lengths are measured in for data in `reference`.
pub fn length_crs_for(reference: &GeometrySet) -> crate::Result<Crs> {
    if let Crs::Utm { .. } = reference.crs() {
        return Ok(reference.crs());
    }

    let center = reference.center().ok_or(InputError::EmptyInput {
        dataset: Dataset::Reference,
    })?;

    let geographic = transform(center, reference.crs(), Crs::Geographic)?;
    Ok(Crs::utm_for(LonLat::new(geographic.x, geographic.y)?))
}

/// Returns the parts of `candidate` that share no point with the union of
/// the reference layers, each carrying its metric length.
///
/// The candidate is brought into the reference system before comparison,
/// and both sides are decomposed into single-part records first.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip_all, err))]
pub fn difference(
    reference_layers: impl IntoIterator<Item = GeometrySet>,
    candidate: &GeometrySet,
    config: &DifferenceConfig,
) -> crate::Result<Difference> {
    info_time!("difference");

    let reference = merge_layers(reference_layers)?;
    let reference_records = reference.len();

    let candidate_records = candidate.len();
    if candidate.crs() != reference.crs() {
        debug!(
            "Reprojecting candidate from {} to {}",
            candidate.crs(),
            reference.crs()
        );
    }
    let candidate = candidate.reproject(reference.crs())?;

    let reference = reference.explode();
    let candidate = candidate.explode();

    if reference.is_empty() {
        return Err(InputError::EmptyInput {
            dataset: Dataset::Reference,
        }
        .into());
    }

    if candidate.is_empty() {
        return Err(InputError::EmptyInput {
            dataset: Dataset::Candidate,
        }
        .into());
    }

    let union = ReferenceUnion::from_set(&reference);
    debug!("Reference union holds {} segments", union.len());

    let crs = reference.crs();
    let candidate_parts = candidate.len();
    let retained = candidate
        .into_iter()
        .filter(|feature| {
            feature
                .shape
                .parts()
                .iter()
                .all(|part| !union.intersects(part))
        })
        .collect::<Vec<_>>();

    let length_crs = match config.length_crs {
        Some(crs) => crs,
        None => length_crs_for(&reference)?,
    };

    let measured = GeometrySet::with_features(crs, retained)
        .reproject(length_crs)?
        .into_iter()
        .map(|mut feature| {
            let length = feature.shape.planar_length();
            feature
                .attributes
                .insert(config.length_attribute.clone(), Value::from(length));
            feature
        })
        .collect::<Vec<Feature>>();

    let counts = DifferenceCounts {
        reference_records,
        reference_parts: reference.len(),
        candidate_records,
        candidate_parts,
        retained: measured.len(),
    };

    info!(
        "Difference retained {} of {} candidate parts ({} records) against {} reference parts ({} records), lengths in {length_crs}",
        counts.retained,
        counts.candidate_parts,
        counts.candidate_records,
        counts.reference_parts,
        counts.reference_records,
    );

    Ok(Difference {
        set: GeometrySet::with_features(length_crs, measured),
        counts,
    })
}
