use geo::coord;
use roadmend_fixtures::{
    COVERAGE, COVERAGE_INTERSECTING, COVERAGE_SEGMENTS, RIGHT_OF_WAY, RIGHT_OF_WAY_SEGMENTS,
    fixture_path,
};
use roadmend_geo::{Attributes, Crs, Feature, GeometrySet, LineGeometry, Shape};
use serde_json::{Value, json};

use crate::difference::{
    DifferenceConfig, LENGTH_ATTRIBUTE, ReferenceUnion, difference, length_crs_for, merge_layers,
};
use crate::error::{Dataset, Error, InputError};
use crate::load::{GeoJsonLoader, Load};

fn line(points: &[(f64, f64)]) -> LineGeometry {
    LineGeometry::from_coords(points.iter().map(|(x, y)| coord! { x: *x, y: *y })).unwrap()
}

fn feature(id: i64, points: &[(f64, f64)]) -> Feature {
    let mut attributes = Attributes::new();
    attributes.insert("id".to_string(), json!(id));
    Feature::new(line(points), attributes)
}

fn set(features: Vec<Feature>) -> GeometrySet {
    GeometrySet::with_features(Crs::Geographic, features)
}

fn lat(row: i64) -> f64 {
    6.40 + 0.01 * row as f64
}

/// Ten horizontal reference segments near Lagos, 0.01 degrees apart.
fn reference() -> GeometrySet {
    set((0..10)
        .map(|i| feature(i, &[(3.30, lat(i)), (3.31, lat(i))]))
        .collect())
}

fn ids(set: &GeometrySet) -> Vec<i64> {
    set.iter()
        .filter_map(|f| f.attributes.get("id").and_then(Value::as_i64))
        .collect()
}

#[test_log::test]
fn fixture_difference_retains_unmatched_coverage() -> Result<(), Error> {
    let reference = GeoJsonLoader.load(&fixture_path(RIGHT_OF_WAY))?;
    let candidate = GeoJsonLoader.load(&fixture_path(COVERAGE))?.remove(0);

    let result = difference(reference, &candidate, &DifferenceConfig::default())?;

    assert_eq!(result.counts.reference_records, RIGHT_OF_WAY_SEGMENTS);
    assert_eq!(result.counts.reference_parts, RIGHT_OF_WAY_SEGMENTS);
    assert_eq!(result.counts.candidate_records, COVERAGE_SEGMENTS);
    assert_eq!(result.counts.candidate_parts, COVERAGE_SEGMENTS);
    assert_eq!(
        result.counts.retained,
        COVERAGE_SEGMENTS - COVERAGE_INTERSECTING
    );

    assert_eq!(result.set.len(), 11);
    assert_eq!(ids(&result.set), (4..15).collect::<Vec<_>>());
    assert_eq!(
        result.set.crs(),
        Crs::Utm {
            zone: 31,
            north: true
        }
    );

    for feature in result.set.iter() {
        let length = feature
            .attributes
            .get(LENGTH_ATTRIBUTE)
            .and_then(Value::as_f64)
            .expect("every retained line is measured");

        // 0.01 degrees of longitude at 6.4N is roughly 1.1 km.
        assert!((1000.0..1200.0).contains(&length), "length {length}");
    }

    Ok(())
}

#[test_log::test]
fn disjoint_candidate_is_kept_whole() -> Result<(), Error> {
    let candidate = set((0..5)
        .map(|i| feature(i, &[(3.50, lat(i)), (3.51, lat(i))]))
        .collect());

    let result = difference([reference()], &candidate, &DifferenceConfig::default())?;

    assert_eq!(result.counts.retained, 5);
    assert_eq!(ids(&result.set), vec![0, 1, 2, 3, 4]);

    Ok(())
}

#[test_log::test]
fn touching_candidates_are_all_removed() -> Result<(), Error> {
    let candidate = set(vec![
        // Shares the eastern endpoint of reference 0.
        feature(0, &[(3.31, lat(0)), (3.32, lat(0))]),
        // Ends on the interior of reference 1.
        feature(1, &[(3.305, 6.405), (3.305, lat(1))]),
        // Crosses reference 2.
        feature(2, &[(3.302, 6.415), (3.302, 6.425)]),
        // Lies on reference 3.
        feature(3, &[(3.301, lat(3)), (3.309, lat(3))]),
    ]);

    let result = difference([reference()], &candidate, &DifferenceConfig::default())?;

    assert_eq!(result.counts.candidate_parts, 4);
    assert_eq!(result.counts.retained, 0);
    assert!(result.set.is_empty());

    Ok(())
}

#[test_log::test]
fn multi_part_candidates_are_decomposed() -> Result<(), Error> {
    let mut attributes = Attributes::new();
    attributes.insert("road_street_name".to_string(), json!("Split Street"));

    let candidate = set(vec![Feature::new(
        Shape::MultiLine(vec![
            line(&[(3.305, 6.398), (3.305, 6.402)]),
            line(&[(3.50, 6.40), (3.51, 6.40)]),
        ]),
        attributes,
    )]);

    let result = difference([reference()], &candidate, &DifferenceConfig::default())?;

    assert_eq!(result.counts.candidate_records, 1);
    assert_eq!(result.counts.candidate_parts, 2);
    assert_eq!(result.counts.retained, 1);

    let kept = &result.set.features()[0];
    assert!(kept.shape.is_single_part());
    assert_eq!(kept.text("road_street_name"), Some("Split Street"));

    Ok(())
}

#[test_log::test]
fn reference_layers_must_share_a_crs() {
    let projected = reference()
        .reproject(Crs::Utm {
            zone: 31,
            north: true,
        })
        .unwrap();

    let result = merge_layers([reference(), projected]);

    assert_eq!(
        result,
        Err(InputError::CrsMismatch {
            expected: Crs::Geographic,
            found: Crs::Utm {
                zone: 31,
                north: true
            },
        })
    );
}

#[test_log::test]
fn reference_layers_merge_in_order() -> Result<(), InputError> {
    let all = reference();
    let (first, second) = all.features().split_at(4);

    let merged = merge_layers([set(first.to_vec()), set(second.to_vec())])?;

    assert_eq!(merged, all);
    Ok(())
}

#[test_log::test]
fn empty_inputs_are_rejected() {
    let candidate = reference();

    let no_layers = difference(
        Vec::<GeometrySet>::new(),
        &candidate,
        &DifferenceConfig::default(),
    );
    assert!(matches!(
        no_layers,
        Err(Error::Input(InputError::EmptyInput {
            dataset: Dataset::Reference
        }))
    ));

    let empty_layer = difference(
        [GeometrySet::new(Crs::Geographic)],
        &candidate,
        &DifferenceConfig::default(),
    );
    assert!(matches!(
        empty_layer,
        Err(Error::Input(InputError::EmptyInput {
            dataset: Dataset::Reference
        }))
    ));

    let empty_candidate = difference(
        [reference()],
        &GeometrySet::new(Crs::Geographic),
        &DifferenceConfig::default(),
    );
    assert!(matches!(
        empty_candidate,
        Err(Error::Input(InputError::EmptyInput {
            dataset: Dataset::Candidate
        }))
    ));
}

#[test_log::test]
fn candidate_is_brought_into_reference_crs() -> Result<(), Error> {
    let candidate = set(vec![
        feature(0, &[(3.305, 6.398), (3.305, 6.402)]),
        feature(1, &[(3.50, 6.40), (3.51, 6.40)]),
    ]);
    let projected = candidate.reproject(Crs::Utm {
        zone: 31,
        north: true,
    })?;

    let result = difference([reference()], &projected, &DifferenceConfig::default())?;

    assert_eq!(ids(&result.set), vec![1]);
    Ok(())
}

#[test_log::test]
fn length_crs_can_be_pinned() -> Result<(), Error> {
    let candidate = set(vec![feature(7, &[(3.50, 6.40), (3.51, 6.40)])]);
    let config = DifferenceConfig {
        length_crs: Some(Crs::WebMercator),
        length_attribute: "length".to_string(),
    };

    let result = difference([reference()], &candidate, &config)?;

    assert_eq!(result.set.crs(), Crs::WebMercator);
    let feature = &result.set.features()[0];
    assert!(feature.attributes.contains_key("length"));
    assert!(!feature.attributes.contains_key(LENGTH_ATTRIBUTE));

    Ok(())
}

#[test_log::test]
fn length_crs_follows_reference_extent() -> Result<(), Error> {
    let lagos = Crs::Utm {
        zone: 31,
        north: true,
    };

    assert_eq!(length_crs_for(&reference())?, lagos);
    assert_eq!(length_crs_for(&reference().reproject(lagos)?)?, lagos);
    assert_eq!(
        length_crs_for(&reference().reproject(Crs::WebMercator)?)?,
        lagos
    );

    let south = set(vec![feature(0, &[(-43.2, -22.9), (-43.1, -22.9)])]);
    assert_eq!(
        length_crs_for(&south)?,
        Crs::Utm {
            zone: 23,
            north: false
        }
    );

    Ok(())
}

#[test]
fn union_intersection_predicate() {
    let union = ReferenceUnion::from_set(&reference());
    assert_eq!(union.len(), 10);

    assert!(union.intersects(&line(&[(3.31, 6.40), (3.40, 6.45)])));
    assert!(union.intersects(&line(&[(3.305, 6.39), (3.305, 6.41)])));
    assert!(!union.intersects(&line(&[(3.30, 6.405), (3.31, 6.405)])));
    assert!(!union.intersects(&line(&[(3.311, 6.40), (3.40, 6.40)])));

    let bent = line(&[(3.32, 6.39), (3.32, 6.401), (3.309, 6.401), (3.309, 6.399)]);
    assert!(union.intersects(&bent));
}
