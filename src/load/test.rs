use std::path::Path;

use approx::assert_relative_eq;
use roadmend_fixtures::{
    COVERAGE, COVERAGE_SEGMENTS, RIGHT_OF_WAY, RIGHT_OF_WAY_SEGMENTS, ROADS, fixture_path,
};
use roadmend_geo::{Crs, GeoError, Shape};
use serde_json::{Value, json};

use crate::load::layer::parse_layer;
use crate::load::{
    GeoJsonLoader, Load, LoadError, RecordColumns, RoadRecordReader, clean_numeric,
    clean_numeric_string,
};

#[test_log::test]
fn directory_loads_one_layer_per_file() -> Result<(), LoadError> {
    let layers = GeoJsonLoader.load(&fixture_path(RIGHT_OF_WAY))?;

    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].len(), 6);
    assert_eq!(layers[1].len(), 4);
    assert_eq!(
        layers.iter().map(|layer| layer.len()).sum::<usize>(),
        RIGHT_OF_WAY_SEGMENTS
    );
    assert!(layers.iter().all(|layer| layer.crs() == Crs::Geographic));

    let first = &layers[0].features()[0];
    assert_eq!(first.text("ROW_ID"), Some("ROW-00"));
    assert_eq!(
        first.attributes.keys().collect::<Vec<_>>(),
        vec!["ROW_ID", "status"]
    );

    Ok(())
}

#[test_log::test]
fn file_is_single_layer() -> Result<(), LoadError> {
    let layers = GeoJsonLoader.load(&fixture_path(COVERAGE))?;

    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].len(), COVERAGE_SEGMENTS);
    assert_eq!(layers[0].crs(), Crs::Geographic);
    assert_eq!(
        layers[0].features()[2].attributes.get("road_street_name"),
        Some(&Value::Null)
    );

    Ok(())
}

#[test_log::test]
fn missing_source_is_not_found() {
    let result = GeoJsonLoader.load(Path::new("/nonexistent/layer.geojson"));
    assert!(matches!(result, Err(LoadError::NotFound(_))));
}

#[test_log::test]
fn multi_line_strings_keep_their_parts() -> Result<(), LoadError> {
    let text = json!({
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::32631" } },
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "split" },
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [[[0.0, 0.0], [10.0, 0.0]], [[20.0, 0.0], [30.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "pole" },
                "geometry": { "type": "Point", "coordinates": [5.0, 5.0] }
            },
            {
                "type": "Feature",
                "properties": { "name": "unmapped" },
                "geometry": null
            }
        ]
    })
    .to_string();

    let set = parse_layer(&text, Path::new("inline.geojson"))?;

    assert_eq!(
        set.crs(),
        Crs::Utm {
            zone: 31,
            north: true
        }
    );
    assert_eq!(set.len(), 1);
    assert!(matches!(&set.features()[0].shape, Shape::MultiLine(parts) if parts.len() == 2));
    assert_relative_eq!(set.features()[0].shape.planar_length(), 20.0);

    Ok(())
}

#[test_log::test]
fn single_coordinate_line_is_rejected() {
    let text = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0]] }
            }
        ]
    })
    .to_string();

    match parse_layer(&text, Path::new("inline.geojson")) {
        Err(LoadError::Geometry { feature, error, .. }) => {
            assert_eq!(feature, 1);
            assert_eq!(error, GeoError::TooFewCoordinates(1));
        }
        other => panic!("expected a geometry error, got {other:?}"),
    }
}

#[test_log::test]
fn unknown_crs_is_rejected() {
    let text = json!({
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": "EPSG:27700" } },
        "features": []
    })
    .to_string();

    assert!(matches!(
        parse_layer(&text, Path::new("inline.geojson")),
        Err(LoadError::Crs { .. })
    ));
}

#[test_log::test]
fn malformed_document_is_a_parse_error() {
    assert!(matches!(
        parse_layer("{\"type\": \"FeatureCollection\"", Path::new("broken.geojson")),
        Err(LoadError::Parse { .. })
    ));
}

#[test]
fn numeric_cells_are_cleaned() {
    assert_eq!(clean_numeric_string("3,3814"), "3.3814");
    assert_eq!(clean_numeric_string("6.45 12"), "6.4512");
    assert_eq!(clean_numeric_string("3.38.14"), "3.3814");
    assert_eq!(clean_numeric_string(".6.4512"), "64512");
    assert_eq!(clean_numeric_string(".5"), "5");
    assert_eq!(clean_numeric_string("  "), "");

    assert_relative_eq!(clean_numeric("1 250"), 1250.0);
    assert_relative_eq!(clean_numeric("320,5"), 320.5);
    assert!(clean_numeric("").is_nan());
    assert!(clean_numeric("n/a").is_nan());
}

#[test_log::test]
fn road_sheet_is_read_and_cleaned() -> Result<(), LoadError> {
    let records = RoadRecordReader::default().read_path(&fixture_path(ROADS))?;
    assert_eq!(records.len(), 5);

    let abudu = &records[0];
    assert_eq!(abudu.row, 0);
    assert_relative_eq!(abudu.start.north, 6.4512);
    assert_relative_eq!(abudu.start.east, 3.3814);
    assert_eq!(
        abudu.attributes.get("road_street_name"),
        Some(&json!("Abudu Oladejo St"))
    );
    assert_eq!(abudu.attributes.get("distance(m)"), Some(&json!(1250.0)));
    assert!(!abudu.attributes.contains_key("start_north"));

    let peace = &records[1];
    assert_relative_eq!(peace.start.north, 6.4512);
    assert_relative_eq!(peace.start.east, 3.3814);
    assert_eq!(peace.attributes.get("distance(m)"), Some(&json!(320.5)));

    let broken = &records[2];
    assert!(broken.end.north.is_nan());
    assert!(broken.end.is_missing());
    assert!(!broken.start.is_missing());

    let dotted = &records[4];
    assert_relative_eq!(dotted.start.north, 64512.0);

    Ok(())
}

#[test_log::test]
fn missing_coordinate_column_is_reported() {
    let data = "road_street_name,start_north,start_east,end_north\nA,6.4,3.3,6.5\n";
    let reader = csv::Reader::from_reader(data.as_bytes());

    match RoadRecordReader::default().read(reader, Path::new("inline.csv")) {
        Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "end_east"),
        other => panic!("expected a missing column, got {other:?}"),
    }
}

#[test_log::test]
fn custom_column_names() -> Result<(), LoadError> {
    let data = "name,lat_a,lon_a,lat_b,lon_b\nA,6.4,3.3,6.5,3.4\n";
    let reader = csv::Reader::from_reader(data.as_bytes());

    let columns = RecordColumns {
        name: "name".to_string(),
        start_north: "lat_a".to_string(),
        start_east: "lon_a".to_string(),
        end_north: "lat_b".to_string(),
        end_east: "lon_b".to_string(),
        numeric: vec![],
    };

    let records = RoadRecordReader::new(columns).read(reader, Path::new("inline.csv"))?;
    assert_eq!(records.len(), 1);
    assert_relative_eq!(records[0].end.east, 3.4);
    assert_eq!(records[0].attributes.len(), 1);

    Ok(())
}
