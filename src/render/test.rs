use std::path::Path;

use approx::assert_abs_diff_eq;
use geo::coord;
use roadmend_geo::{Attributes, Crs, Feature, GeometrySet, LineGeometry, Shape};
use serde_json::{Value, json};

use crate::load::layer::parse_layer;
use crate::render::{GeoJsonRenderer, Render, RenderError, Style, to_collection};

fn line(points: &[(f64, f64)]) -> LineGeometry {
    LineGeometry::from_coords(points.iter().map(|(x, y)| coord! { x: *x, y: *y })).unwrap()
}

fn roads() -> GeometrySet {
    let mut named = Attributes::new();
    named.insert("road_street_name".to_string(), json!("Abudu Oladejo St"));
    named.insert("distance(m)".to_string(), json!(1250.0));
    named.insert("status".to_string(), json!("pending"));

    GeometrySet::with_features(
        Crs::Geographic,
        vec![
            Feature::new(line(&[(3.3814, 6.4512), (3.3850, 6.4530)]), named),
            Feature::new(
                Shape::MultiLine(vec![
                    line(&[(3.40, 6.40), (3.41, 6.40)]),
                    line(&[(3.42, 6.40), (3.43, 6.40)]),
                ]),
                Attributes::new(),
            ),
        ],
    )
}

#[test]
fn default_style() {
    let style = Style::default();

    assert_eq!(style.color, "red");
    assert_eq!(style.weight, 2.0);
    assert_eq!(style.fill_color, "#3388ff");
    assert_eq!(style.fill_opacity, 0.8);
    assert_eq!(
        style.tooltip,
        vec!["road_street_name", "LOCAL GOVERNMENT", "distance(m)"]
    );
}

#[test_log::test]
fn features_carry_style_and_tooltip() -> Result<(), RenderError> {
    let collection = to_collection(&roads(), "bad lines", &Style::default())?;

    assert_eq!(collection.features.len(), 2);
    assert_eq!(
        collection
            .foreign_members
            .as_ref()
            .and_then(|members| members.get("name")),
        Some(&json!("bad lines"))
    );

    let properties = collection.features[0].properties.clone().unwrap();
    assert_eq!(properties.get("stroke"), Some(&json!("red")));
    assert_eq!(properties.get("stroke-width"), Some(&json!(2.0)));
    assert_eq!(properties.get("fill"), Some(&json!("#3388ff")));
    assert_eq!(properties.get("fill-opacity"), Some(&json!(0.8)));
    assert_eq!(properties.get("status"), Some(&json!("pending")));
    assert_eq!(
        properties.get("tooltip"),
        Some(&json!({
            "road_street_name": "Abudu Oladejo St",
            "distance(m)": 1250.0
        }))
    );

    let bare = collection.features[1].properties.clone().unwrap();
    assert_eq!(bare.get("tooltip"), Some(&json!({})));

    let geometry = collection.features[1].geometry.clone().unwrap();
    assert!(matches!(
        geometry.value,
        geojson::Value::MultiLineString(ref parts) if parts.len() == 2
    ));

    Ok(())
}

#[test_log::test]
fn projected_sets_render_in_lon_lat() -> Result<(), RenderError> {
    let projected = roads().reproject(Crs::Utm {
        zone: 31,
        north: true,
    })?;

    let collection = to_collection(&projected, "projected", &Style::default())?;
    let Some(geojson::Value::LineString(points)) = collection.features[0]
        .geometry
        .as_ref()
        .map(|geometry| geometry.value.clone())
    else {
        panic!("expected a line");
    };

    assert_abs_diff_eq!(points[0][0], 3.3814, epsilon = 1e-7);
    assert_abs_diff_eq!(points[0][1], 6.4512, epsilon = 1e-7);

    Ok(())
}

#[test_log::test]
fn rendered_layer_reads_back() -> Result<(), Box<dyn std::error::Error>> {
    let style = Style::default()
        .with_color("#00ff00")
        .with_tooltip(["status"]);

    let mut renderer = GeoJsonRenderer::new(Vec::new()).pretty();
    renderer.render(&roads(), "roads", &style)?;

    let text = String::from_utf8(renderer.into_inner())?;
    let layer = parse_layer(&text, Path::new("rendered.geojson"))?;

    assert_eq!(layer.crs(), Crs::Geographic);
    assert_eq!(layer.len(), 2);

    let first = &layer.features()[0];
    assert_eq!(first.text("stroke"), Some("#00ff00"));
    assert_eq!(
        first.attributes.get("tooltip"),
        Some(&json!({ "status": "pending" }))
    );
    assert_eq!(first.attributes.get("distance(m)"), Some(&Value::from(1250.0)));

    Ok(())
}

#[test_log::test]
fn empty_shapes_render_as_null_geometry() -> Result<(), Box<dyn std::error::Error>> {
    let mut failed = Attributes::new();
    failed.insert("reason".to_string(), json!("no-path"));

    let set = GeometrySet::with_features(
        Crs::Geographic,
        vec![
            Feature::new(line(&[(3.3814, 6.4512), (3.3850, 6.4530)]), Attributes::new()),
            Feature::new(Shape::Empty, failed),
        ],
    );

    let mut renderer = GeoJsonRenderer::new(Vec::new());
    renderer.render(&set, "corrected", &Style::default())?;

    let written: Value = serde_json::from_slice(&renderer.into_inner())?;
    let features = written["features"].as_array().cloned().unwrap_or_default();

    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["geometry"]["type"], json!("LineString"));
    assert_eq!(features[1]["geometry"], Value::Null);
    assert_eq!(features[1]["properties"]["reason"], json!("no-path"));

    Ok(())
}
