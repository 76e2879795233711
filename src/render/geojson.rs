use std::io::Write;

use geojson::{Feature as GeoJsonFeature, FeatureCollection, Geometry, JsonObject};
use log::debug;
use roadmend_geo::{Crs, GeometrySet, LineGeometry, Shape};
use serde_json::Value;

use crate::render::{Render, RenderError, Style};

fn positions(line: &LineGeometry) -> Vec<Vec<f64>> {
    line.coords().map(|c| vec![c.x, c.y]).collect()
}

fn geometry(shape: &Shape) -> Option<Geometry> {
    let value = match shape {
        Shape::Line(line) => geojson::Value::LineString(positions(line)),
        Shape::MultiLine(parts) => {
            geojson::Value::MultiLineString(parts.iter().map(positions).collect())
        }
        Shape::Empty => return None,
    };

    Some(Geometry::new(value))
}

/// Builds the styled feature collection for `set`, in longitude/latitude.
///
/// Each feature keeps its attributes and gains the style properties, and a
/// `tooltip` object holding those tooltip fields the row actually has.
pub fn to_collection(
    set: &GeometrySet,
    layer: &str,
    style: &Style,
) -> Result<FeatureCollection, RenderError> {
    let set = set.reproject(Crs::Geographic)?;

    let features = set
        .iter()
        .map(|feature| {
            let mut properties = feature
                .attributes
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<JsonObject>();

            let tooltip = style
                .tooltip
                .iter()
                .filter_map(|field| {
                    feature
                        .attributes
                        .get(field)
                        .map(|value| (field.clone(), value.clone()))
                })
                .collect::<JsonObject>();

            properties.insert("stroke".to_string(), Value::from(style.color.as_str()));
            properties.insert("stroke-width".to_string(), Value::from(style.weight));
            properties.insert("fill".to_string(), Value::from(style.fill_color.as_str()));
            properties.insert("fill-opacity".to_string(), Value::from(style.fill_opacity));
            properties.insert("tooltip".to_string(), Value::Object(tooltip));

            GeoJsonFeature {
                bbox: None,
                geometry: geometry(&feature.shape),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect::<Vec<_>>();

    let mut members = JsonObject::new();
    members.insert("name".to_string(), Value::from(layer));

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(members),
    })
}

/// Writes layers as GeoJSON feature collections.
#[derive(Debug)]
pub struct GeoJsonRenderer<W> {
    writer: W,
    pretty: bool,
}

impl<W: Write> GeoJsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        GeoJsonRenderer {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Render for GeoJsonRenderer<W> {
    fn render(&mut self, set: &GeometrySet, layer: &str, style: &Style) -> Result<(), RenderError> {
        let collection = to_collection(set, layer, style)?;
        debug!("Rendering {} features as layer {layer:?}", collection.features.len());

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &collection)?;
        } else {
            serde_json::to_writer(&mut self.writer, &collection)?;
        }

        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
